//! Extraction schemas: the field contract sent with every service request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FieldMap;

/// The kind of value a schema field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// A date string, expected in YYYY-MM-DD form.
    Date,
    /// A numeric amount.
    Number,
    /// An ordered list of objects.
    List,
    /// A free-form key/value object.
    Map,
}

/// A single field in an extraction schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    /// Canonical field name.
    pub name: String,
    /// Expected value kind.
    pub kind: FieldKind,
    /// Natural-language description shown to the model.
    pub description: String,
}

impl SchemaField {
    pub fn new(name: &str, kind: FieldKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
        }
    }
}

/// A named set of fields plus the instruction describing the extraction task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSchema {
    /// Schema name (used in logs and errors).
    pub name: String,
    /// Task instruction for the model.
    pub instruction: String,
    /// Fields to extract, in output order.
    pub fields: Vec<SchemaField>,
}

impl ExtractionSchema {
    /// Render the field list as prompt text, one line per field.
    pub fn describe_fields(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            let kind = match field.kind {
                FieldKind::Text => "string",
                FieldKind::Date => "date (YYYY-MM-DD)",
                FieldKind::Number => "number",
                FieldKind::List => "list",
                FieldKind::Map => "object",
            };
            out.push_str(&format!("- {} ({}): {}\n", field.name, kind, field.description));
        }
        out
    }

    /// Filter a decoded payload down to fields that conform to this schema.
    ///
    /// Unknown keys and nulls are dropped. Wrong-kinded values are dropped,
    /// with one coercion: a numeric string is accepted for a `Number` field.
    pub fn validate(&self, raw: FieldMap) -> FieldMap {
        let mut out = FieldMap::new();
        for field in &self.fields {
            let Some(value) = raw.get(&field.name) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match (field.kind, value) {
                (FieldKind::Text | FieldKind::Date, Value::String(_)) => {
                    out.insert(field.name.clone(), value.clone());
                }
                (FieldKind::Number, Value::Number(_)) => {
                    out.insert(field.name.clone(), value.clone());
                }
                (FieldKind::Number, Value::String(s)) => {
                    // Models sometimes quote amounts; accept if parseable.
                    if let Ok(n) = s.replace(',', "").trim().parse::<f64>() {
                        if let Some(n) = serde_json::Number::from_f64(n) {
                            out.insert(field.name.clone(), Value::Number(n));
                        }
                    }
                }
                (FieldKind::List, Value::Array(_)) => {
                    out.insert(field.name.clone(), value.clone());
                }
                (FieldKind::Map, Value::Object(_)) => {
                    out.insert(field.name.clone(), value.clone());
                }
                _ => {
                    tracing::debug!(
                        field = field.name.as_str(),
                        "dropping field with unexpected value kind"
                    );
                }
            }
        }
        out
    }
}

/// Schema for invoice documents.
pub fn invoice_schema() -> ExtractionSchema {
    ExtractionSchema {
        name: "invoice".to_string(),
        instruction: "You are an expert at extracting invoice information from text. \
            Extract the fields below from the provided invoice text. \
            If a field is not found, return null for that field. \
            For amounts, extract only the numeric value without currency symbols. \
            For dates, ensure they are in YYYY-MM-DD format."
            .to_string(),
        fields: vec![
            SchemaField::new("invoice_number", FieldKind::Text, "Invoice number or ID"),
            SchemaField::new("invoice_date", FieldKind::Date, "Invoice date"),
            SchemaField::new("vendor_name", FieldKind::Text, "Name of the vendor or supplier"),
            SchemaField::new("vendor_gstin", FieldKind::Text, "Vendor's GSTIN number"),
            SchemaField::new("taxable_value", FieldKind::Number, "Taxable amount before GST"),
            SchemaField::new("gst_amount", FieldKind::Number, "GST amount"),
            SchemaField::new(
                "invoice_total",
                FieldKind::Number,
                "Total invoice amount including tax",
            ),
            SchemaField::new("payment_terms", FieldKind::Text, "Payment terms if mentioned"),
            SchemaField::new("currency", FieldKind::Text, "Currency of the invoice"),
            SchemaField::new(
                "items",
                FieldKind::List,
                "List of items with descriptions and amounts",
            ),
        ],
    }
}

/// Schema for bank statement content.
pub fn statement_schema() -> ExtractionSchema {
    ExtractionSchema {
        name: "statement".to_string(),
        instruction: "You are an expert at extracting bank statement information from text. \
            Extract the fields below from the provided bank statement text. \
            If a field is not found, return null for that field. \
            For amounts, extract only the numeric value without currency symbols. \
            For dates, ensure they are in YYYY-MM-DD format. \
            For mode, identify common payment methods like UPI, NEFT, IMPS, RTGS."
            .to_string(),
        fields: vec![
            SchemaField::new("txn_date", FieldKind::Date, "Transaction date"),
            SchemaField::new("description", FieldKind::Text, "Transaction description"),
            SchemaField::new("debit", FieldKind::Number, "Debit amount (money going out)"),
            SchemaField::new("credit", FieldKind::Number, "Credit amount (money coming in)"),
            SchemaField::new("balance", FieldKind::Number, "Closing balance"),
            SchemaField::new("account_number", FieldKind::Text, "Bank account number"),
            SchemaField::new("mode", FieldKind::Text, "Mode of payment (UPI, NEFT, IMPS, etc.)"),
            SchemaField::new("category", FieldKind::Text, "Transaction category"),
            SchemaField::new(
                "meta_data",
                FieldKind::Map,
                "Additional metadata like sender/receiver info",
            ),
        ],
    }
}
