//! Canonical invoice record produced by the extraction pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line-item entry as extracted, kept loosely typed.
pub type LineItem = serde_json::Map<String, serde_json::Value>;

/// Structured invoice fields.
///
/// Every field is optional: anything absent from the extracted field map, or
/// failing validation, is simply absent here. There is no required-field
/// enforcement at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number or identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Date the invoice was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,

    /// Vendor / supplier name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Vendor tax registration number (15-character GSTIN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_gstin: Option<String>,

    /// Taxable amount before GST.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_value: Option<Decimal>,

    /// GST amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_amount: Option<Decimal>,

    /// Total amount including tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_total: Option<Decimal>,

    /// Payment terms, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,

    /// Currency code or symbol as written on the invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Line items, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
}

impl InvoiceRecord {
    /// True when no field survived extraction.
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.invoice_date.is_none()
            && self.vendor_name.is_none()
            && self.vendor_gstin.is_none()
            && self.taxable_value.is_none()
            && self.gst_amount.is_none()
            && self.invoice_total.is_none()
            && self.payment_terms.is_none()
            && self.currency.is_none()
            && self.items.is_none()
    }
}
