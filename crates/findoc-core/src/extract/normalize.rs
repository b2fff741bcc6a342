//! Validation and coercion of raw field maps into canonical records.
//!
//! Every rule is independent and order-insensitive. Under the default
//! best-effort policy an invalid value is silently excluded from the output
//! record; a partially populated record is preferred over an aborted parse.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::FieldPolicy;
use crate::dates::normalize_date;
use crate::error::ExtractionError;
use crate::models::invoice::InvoiceRecord;
use crate::models::statement::{PaymentMode, TransactionRecord};
use findoc_extract::FieldMap;

use super::rules::patterns::GSTIN;

type Result<T> = std::result::Result<T, ExtractionError>;

/// Normalize a raw field map into an invoice record.
pub fn normalize_invoice(fields: &FieldMap, policy: FieldPolicy) -> Result<InvoiceRecord> {
    Ok(InvoiceRecord {
        invoice_number: take(fields, "invoice_number", policy, clean_string)?,
        invoice_date: take(fields, "invoice_date", policy, clean_date)?,
        vendor_name: take(fields, "vendor_name", policy, clean_string)?,
        vendor_gstin: take(fields, "vendor_gstin", policy, clean_gstin)?,
        taxable_value: take(fields, "taxable_value", policy, clean_amount)?,
        gst_amount: take(fields, "gst_amount", policy, clean_amount)?,
        invoice_total: take(fields, "invoice_total", policy, clean_amount)?,
        payment_terms: take(fields, "payment_terms", policy, clean_string)?,
        currency: take(fields, "currency", policy, clean_string)?,
        items: take(fields, "items", policy, clean_items)?,
    })
}

/// Normalize a raw field map into a transaction record.
pub fn normalize_transaction(fields: &FieldMap, policy: FieldPolicy) -> Result<TransactionRecord> {
    Ok(TransactionRecord {
        txn_date: take(fields, "txn_date", policy, clean_date)?,
        description: take(fields, "description", policy, clean_string)?,
        ref_id: take(fields, "ref_id", policy, clean_string)?,
        debit: take(fields, "debit", policy, clean_amount)?,
        credit: take(fields, "credit", policy, clean_amount)?,
        balance: take(fields, "balance", policy, clean_amount)?,
        account_number: take(fields, "account_number", policy, clean_account_number)?,
        mode: take(fields, "mode", policy, clean_mode)?,
        category: take(fields, "category", policy, clean_string)?,
        meta_data: take(fields, "meta_data", policy, clean_map)?,
    })
}

/// Apply one cleaning rule to one field under the given policy.
fn take<T>(
    fields: &FieldMap,
    name: &str,
    policy: FieldPolicy,
    clean: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>> {
    let Some(value) = fields.get(name) else {
        return Ok(None);
    };
    match clean(value) {
        Some(v) => Ok(Some(v)),
        None => match policy {
            FieldPolicy::BestEffort => Ok(None),
            FieldPolicy::Strict => Err(ExtractionError::Validation {
                field: name.to_string(),
                reason: format!("unusable value: {value}"),
            }),
        },
    }
}

/// Trimmed non-empty text; bare numbers are accepted and stringified.
pub fn clean_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A date in any of the known formats.
pub fn clean_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => normalize_date(s),
        _ => None,
    }
}

/// A non-negative decimal; thousands separators stripped from strings.
pub fn clean_amount(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        Value::String(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim().trim_start_matches(['₹', '$']).trim();
            Decimal::from_str(cleaned).ok()?
        }
        _ => return None,
    };
    (!amount.is_sign_negative()).then_some(amount)
}

/// A GSTIN matching the fixed 15-character structure.
pub fn clean_gstin(value: &Value) -> Option<String> {
    let s = clean_string(value)?;
    GSTIN.is_match(&s).then_some(s)
}

/// Digits only, at least 8 of them.
pub fn clean_account_number(value: &Value) -> Option<String> {
    let s = clean_string(value)?;
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() >= 8).then_some(digits)
}

/// A member of the payment mode enumeration, case-insensitively.
pub fn clean_mode(value: &Value) -> Option<PaymentMode> {
    match value {
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// A list of maps, passed through as-is.
fn clean_items(value: &Value) -> Option<Vec<serde_json::Map<String, Value>>> {
    let Value::Array(entries) = value else {
        return None;
    };
    Some(
        entries
            .iter()
            .filter_map(|e| e.as_object().cloned())
            .collect(),
    )
}

/// A map, passed through as-is.
fn clean_map(value: &Value) -> Option<serde_json::Map<String, Value>> {
    value.as_object().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(pairs: &[(&str, Value)]) -> FieldMap {
        let mut m = FieldMap::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v.clone());
        }
        m
    }

    #[test]
    fn conforming_gstin_is_retained() {
        let fields = map(&[("vendor_gstin", json!("29ABCDE1234F1Z5"))]);
        let record = normalize_invoice(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.vendor_gstin.as_deref(), Some("29ABCDE1234F1Z5"));
    }

    #[test]
    fn malformed_gstin_is_dropped() {
        let fields = map(&[("vendor_gstin", json!("29ABCDE1234F1X5"))]);
        let record = normalize_invoice(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.vendor_gstin, None);
    }

    #[test]
    fn account_number_is_digit_filtered_with_floor() {
        let fields = map(&[("account_number", json!("A/C: 1234-5678-90"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.account_number.as_deref(), Some("1234567890"));

        let fields = map(&[("account_number", json!("123-456"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.account_number, None);
    }

    #[test]
    fn amounts_strip_separators_and_reject_negatives() {
        let fields = map(&[
            ("taxable_value", json!("1,00,000.50")),
            ("gst_amount", json!(-5.0)),
            ("invoice_total", json!("n/a")),
        ]);
        let record = normalize_invoice(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.taxable_value, Some(Decimal::from_str("100000.50").unwrap()));
        assert_eq!(record.gst_amount, None);
        assert_eq!(record.invoice_total, None);
    }

    #[test]
    fn mode_is_uppercased_into_the_enumeration() {
        let fields = map(&[("mode", json!("neft"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.mode, Some(PaymentMode::Neft));

        let fields = map(&[("mode", json!("BARTER"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.mode, None);
    }

    #[test]
    fn whitespace_strings_are_dropped() {
        let fields = map(&[("description", json!("   "))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.description, None);
    }

    #[test]
    fn structured_values_pass_through_only_as_their_shape() {
        let fields = map(&[
            ("items", json!([{"description": "Widget", "amount": 10.0}])),
            ("meta_data", json!("not a map")),
        ]);
        let invoice = normalize_invoice(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(invoice.items.as_ref().map(Vec::len), Some(1));

        let txn = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(txn.meta_data, None);
    }

    #[test]
    fn strict_policy_surfaces_the_failure() {
        let fields = map(&[("invoice_date", json!("not a date"))]);
        let err = normalize_invoice(&fields, FieldPolicy::Strict).unwrap_err();
        assert!(matches!(err, ExtractionError::Validation { field, .. } if field == "invoice_date"));
    }

    #[test]
    fn absent_fields_are_fine_under_strict() {
        let record = normalize_invoice(&FieldMap::new(), FieldPolicy::Strict).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn dates_arrive_iso_or_in_bank_formats() {
        let fields = map(&[("txn_date", json!("2024-03-12"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.txn_date, NaiveDate::from_ymd_opt(2024, 3, 12));

        let fields = map(&[("txn_date", json!("12/03/2024"))]);
        let record = normalize_transaction(&fields, FieldPolicy::BestEffort).unwrap();
        assert_eq!(record.txn_date, NaiveDate::from_ymd_opt(2024, 3, 12));
    }
}
