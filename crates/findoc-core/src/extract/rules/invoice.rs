//! Fallback matcher battery for invoice text.

use lazy_static::lazy_static;

use super::{MatcherRule, ValueKind};

lazy_static! {
    /// Invoice rules in priority order. For the total: "total", then
    /// "amount", then "grand total" - first usable match wins per field.
    pub static ref INVOICE_RULES: Vec<MatcherRule> = vec![
        MatcherRule::new(
            "invoice_number",
            ValueKind::Text,
            r"(?i)invoice\s*#?\s*:?\s*([A-Z0-9][A-Z0-9\-_/]*)",
        ),
        MatcherRule::new(
            "invoice_number",
            ValueKind::Text,
            r"(?i)invoice\s*number\s*:?\s*([A-Z0-9][A-Z0-9\-_/]*)",
        ),
        MatcherRule::new(
            "invoice_number",
            ValueKind::Text,
            r"(?i)bill\s*#?\s*:?\s*([A-Z0-9][A-Z0-9\-_/]*)",
        ),
        MatcherRule::new(
            "invoice_total",
            ValueKind::Amount,
            r"(?i)total\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "invoice_total",
            ValueKind::Amount,
            r"(?i)amount\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "invoice_total",
            ValueKind::Amount,
            r"(?i)grand\s*total\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "gst_amount",
            ValueKind::Amount,
            r"(?i)gst\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "gst_amount",
            ValueKind::Amount,
            r"(?i)cgst\s*\+?\s*sgst\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "taxable_value",
            ValueKind::Amount,
            r"(?i)taxable\s*(?:value|amount)\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "invoice_date",
            ValueKind::Date,
            r"(?i)(?:invoice\s*)?date[d]?\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2})",
        ),
        MatcherRule::new(
            "vendor_gstin",
            ValueKind::Text,
            r"(?i)GSTIN\s*(?:No\.?)?\s*:?\s*(\d{2}[A-Z]{5}\d{4}[A-Z]\dZ[A-Z\d])",
        ),
        MatcherRule::new(
            "vendor_gstin",
            ValueKind::Text,
            r"\b(\d{2}[A-Z]{5}\d{4}[A-Z]\dZ[A-Z\d])\b",
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::super::evaluate;
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn extracts_the_common_invoice_fields() {
        let text = "\
            Invoice #: INV-2024-017\n\
            Date: 15/01/2024\n\
            GSTIN: 29ABCDE1234F1Z5\n\
            Taxable Value: 1,000.00\n\
            GST: 180.00\n\
            Total: 1,180.00\n";

        let fields = evaluate(text, &INVOICE_RULES);
        assert_eq!(fields["invoice_number"], json!("INV-2024-017"));
        assert_eq!(fields["invoice_date"], json!("2024-01-15"));
        assert_eq!(fields["vendor_gstin"], json!("29ABCDE1234F1Z5"));
        assert_eq!(fields["taxable_value"], json!(1000.0));
        assert_eq!(fields["gst_amount"], json!(180.0));
        assert_eq!(fields["invoice_total"], json!(1180.0));
    }

    #[test]
    fn total_prefers_the_total_label_over_amount() {
        let fields = evaluate("Amount: 999.00\nTotal: 1,180.00", &INVOICE_RULES);
        assert_eq!(fields["invoice_total"], json!(1180.0));
    }

    #[test]
    fn bill_label_is_a_lower_priority_alias() {
        let fields = evaluate("Bill #: B-778", &INVOICE_RULES);
        assert_eq!(fields["invoice_number"], json!("B-778"));
    }

    #[test]
    fn unrelated_text_yields_nothing() {
        assert!(evaluate("quarterly report, nothing to see", &INVOICE_RULES).is_empty());
    }
}
