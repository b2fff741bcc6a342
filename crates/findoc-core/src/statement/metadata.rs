//! Regex probes over the unstructured preamble of a statement export.

use crate::dates::normalize_date_string;
use crate::extract::rules::patterns::{
    ACCOUNT_NO_LABEL, ADDRESS_LABEL, CUSTOMER_ID_LABEL, EMAIL, IFSC, JOINT_HOLDERS_LABEL,
    STATEMENT_RANGE,
};
use crate::models::statement::StatementMetadata;

/// Pull key/value metadata out of the preamble text.
///
/// Each probe is independent: a miss leaves its field unset and the others
/// unaffected. Statement range endpoints keep the raw matched string when
/// date normalization fails.
pub fn extract_metadata(preamble: &str) -> StatementMetadata {
    let mut meta = StatementMetadata::default();

    if let Some(caps) = ACCOUNT_NO_LABEL.captures(preamble) {
        meta.account_number = Some(caps[1].to_string());
    }

    if let Some(m) = IFSC.find(preamble) {
        meta.ifsc = Some(m.as_str().to_string());
    }

    if let Some(caps) = CUSTOMER_ID_LABEL.captures(preamble) {
        meta.customer_id = Some(caps[1].to_string());
    }

    if let Some(m) = EMAIL.find(preamble) {
        meta.email = Some(m.as_str().to_string());
    }

    if let Some(caps) = STATEMENT_RANGE.captures(preamble) {
        meta.statement_from =
            Some(normalize_date_string(&caps[1]).unwrap_or_else(|| caps[1].to_string()));
        meta.statement_to =
            Some(normalize_date_string(&caps[2]).unwrap_or_else(|| caps[2].to_string()));
    }

    if let Some(caps) = ADDRESS_LABEL.captures(preamble) {
        meta.address = Some(caps[1].trim().to_string());
    }

    if let Some(caps) = JOINT_HOLDERS_LABEL.captures(preamble) {
        meta.joint_holders = Some(caps[1].trim().to_string());
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn probes_are_independent() {
        let meta = extract_metadata("IFSC : SBIN0004321\nno other fields here");
        assert_eq!(meta.ifsc.as_deref(), Some("SBIN0004321"));
        assert_eq!(meta.account_number, None);
        assert_eq!(meta.email, None);
    }

    #[test]
    fn full_preamble_is_probed() {
        let preamble = "\
MR ARJUN MEHTA\n\
Address : 14 Lake View Road, Indiranagar, Bengaluru\n\
Account No : 00123456789012\n\
Cust ID : 4455667\n\
IFSC : ICIC0006789\n\
Email : arjun.mehta@example.com\n\
JOINT HOLDERS : SMT KAVITA MEHTA\n\
Statement From : 01/04/2023 To : 30/06/2023\n";

        let meta = extract_metadata(preamble);
        assert_eq!(meta.account_number.as_deref(), Some("00123456789012"));
        assert_eq!(meta.customer_id.as_deref(), Some("4455667"));
        assert_eq!(meta.ifsc.as_deref(), Some("ICIC0006789"));
        assert_eq!(meta.email.as_deref(), Some("arjun.mehta@example.com"));
        assert_eq!(meta.statement_from.as_deref(), Some("2023-04-01"));
        assert_eq!(meta.statement_to.as_deref(), Some("2023-06-30"));
        // Address capture stops at the first comma.
        assert_eq!(meta.address.as_deref(), Some("14 Lake View Road"));
        assert_eq!(meta.joint_holders.as_deref(), Some("SMT KAVITA MEHTA"));
    }

    #[test]
    fn unparseable_range_endpoints_keep_the_raw_string() {
        let meta = extract_metadata("Statement From : 99/99/9999 To : 31/03/2024");
        assert_eq!(meta.statement_from.as_deref(), Some("99/99/9999"));
        assert_eq!(meta.statement_to.as_deref(), Some("2024-03-31"));
    }

    #[test]
    fn empty_preamble_probes_nothing() {
        assert!(extract_metadata("").is_empty());
    }
}
