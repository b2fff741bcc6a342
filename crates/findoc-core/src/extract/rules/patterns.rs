//! Common regex patterns shared by the fallback batteries and the statement
//! metadata probes.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // GSTIN: 2 digits, 5 letters, 4 digits, 1 letter, 1 digit, 'Z', 1 alphanumeric.
    pub static ref GSTIN: Regex = Regex::new(
        r"^\d{2}[A-Z]{5}\d{4}[A-Z]\dZ[A-Z\d]$"
    ).unwrap();

    // IFSC: 4 letters, a zero, 6 alphanumerics.
    pub static ref IFSC: Regex = Regex::new(
        r"\b[A-Z]{4}0[A-Z0-9]{6}\b"
    ).unwrap();

    // Labeled metadata probes for statement preambles.
    pub static ref ACCOUNT_NO_LABEL: Regex = Regex::new(
        r"(?i)Account\s*No\s*:?\s*(\d+)"
    ).unwrap();

    pub static ref CUSTOMER_ID_LABEL: Regex = Regex::new(
        r"(?i)Cust\s*ID\s*:?\s*(\d+)"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"
    ).unwrap();

    pub static ref STATEMENT_RANGE: Regex = Regex::new(
        r"(?i)Statement\s+From\s*:?\s*([0-9/]{6,10})\s*To\s*:?\s*([0-9/]{6,10})"
    ).unwrap();

    pub static ref ADDRESS_LABEL: Regex = Regex::new(
        r"(?i)Address\s*:?\s*([^,\n]+)"
    ).unwrap();

    pub static ref JOINT_HOLDERS_LABEL: Regex = Regex::new(
        r"(?i)JOINT\s+HOLDERS\s*:?\s*([^,\n]+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gstin_accepts_the_structural_pattern() {
        assert!(GSTIN.is_match("29ABCDE1234F1Z5"));
    }

    #[test]
    fn gstin_rejects_near_misses() {
        for bad in [
            "29ABCDE1234F1X5",  // missing the literal Z
            "2ABCDE1234F1Z5",   // short state code
            "29ABCDE1234F1Z",   // 14 chars
            "29abcde1234f1z5",  // lower case
        ] {
            assert!(!GSTIN.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn ifsc_requires_the_zero() {
        assert!(IFSC.is_match("HDFC0001234"));
        assert!(!IFSC.is_match("HDFC1001234"));
        assert!(!IFSC.is_match("HDF00012345"));
    }

    #[test]
    fn statement_range_captures_both_endpoints() {
        let caps = STATEMENT_RANGE
            .captures("Statement From : 01/01/2024 To : 31/03/2024")
            .unwrap();
        assert_eq!(&caps[1], "01/01/2024");
        assert_eq!(&caps[2], "31/03/2024");
    }
}
