//! Fallback matcher battery for bank statement text.

use lazy_static::lazy_static;

use super::{MatcherRule, ValueKind};

lazy_static! {
    /// Statement rules in priority order. Debit aliases come before credit
    /// aliases so a row mentioning both keeps its withdrawal reading first.
    pub static ref STATEMENT_RULES: Vec<MatcherRule> = vec![
        MatcherRule::new(
            "txn_date",
            ValueKind::Date,
            r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b",
        ),
        MatcherRule::new(
            "txn_date",
            ValueKind::Date,
            r"\b(\d{4}-\d{2}-\d{2})\b",
        ),
        MatcherRule::new(
            "debit",
            ValueKind::Amount,
            r"(?i)debit\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "debit",
            ValueKind::Amount,
            r"(?i)withdrawal\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "credit",
            ValueKind::Amount,
            r"(?i)credit\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "credit",
            ValueKind::Amount,
            r"(?i)deposit\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "balance",
            ValueKind::Amount,
            r"(?i)balance\s*:?\s*[₹$]?\s*([\d,]+\.?\d*)",
        ),
        MatcherRule::new(
            "account_number",
            ValueKind::Account,
            r"(?i)account\s*#?\s*:?\s*(\d+)",
        ),
        MatcherRule::new(
            "account_number",
            ValueKind::Account,
            r"(?i)acc\s*#?\s*:?\s*(\d+)",
        ),
        MatcherRule::new(
            "account_number",
            ValueKind::Account,
            r"\b(\d{10,16})\b",
        ),
        MatcherRule::new(
            "mode",
            ValueKind::Mode,
            r"(?i)payment\s*mode\s*:?\s*(UPI|NEFT|IMPS|RTGS|CASH|CHEQUE|CARD)",
        ),
        MatcherRule::new(
            "mode",
            ValueKind::Mode,
            r"(?i)\b(UPI|NEFT|IMPS|RTGS|CASH|CHEQUE|CARD)\b",
        ),
    ];
}
