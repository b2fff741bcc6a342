//! Canonical bank statement records produced by the extraction pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment rail classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Upi,
    Neft,
    Imps,
    Rtgs,
    Cash,
    Cheque,
    Card,
}

impl FromStr for PaymentMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UPI" => Ok(Self::Upi),
            "NEFT" => Ok(Self::Neft),
            "IMPS" => Ok(Self::Imps),
            "RTGS" => Ok(Self::Rtgs),
            "CASH" => Ok(Self::Cash),
            "CHEQUE" => Ok(Self::Cheque),
            "CARD" => Ok(Self::Card),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Upi => "UPI",
            Self::Neft => "NEFT",
            Self::Imps => "IMPS",
            Self::Rtgs => "RTGS",
            Self::Cash => "CASH",
            Self::Cheque => "CHEQUE",
            Self::Card => "CARD",
        };
        f.write_str(s)
    }
}

/// A single bank transaction.
///
/// Rows are retained by the statement parser only when they carry a valid
/// date and at least one of debit/credit; everything else here is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_date: Option<NaiveDate>,

    /// Narration / description, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference or cheque number from the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    /// Amount withdrawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<Decimal>,

    /// Amount deposited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<Decimal>,

    /// Balance after the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,

    /// Account number, digits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Payment rail, when identifiable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PaymentMode>,

    /// Transaction category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-form metadata (sender/receiver info and the like).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Account-level metadata extracted from the preamble of a statement export.
///
/// Every probe is independent; a missing match simply leaves the field unset.
/// The date range keeps the raw matched string when normalization fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// 11-character bank routing code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_holders: Option<String>,
}

impl StatementMetadata {
    /// True when no probe matched anything.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("upi".parse::<PaymentMode>(), Ok(PaymentMode::Upi));
        assert_eq!(" NEFT ".parse::<PaymentMode>(), Ok(PaymentMode::Neft));
        assert!("WIRE".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn mode_round_trips_through_display() {
        for mode in [
            PaymentMode::Upi,
            PaymentMode::Neft,
            PaymentMode::Imps,
            PaymentMode::Rtgs,
            PaymentMode::Cash,
            PaymentMode::Cheque,
            PaymentMode::Card,
        ] {
            assert_eq!(mode.to_string().parse::<PaymentMode>(), Ok(mode));
        }
    }

    #[test]
    fn mode_serializes_uppercase() {
        let json = serde_json::to_string(&PaymentMode::Cheque).unwrap();
        assert_eq!(json, "\"CHEQUE\"");
    }
}
