//! Delimiter detection, row splitting and column mapping for statement tables.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Candidate delimiters, most common first.
const DELIMITER_CANDIDATES: &[u8] = &[b',', b'\t', b';', b'|'];

/// Rows inspected when sniffing for a consistent field count.
const SNIFF_SAMPLE_ROWS: usize = 10;

lazy_static! {
    static ref RELAXED_SEPARATOR: Regex = Regex::new(r"[,\t]").unwrap();
}

/// Known header-name aliases per canonical column, matched case-insensitively.
const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    ("date", &["Date", "Transaction Date", "Txn Date", "DATE"]),
    ("description", &["Description", "Narration", "Particulars", "DESCRIPTION"]),
    ("ref_id", &["Chq./Ref.No."]),
    ("debit", &["Debit", "Withdrawal", "DR", "DEBIT", "Withdrawal Amt."]),
    ("credit", &["Credit", "Deposit", "CR", "CREDIT", "Deposit Amt."]),
    ("balance", &["Balance", "Closing Balance", "BALANCE"]),
    ("account", &["Account", "Account Number", "ACC NO", "ACCOUNT"]),
];

/// Source-column indices bound to each canonical field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub ref_id: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub balance: Option<usize>,
    pub account: Option<usize>,
}

/// Bind each canonical field to the first alias-matching header column.
pub fn map_columns(header: &[String]) -> ColumnMap {
    let upper: Vec<String> = header.iter().map(|h| h.trim().to_uppercase()).collect();

    let find = |field: &str| -> Option<usize> {
        let (_, aliases) = COLUMN_ALIASES.iter().find(|(name, _)| *name == field)?;
        upper
            .iter()
            .position(|col| aliases.iter().any(|alias| alias.to_uppercase() == *col))
    };

    ColumnMap {
        date: find("date"),
        description: find("description"),
        ref_id: find("ref_id"),
        debit: find("debit"),
        credit: find("credit"),
        balance: find("balance"),
        account: find("account"),
    }
}

/// Detect the field delimiter by looking for a consistent multi-column
/// field count over the first rows. Returns `None` when no candidate is
/// consistent, in which case the caller falls back to inspecting the
/// header line.
pub fn sniff_delimiter(table: &str) -> Option<u8> {
    for &candidate in DELIMITER_CANDIDATES {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .has_headers(false)
            .flexible(true)
            .from_reader(table.as_bytes());

        let mut counts = Vec::new();
        for record in reader.records().take(SNIFF_SAMPLE_ROWS) {
            let Ok(record) = record else { break };
            counts.push(record.len());
        }

        let Some(&first) = counts.first() else { continue };
        if first > 1 && counts.iter().all(|&c| c == first) {
            debug!(delimiter = %(candidate as char), "sniffed statement delimiter");
            return Some(candidate);
        }
    }
    None
}

/// Parse the table into rows with the given delimiter, skipping rows the
/// reader rejects rather than aborting the whole parse.
pub fn split_rows(table: &str, delimiter: u8) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(table.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(|f| f.to_string()).collect()),
            Err(e) => debug!(error = %e, "skipping malformed statement row"),
        }
    }
    rows
}

/// Relaxed retry: split every line on comma or tab interchangeably.
pub fn split_relaxed(table: &str) -> Vec<Vec<String>> {
    table
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            RELAXED_SEPARATOR
                .split(line)
                .map(|f| f.trim().to_string())
                .collect()
        })
        .collect()
}

/// Thousands-separator-stripped non-negative decimal.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim().trim_start_matches(['₹', '$']).trim();
    let amount = Decimal::from_str(cleaned).ok()?;
    (!amount.is_sign_negative()).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sniffs_commas_despite_quoted_fields() {
        let table = "Date,Narration,Amount\n01/01/2024,\"A, B AND CO\",\"1,000.00\"\n";
        assert_eq!(sniff_delimiter(table), Some(b','));
    }

    #[test]
    fn sniffs_tabs_and_pipes() {
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3\n"), Some(b'\t'));
        assert_eq!(sniff_delimiter("a|b|c\n1|2|3\n"), Some(b'|'));
    }

    #[test]
    fn single_column_text_is_not_sniffable() {
        assert_eq!(sniff_delimiter("just a line\nanother line\n"), None);
    }

    #[test]
    fn alias_mapping_is_case_insensitive_and_exact() {
        let header: Vec<String> = ["date", "NARRATION", "Withdrawal Amt.", "Deposit Amt.", "closing balance"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = map_columns(&header);
        assert_eq!(map.date, Some(0));
        assert_eq!(map.description, Some(1));
        assert_eq!(map.debit, Some(2));
        assert_eq!(map.credit, Some(3));
        assert_eq!(map.balance, Some(4));
        assert_eq!(map.account, None);
    }

    #[test]
    fn substring_header_names_do_not_match() {
        // Alias matching is exact, not contains: "Value Date" is not "Date".
        let header: Vec<String> = ["Value Date"].iter().map(|s| s.to_string()).collect();
        assert_eq!(map_columns(&header).date, None);
    }

    #[test]
    fn relaxed_split_mixes_commas_and_tabs() {
        let rows = split_relaxed("a,b\tc\n1\t2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn amounts_parse_with_indian_grouping() {
        assert_eq!(parse_amount("1,03,750.00"), Decimal::from_str("103750.00").ok());
        assert_eq!(parse_amount("₹ 500"), Decimal::from_str("500").ok());
        assert_eq!(parse_amount("-12.00"), None);
        assert_eq!(parse_amount("N/A"), None);
    }
}
