//! Specialized parser for CSV bank statement exports.
//!
//! Real exports prepend unstructured metadata (account info, generation
//! timestamps, disclaimers) before the actual transaction table, and differ
//! in both delimiter and column naming across banks. This parser locates the
//! header row, splits off the preamble for metadata probing, detects the
//! delimiter, maps column aliases and extracts rows - degrading instead of
//! failing at every step.

mod metadata;
mod table;

pub use metadata::extract_metadata;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::statement::{StatementMetadata, TransactionRecord};
use table::{map_columns, sniff_delimiter, split_relaxed, split_rows, ColumnMap};

/// Keywords that must all appear (case-insensitively) in the header row.
const HEADER_KEYWORDS: &[&str] = &["date", "narration", "withdrawal", "deposit", "closing balance"];

/// Result of parsing one statement export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatementParse {
    /// Rows with a valid date and at least one of debit/credit.
    pub transactions: Vec<TransactionRecord>,
    /// Account metadata probed from the preamble, when any was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StatementMetadata>,
}

/// Parse raw CSV bytes into transactions plus optional preamble metadata.
///
/// Never fails: malformed input degrades to an empty transaction list.
pub fn parse_statement(data: &[u8]) -> StatementParse {
    let content = String::from_utf8_lossy(data);
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return StatementParse::default();
    }

    // Locate the first line carrying every expected header marker;
    // everything above it is preamble, everything from it on is the table.
    let header_index = lines.iter().position(|line| {
        let lowered = line.to_lowercase();
        HEADER_KEYWORDS.iter().all(|kw| lowered.contains(kw))
    });

    let (metadata, table_text) = match header_index {
        Some(idx) => {
            debug!(header_index = idx, "located statement header row");
            let preamble = lines[..idx].join("\n");
            let meta = extract_metadata(&preamble);
            (
                (!meta.is_empty()).then_some(meta),
                lines[idx..].join("\n"),
            )
        }
        // No marker line: treat the entire file as the table.
        None => (None, content.to_string()),
    };

    let header_line = header_index.map(|i| lines[i]).unwrap_or(lines[0]);
    let delimiter = sniff_delimiter(&table_text).unwrap_or_else(|| {
        if header_line.contains('\t') { b'\t' } else { b',' }
    });

    let mut rows = split_rows(&table_text, delimiter);
    if rows.len() < 2 {
        warn!("delimited parse yielded no data rows, retrying with relaxed separators");
        rows = split_relaxed(&table_text);
    }
    if rows.len() < 2 {
        return StatementParse {
            transactions: Vec::new(),
            metadata,
        };
    }

    let columns = map_columns(&rows[0]);
    let transactions = rows[1..]
        .iter()
        .filter_map(|row| extract_row(row, &columns))
        .collect();

    StatementParse {
        transactions,
        metadata,
    }
}

/// Pull and coerce one table row into a transaction.
///
/// Returns `None` unless the row has a parsed date AND at least one of
/// debit/credit - the primary noise filter against repeated headers,
/// disclaimers and section breaks embedded in export files.
fn extract_row(row: &[String], columns: &ColumnMap) -> Option<TransactionRecord> {
    let txn_date = cell(row, columns.date).and_then(crate::dates::normalize_date);
    let debit = cell(row, columns.debit).and_then(table::parse_amount);
    let credit = cell(row, columns.credit).and_then(table::parse_amount);

    if txn_date.is_none() || (debit.is_none() && credit.is_none()) {
        return None;
    }

    // No minimum-length floor on the account digits here; that belongs to
    // the field normalizer on the content path.
    let account_number = cell(row, columns.account)
        .map(|s| s.chars().filter(|c| c.is_ascii_digit()).collect::<String>());

    Some(TransactionRecord {
        txn_date,
        description: cell(row, columns.description).map(str::to_string),
        ref_id: cell(row, columns.ref_id).map(str::to_string),
        debit,
        credit,
        balance: cell(row, columns.balance).and_then(table::parse_amount),
        account_number: account_number.filter(|s| !s.is_empty()),
        ..TransactionRecord::default()
    })
}

/// The trimmed, non-empty text of a mapped column, if the row has it.
fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    let text = row.get(idx?)?.trim();
    (!text.is_empty()).then_some(text)
}
