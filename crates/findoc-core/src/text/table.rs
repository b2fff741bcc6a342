//! Rendering of tabular formats as whitespace-aligned text.
//!
//! The generic content path feeds CSV and spreadsheet files to the same
//! text-based extractors as PDFs, so both are flattened into a plain
//! column-aligned table (no index column).

use calamine::Reader;
use std::io::Cursor;

use super::Result;
use crate::error::TextError;

/// Render CSV bytes as an aligned text table.
pub fn render_csv(data: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TextError::BackendFailure(e.to_string()))?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }

    if rows.is_empty() {
        return Err(TextError::BackendFailure("empty CSV".to_string()));
    }

    Ok(render_table(&rows))
}

/// Render the first worksheet of a spreadsheet as an aligned text table.
pub fn render_spreadsheet(data: &[u8]) -> Result<String> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(data.to_vec()))
        .map_err(|e| TextError::BackendFailure(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TextError::BackendFailure("workbook has no sheets".to_string()))?
        .map_err(|e| TextError::BackendFailure(e.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .collect();

    if rows.is_empty() {
        return Err(TextError::BackendFailure("empty worksheet".to_string()));
    }

    Ok(render_table(&rows))
}

/// Align rows into fixed-width columns, two spaces between columns.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            // Pad all but the last column to keep lines trim-clean.
            if i + 1 < columns {
                for _ in cell.chars().count()..*width {
                    line.push(' ');
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn csv_renders_aligned_columns() {
        let text = render_csv(b"Date,Amount\n01/01/2024,100.00\n02/01/2024,5.00\n").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date        Amount");
        assert_eq!(lines[1], "01/01/2024  100.00");
        assert_eq!(lines[2], "02/01/2024  5.00");
    }

    #[test]
    fn no_index_column_is_added() {
        let text = render_csv(b"A,B\n1,2\n").unwrap();
        assert!(text.lines().all(|l| !l.starts_with('0')));
        assert!(text.starts_with('A'));
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let text = render_csv(b"A,B,C\n1,2\n").unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn empty_csv_is_an_error() {
        assert!(render_csv(b"").is_err());
    }

    #[test]
    fn garbage_spreadsheet_is_an_error() {
        assert!(render_spreadsheet(b"definitely not a workbook").is_err());
    }
}
