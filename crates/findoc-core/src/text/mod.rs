//! Text extraction from the supported file formats.

mod pdf;
mod table;

pub use table::render_table;

use serde::{Deserialize, Serialize};

use crate::error::TextError;

/// Supported document container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    Csv,
    Spreadsheet,
}

impl FileKind {
    /// Map a declared file extension (with or without the leading dot,
    /// any case) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Result type for text extraction.
pub type Result<T> = std::result::Result<T, TextError>;

/// Convert raw file bytes into a single text blob.
///
/// Pure transform: no side effects, nothing cached. Tabular formats are
/// rendered as a whitespace-aligned table so the downstream content parser
/// sees rows and columns the way a human would.
pub fn extract_text(data: &[u8], kind: FileKind) -> Result<String> {
    match kind {
        FileKind::Pdf => pdf::extract_pdf_text(data),
        FileKind::Csv => table::render_csv(data),
        FileKind::Spreadsheet => table::render_spreadsheet(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extension_routing() {
        assert_eq!(FileKind::from_extension(".pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_extension("PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_extension("csv"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_extension(".xlsx"), Some(FileKind::Spreadsheet));
        assert_eq!(FileKind::from_extension("xls"), Some(FileKind::Spreadsheet));
        assert_eq!(FileKind::from_extension("docx"), None);
        assert_eq!(FileKind::from_extension(""), None);
    }
}
