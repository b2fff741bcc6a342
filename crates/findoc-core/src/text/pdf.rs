//! PDF text extraction with a layout-aware primary and a simpler fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::Result;
use crate::error::TextError;

/// Extract the full text of a PDF.
///
/// Tries lopdf first (page-by-page, newline separated); when that yields
/// nothing, falls back to pdf-extract over the same bytes. Both backends
/// failing is a `BackendFailure`.
pub fn extract_pdf_text(data: &[u8]) -> Result<String> {
    let primary_err = match layout_text(data) {
        Ok(text) if !text.trim().is_empty() => return Ok(text),
        Ok(_) => "empty text".to_string(),
        Err(e) => e,
    };

    warn!(error = primary_err.as_str(), "primary PDF backend failed, trying fallback");

    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => Err(TextError::BackendFailure(format!(
            "primary: {primary_err}; fallback: empty text"
        ))),
        Err(e) => Err(TextError::BackendFailure(format!(
            "primary: {primary_err}; fallback: {e}"
        ))),
    }
}

/// Page-by-page extraction via lopdf, pages joined with newlines.
fn layout_text(data: &[u8]) -> std::result::Result<String, String> {
    let doc = Document::load_mem(data).map_err(|e| e.to_string())?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err("no pages".to_string());
    }

    let mut text = String::new();
    for page_num in pages {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) if !page_text.trim().is_empty() => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&page_text);
            }
            Ok(_) => {}
            Err(e) => debug!(page = page_num, error = %e, "page text extraction failed"),
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_both_backends() {
        let err = extract_pdf_text(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, TextError::BackendFailure(_)));
    }

    #[test]
    fn empty_input_is_a_backend_failure() {
        assert!(extract_pdf_text(&[]).is_err());
    }
}
