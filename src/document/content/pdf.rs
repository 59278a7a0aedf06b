//! PDF document content handling.
//!
//! Extraction reads the embedded text layer page by page. Scanned PDFs whose
//! pages carry no text layer produce a distinct error, so callers can point
//! the user at OCR-friendly input instead of reviewing an empty document.

use lopdf::Document as PdfDocument;

use super::super::error::DocumentError;

/// Extracts the embedded text layer of every page, joined with newlines.
///
/// Pages whose text cannot be decoded are skipped with a warning rather than
/// failing the whole document.
///
/// # Errors
///
/// Returns [`DocumentError::PdfLoad`] if the bytes are not a readable PDF,
/// and [`DocumentError::NoPdfTextLayer`] if no page yields any text.
pub fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let document =
        PdfDocument::load_mem(bytes).map_err(|source| DocumentError::PdfLoad { source })?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => {
                let page_text = page_text.trim();
                if !page_text.is_empty() {
                    pages.push(page_text.to_string());
                }
            }
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "Skipping unreadable PDF page");
            }
        }
    }

    let text = pages.join("\n");
    if text.trim().is_empty() {
        return Err(DocumentError::NoPdfTextLayer);
    }

    Ok(text)
}
