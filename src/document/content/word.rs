//! Microsoft Word document content handling.
//!
//! Only the modern XML format (`.docx`) is supported; the legacy binary
//! `.doc` format is not.

use docx_rs::DocumentChild;

use super::super::error::DocumentError;

/// Extracts all paragraph text from a `.docx` file, in document order,
/// joined with newlines.
///
/// # Errors
///
/// Returns [`DocumentError::WordLoad`] if the bytes are not a valid `.docx`
/// archive or its document part is malformed.
pub fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::WordLoad {
        message: e.to_string(),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            paragraphs.push(paragraph.raw_text());
        }
    }

    Ok(paragraphs.join("\n"))
}
