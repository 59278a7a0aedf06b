//! Per-format text extraction strategies.
//!
//! Each supported format has one extraction function; the dispatch below is
//! the single place a format tag is mapped to a strategy. The match is
//! exhaustive over [`FormatTag`], so a new format cannot be added without
//! deciding its extraction path.

mod image;
mod pdf;
mod text;
mod word;

use super::detect::FormatTag;
use super::error::DocumentError;
use super::ocr::OcrEngine;

/// Extracts plain text from `bytes` according to the detected format.
///
/// The returned text is stripped of leading and trailing whitespace. An
/// empty result is returned as-is; deciding whether empty text is acceptable
/// is the caller's concern.
///
/// # Errors
///
/// Propagates the per-format errors, and returns
/// [`DocumentError::NoExtractor`] when `format` is
/// [`FormatTag::Unknown`].
pub fn extract_text(
    bytes: &[u8],
    format: FormatTag,
    ocr: &dyn OcrEngine,
) -> Result<String, DocumentError> {
    let extracted = match format {
        FormatTag::Pdf => pdf::extract(bytes)?,
        FormatTag::Docx => word::extract(bytes)?,
        FormatTag::Txt => text::extract(bytes),
        FormatTag::Jpg | FormatTag::Png => image::extract(bytes, ocr)?,
        FormatTag::Unknown => return Err(DocumentError::NoExtractor { format }),
    };

    Ok(extracted.trim().to_string())
}
