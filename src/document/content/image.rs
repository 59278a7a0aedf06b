//! Image document content handling.
//!
//! Images carry no text layer, so extraction decodes the bytes and hands the
//! result to the configured OCR engine.

use super::super::error::DocumentError;
use super::super::ocr::OcrEngine;

/// Decodes an image and recognizes its text with `ocr`.
///
/// # Errors
///
/// Returns [`DocumentError::ImageDecode`] for corrupt or truncated image
/// bytes, before any recognition is attempted, and [`DocumentError::Ocr`]
/// when recognition itself fails.
pub fn extract(bytes: &[u8], ocr: &dyn OcrEngine) -> Result<String, DocumentError> {
    let decoded = ::image::load_from_memory(bytes)
        .map_err(|source| DocumentError::ImageDecode { source })?;

    let text = ocr.recognize(&decoded)?;
    Ok(text)
}
