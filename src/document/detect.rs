//! File type detection from raw content.
//!
//! Uploaded filenames are unreliable input: users rename files, and a
//! `.pdf`-named upload is no guarantee the bytes are a PDF. Detection
//! therefore inspects the content's magic signature first and only falls back
//! to the filename extension when the signature is unrecognized. This keeps
//! garbage out of the format-specific extractors, which would otherwise fail
//! confusingly deep inside a parser.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// PDF file header.
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local-file header; modern Word documents are ZIP archives.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
/// PNG file signature.
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// JPEG start-of-image marker.
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Normalized content type of an uploaded file.
///
/// This enum is the single source of truth for the accepted format set:
/// detection, category validation, and extraction dispatch all match on it
/// exhaustively, so the three can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    /// Portable Document Format file (`.pdf`).
    Pdf,
    /// Microsoft Word document, modern XML format (`.docx`).
    Docx,
    /// Plain text file (`.txt`).
    Txt,
    /// JPEG image file (`.jpg`, `.jpeg`).
    Jpg,
    /// PNG image file (`.png`).
    Png,
    /// Unrecognized content.
    Unknown,
}

impl FormatTag {
    /// Creates a `FormatTag` from a file extension string.
    ///
    /// # Arguments
    ///
    /// * `ext` - The file extension without the leading dot (e.g., "pdf", "docx").
    ///
    /// # Returns
    ///
    /// `Some(FormatTag)` if the extension is recognized, `None` otherwise.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::supported_extensions()
            .into_iter()
            .find(|(supported_ext, _)| supported_ext.eq_ignore_ascii_case(ext))
            .map(|(_, tag)| tag)
    }

    /// Returns all recognized file extensions with their corresponding tags.
    ///
    /// This includes aliases (both "jpg" and "jpeg" map to the JPEG tag).
    #[must_use]
    pub fn supported_extensions() -> Vec<(&'static str, FormatTag)> {
        vec![
            ("pdf", FormatTag::Pdf),
            ("docx", FormatTag::Docx),
            ("txt", FormatTag::Txt),
            ("jpg", FormatTag::Jpg),
            ("jpeg", FormatTag::Jpg),
            ("png", FormatTag::Png),
        ]
    }

    /// Returns the canonical short code for this tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Docx => "docx",
            FormatTag::Txt => "txt",
            FormatTag::Jpg => "jpg",
            FormatTag::Png => "png",
            FormatTag::Unknown => "unknown",
        }
    }

    /// Identifies the tag from the content's magic signature.
    ///
    /// Plain text has no signature, so `Txt` is never produced here; it is
    /// only ever reached through the extension fallback.
    fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(FormatTag::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Some(FormatTag::Docx)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(FormatTag::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(FormatTag::Jpg)
        } else {
            None
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the content type of an uploaded file.
///
/// The magic signature is authoritative over the filename. When the signature
/// is unrecognized, the filename extension (lower-cased, `jpeg` normalized to
/// `jpg`) decides; when that too is unusable, the result is
/// [`FormatTag::Unknown`]. This function never fails.
///
/// # Arguments
///
/// * `bytes` - The raw bytes of the uploaded file.
/// * `filename` - The declared filename, used only as a fallback.
#[must_use]
pub fn detect(bytes: &[u8], filename: &str) -> FormatTag {
    if let Some(tag) = FormatTag::from_magic(bytes) {
        return tag;
    }

    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FormatTag::from_extension)
        .unwrap_or(FormatTag::Unknown)
}
