//! Optical character recognition boundary.
//!
//! Image uploads are recognized through an [`OcrEngine`] implementation
//! chosen at construction time. The default engine shells out to the
//! `tesseract` binary, so the server links no native OCR library and tests
//! can substitute a scripted engine.

use std::io::ErrorKind;
use std::process::Command;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    #[error("Failed to prepare image for recognition")]
    ImagePrep {
        #[source]
        source: std::io::Error,
    },

    #[error("Text recognition failed: {message}")]
    RecognitionFailed { message: String },
}

/// Text recognizer for decoded images.
pub trait OcrEngine: Send + Sync {
    /// Recognizes the text visible in `image`.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// OCR engine backed by the `tesseract` command-line binary.
///
/// The image is written to a temporary PNG and the binary is invoked with
/// `stdout` as its output target, so no intermediate files survive the call.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    #[must_use]
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let workdir = tempfile::tempdir().map_err(|source| OcrError::ImagePrep { source })?;
        let input_path = workdir.path().join("page.png");

        image
            .save_with_format(&input_path, ImageFormat::Png)
            .map_err(|e| OcrError::ImagePrep {
                source: std::io::Error::other(e),
            })?;

        let output = Command::new(&self.binary)
            .arg(&input_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Err(e) if e.kind() == ErrorKind::NotFound => Err(OcrError::EngineUnavailable {
                reason: format!("`{}` was not found on PATH", self.binary),
            }),
            Err(e) => Err(OcrError::RecognitionFailed {
                message: e.to_string(),
            }),
            Ok(out) if !out.status.success() => Err(OcrError::RecognitionFailed {
                message: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            }),
            Ok(out) => Ok(String::from_utf8_lossy(&out.stdout).into_owned()),
        }
    }
}
