use thiserror::Error;

use super::detect::FormatTag;
use super::ocr::OcrError;
use super::validate::DocCategory;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Empty file provided")]
    EmptyFile,

    #[error("File size of {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unknown document category: {category}")]
    UnknownCategory { category: String },

    #[error("Unsupported file type '{format}' for category '{category}' (accepted: {accepted})")]
    UnsupportedFormat {
        format: FormatTag,
        category: DocCategory,
        accepted: String,
    },

    #[error("No extractable text found in PDF (likely a scanned PDF without a text layer)")]
    NoPdfTextLayer,

    #[error("Failed to load PDF content")]
    PdfLoad {
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to load Word document content")]
    WordLoad { message: String },

    #[error("Invalid image data; unable to decode image for text recognition")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    #[error("Text recognition failed")]
    Ocr {
        #[from]
        source: OcrError,
    },

    #[error("No extraction strategy for file type: {format}")]
    NoExtractor { format: FormatTag },

    #[error("No reviewable text could be extracted from the document")]
    EmptyText,

    #[error("Review failed: {message}")]
    Review { message: String },
}
