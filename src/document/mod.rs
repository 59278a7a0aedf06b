pub mod analyzer;
pub mod content;
pub mod detect;
pub mod error;
pub mod ocr;
pub mod validate;

pub use analyzer::{AnalysisResult, DocumentAnalyzer};
pub use content::extract_text;
pub use detect::{detect, FormatTag};
pub use error::DocumentError;
pub use ocr::{OcrEngine, OcrError, TesseractOcr};
pub use validate::{is_supported, DocCategory};
