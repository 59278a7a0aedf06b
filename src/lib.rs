pub mod chat;
pub mod document;
pub mod generation;
pub mod profile;
pub mod server;
pub mod utils;

pub use chat::{ChatSession, ConversationRouter};
pub use document::{
    detect, extract_text, is_supported, AnalysisResult, DocCategory, DocumentAnalyzer,
    DocumentError, FormatTag, OcrEngine, TesseractOcr,
};
pub use generation::{GenerationClient, GenerationError, OpenAiClient};
pub use profile::{ProfileError, UserProfile};
pub use server::{create_app, start_server};
pub use utils::{AppConfig, ConfigError};
