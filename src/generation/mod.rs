pub mod client;
pub mod error;
pub mod tasks;

pub use client::{ChatMessage, GenerationClient, GenerationRequest, OpenAiClient};
pub use error::GenerationError;
