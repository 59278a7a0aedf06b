//! Application configuration module.
//!
//! Configuration is loaded from a JSON file at startup and handed down to the
//! components that need it. Nothing in the pipeline reads configuration from
//! ambient process state; the API key is the one exception and is read from
//! the environment in `main` only.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Application configuration structure.
///
/// String fields use `Box<str>` for memory efficiency since they are set once
/// and never modified. Every field has a default, so a partial configuration
/// file only needs to name the settings it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum allowed upload size in bytes.
    pub max_file_size: u64,

    /// Host URL for the server.
    pub host_url: Box<str>,

    /// Generation collaborator settings.
    pub generation: GenerationConfig,

    /// OCR engine settings.
    pub ocr: OcrConfig,

    /// Scholarship feeds polled for chat context.
    pub scholarship_feeds: Vec<FeedConfig>,

    /// Base URL of the university directory service.
    pub university_directory_url: Box<str>,

    /// Path of the append-only profile log. Logging is disabled when unset.
    pub profile_log: Option<Box<str>>,
}

/// Settings for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of the chat-completions API.
    pub base_url: Box<str>,

    /// Model identifier sent with every request.
    pub model: Box<str>,

    /// Sampling temperature for free-form chat replies. Structured tasks
    /// use their own lower temperatures.
    pub temperature: f32,
}

/// Settings for the external OCR binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Name or path of the OCR executable.
    pub binary: Box<str>,

    /// Language pack passed to the recognizer.
    pub language: Box<str>,
}

/// One named scholarship feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Display name shown alongside entries from this feed.
    pub name: Box<str>,

    /// Feed URL.
    pub url: Box<str>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration JSON file
    ///
    /// # Returns
    ///
    /// Returns the parsed `AppConfig` or a `ConfigError` if loading fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Create a new configuration with default values.
    ///
    /// # Returns
    ///
    /// Returns an `AppConfig` with sensible default values.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            max_file_size: 200 * 1024 * 1024, // 200 MiB
            host_url: "127.0.0.1:3000".into(),
            generation: GenerationConfig::default(),
            ocr: OcrConfig::default(),
            scholarship_feeds: vec![
                FeedConfig {
                    name: "ScholarshipsCorner".into(),
                    url: "https://scholarshipscorner.website/feed/".into(),
                },
                FeedConfig {
                    name: "ScholarshipUnion".into(),
                    url: "https://scholarshipunion.com/feed/".into(),
                },
            ],
            university_directory_url: "http://universities.hipolabs.com".into(),
            profile_log: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4-turbo".into(),
            temperature: 0.7,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".into(),
            language: "eng".into(),
        }
    }
}
