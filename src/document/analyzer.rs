//! Document analysis orchestration.
//!
//! [`DocumentAnalyzer`] sequences detection, category validation, text
//! extraction, and the structured review, normalizing every failure mode
//! into one uniform result shape.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::content::extract_text;
use super::detect::detect;
use super::error::DocumentError;
use super::ocr::OcrEngine;
use super::validate::{is_supported, DocCategory};
use crate::generation::tasks::document_review_task::{
    DocumentReviewTask, Issue, ReviewPurpose, ReviewResult,
};
use crate::generation::GenerationClient;

/// Outcome of one document analysis call.
///
/// A failure keeps every content field empty and carries a human-readable
/// `error`; a success fills the content fields and leaves `error` unset.
/// Partial results are never produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The text extracted from the document.
    pub text: String,
    /// Overall assessment from the reviewer.
    pub feedback: String,
    /// Rewritten version of the document.
    pub enhanced_version: String,
    /// Concrete problems found, in reading order.
    pub issues: Vec<Issue>,
    /// Set only when the analysis failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    fn success(text: String, feedback: String, enhanced_version: String, issues: Vec<Issue>) -> Self {
        Self {
            text,
            feedback,
            enhanced_version,
            issues,
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            feedback: String::new(),
            enhanced_version: String::new(),
            issues: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Returns `true` when this result represents a failed analysis.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Top-level entry point for document uploads.
pub struct DocumentAnalyzer {
    review: DocumentReviewTask,
    ocr: Arc<dyn OcrEngine>,
    max_file_size: u64,
}

impl DocumentAnalyzer {
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>, ocr: Arc<dyn OcrEngine>, max_file_size: u64) -> Self {
        Self {
            review: DocumentReviewTask::new(client),
            ocr,
            max_file_size,
        }
    }

    /// Number of review generation calls issued so far.
    #[must_use]
    pub fn review_calls(&self) -> u64 {
        self.review.calls_made()
    }

    /// Analyzes one uploaded document.
    ///
    /// Runs detection, validation, extraction, and review in order,
    /// short-circuiting on the first failure. Never panics: any stage
    /// failure produces a result whose `error` describes the problem in
    /// plain language while every content field stays empty.
    pub async fn analyze(
        &self,
        bytes: &[u8],
        filename: &str,
        category: &str,
        purpose: Option<&str>,
        extra_context: Option<&str>,
    ) -> AnalysisResult {
        match self.run(bytes, filename, category, purpose, extra_context).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(filename, error = %e, "Document analysis failed");
                AnalysisResult::failure(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        bytes: &[u8],
        filename: &str,
        category: &str,
        purpose: Option<&str>,
        extra_context: Option<&str>,
    ) -> Result<AnalysisResult, DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::EmptyFile);
        }
        if bytes.len() as u64 > self.max_file_size {
            return Err(DocumentError::FileTooLarge {
                size: bytes.len() as u64,
                limit: self.max_file_size,
            });
        }

        let category = DocCategory::parse(category).ok_or_else(|| DocumentError::UnknownCategory {
            category: category.to_string(),
        })?;

        let format = detect(bytes, filename);
        tracing::debug!(%format, %category, filename, "Detected upload format");

        if !is_supported(format, category) {
            let accepted = category
                .accepted_formats()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(DocumentError::UnsupportedFormat {
                format,
                category,
                accepted,
            });
        }

        let text = extract_text(bytes, format, self.ocr.as_ref())?;
        if text.is_empty() {
            return Err(DocumentError::EmptyText);
        }

        let purpose = purpose.and_then(|raw| {
            let parsed = ReviewPurpose::parse(raw);
            if parsed.is_none() {
                tracing::debug!(purpose = raw, "Ignoring unrecognized review purpose");
            }
            parsed
        });

        let ReviewResult {
            feedback,
            enhanced_version,
            issues,
            error,
        } = self.review.review(&text, category, purpose, extra_context).await;

        if let Some(message) = error {
            return Err(DocumentError::Review { message });
        }

        Ok(AnalysisResult::success(text, feedback, enhanced_version, issues))
    }
}
