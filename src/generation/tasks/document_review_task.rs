use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::extract_json_object;
use crate::document::validate::DocCategory;
use crate::generation::client::{ChatMessage, GenerationClient, GenerationRequest};
use crate::utils::text::truncate_with_ellipsis;

/// Character budget for documents read holistically (cv, sop, letters).
const HOLISTIC_TEXT_BUDGET: usize = 12_000;
/// Character budget for transcripts, which are skimmed for structure.
const TRANSCRIPT_TEXT_BUDGET: usize = 6_000;
/// Upper bound for each issue field.
const ISSUE_FIELD_BUDGET: usize = 300;
/// Low temperature keeps the output parseable.
const REVIEW_TEMPERATURE: f32 = 0.2;

/// Audience a document is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewPurpose {
    MastersAdmission,
    PhdAdmission,
    JobApplication,
    ProfessorEmail,
}

impl ReviewPurpose {
    /// Parses a stated purpose, tolerating common phrasings. Returns `None`
    /// for anything outside the known set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "master's admission" | "masters admission" | "master admission" => {
                Some(ReviewPurpose::MastersAdmission)
            }
            "phd admission" | "ph.d. admission" => Some(ReviewPurpose::PhdAdmission),
            "job application" => Some(ReviewPurpose::JobApplication),
            "email to professor" | "email to a professor" | "professor email" => {
                Some(ReviewPurpose::ProfessorEmail)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewPurpose::MastersAdmission => "Master's admission",
            ReviewPurpose::PhdAdmission => "PhD admission",
            ReviewPurpose::JobApplication => "job application",
            ReviewPurpose::ProfessorEmail => "email to a professor",
        }
    }

    fn emphasis(&self) -> &'static str {
        match self {
            ReviewPurpose::MastersAdmission => {
                "Emphasize academic preparation, clarity of goals, and fit with the target program."
            }
            ReviewPurpose::PhdAdmission => {
                "Emphasize research readiness, prior research experience, and advisor fit."
            }
            ReviewPurpose::JobApplication => {
                "Emphasize quantified impact, relevant skills, and keyword alignment with job descriptions."
            }
            ReviewPurpose::ProfessorEmail => {
                "Emphasize brevity, one clear specific request, and a respectful professional tone."
            }
        }
    }
}

/// One concrete problem found in the reviewed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub suggested_fix: String,
}

/// Review output.
///
/// `error` is set only when the call itself violated the contract (empty
/// input text). Collaborator failures never set it; they degrade into
/// explanatory `feedback` with the other fields empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewResult {
    pub feedback: String,
    pub enhanced_version: String,
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewResult {
    fn degraded(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    enhanced_version: String,
    #[serde(default)]
    issues: Vec<Issue>,
}

pub struct DocumentReviewTask {
    client: Arc<dyn GenerationClient>,
    calls: AtomicU64,
}

impl DocumentReviewTask {
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            calls: AtomicU64::new(0),
        }
    }

    /// Total generation calls issued by this task.
    #[must_use]
    pub fn calls_made(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Requests a structured critique of `text`.
    ///
    /// Exactly one generation call per invocation; retries are the caller's
    /// policy decision. Malformed or unreachable collaborator output
    /// degrades into explanatory feedback rather than an error.
    pub async fn review(
        &self,
        text: &str,
        category: DocCategory,
        purpose: Option<ReviewPurpose>,
        extra_context: Option<&str>,
    ) -> ReviewResult {
        if text.trim().is_empty() {
            return ReviewResult::failed("No document text was provided for review");
        }

        let trimmed = truncate_with_ellipsis(text, Self::text_budget(category));
        let request = GenerationRequest::new(
            vec![
                ChatMessage::system(Self::build_system_message(category, purpose)),
                ChatMessage::user(Self::build_user_message(&trimmed, extra_context)),
            ],
            REVIEW_TEMPERATURE,
        );

        self.calls.fetch_add(1, Ordering::Relaxed);

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Review generation call failed");
                return ReviewResult::degraded(format!(
                    "The review service could not be reached ({e}). Please try again later."
                ));
            }
        };

        match Self::parse_response(&response) {
            Some(review) => review,
            None => {
                tracing::warn!("Review response was not valid structured output");
                ReviewResult::degraded(
                    "The review service returned output that could not be parsed into \
                     structured feedback. Please try again.",
                )
            }
        }
    }

    fn text_budget(category: DocCategory) -> usize {
        match category {
            DocCategory::Transcript => TRANSCRIPT_TEXT_BUDGET,
            DocCategory::Cv | DocCategory::Sop | DocCategory::MotivationLetter => {
                HOLISTIC_TEXT_BUDGET
            }
        }
    }

    fn build_system_message(category: DocCategory, purpose: Option<ReviewPurpose>) -> String {
        let mut message = format!(
            r#"You are an experienced admissions and career consultant reviewing a {category} for a prospective student.

STRICT RULES:
1. Base every remark on the document text provided by the user
2. NEVER invent achievements, grades, or experiences that are not in the text
3. Quote excerpts exactly as they appear in the document
4. Keep feedback specific and actionable
5. Return ONLY valid JSON matching the shape below, with no commentary around it

Output ONLY a valid JSON object of this exact shape:
{{"feedback": "overall assessment", "enhanced_version": "improved rewrite of the document", "issues": [{{"excerpt": "quoted text", "problem": "what is wrong", "suggested_fix": "how to fix it"}}]}}"#
        );

        if let Some(purpose) = purpose {
            message.push_str(&format!(
                "\n\nThe document is intended for: {}. {}",
                purpose.as_str(),
                purpose.emphasis()
            ));
        }

        message
    }

    fn build_user_message(text: &str, extra_context: Option<&str>) -> String {
        match extra_context {
            Some(context) if !context.trim().is_empty() => {
                format!("Additional context from the applicant: {context}\n\nDocument text:\n{text}")
            }
            _ => format!("Document text:\n{text}"),
        }
    }

    /// Parses a raw model response into a [`ReviewResult`].
    ///
    /// Returns `None` when the response contains no parseable JSON object of
    /// the expected shape.
    #[must_use]
    pub fn parse_response(response: &str) -> Option<ReviewResult> {
        let json_str = extract_json_object(response)?;

        let raw: RawReview = match serde_json::from_str(json_str) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse review JSON");
                return None;
            }
        };

        let issues = raw
            .issues
            .into_iter()
            .map(|issue| Issue {
                excerpt: truncate_with_ellipsis(&issue.excerpt, ISSUE_FIELD_BUDGET),
                problem: truncate_with_ellipsis(&issue.problem, ISSUE_FIELD_BUDGET),
                suggested_fix: truncate_with_ellipsis(&issue.suggested_fix, ISSUE_FIELD_BUDGET),
            })
            .collect();

        Some(ReviewResult {
            feedback: raw.feedback,
            enhanced_version: raw.enhanced_version,
            issues,
            error: None,
        })
    }
}
