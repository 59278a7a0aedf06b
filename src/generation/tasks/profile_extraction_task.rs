use std::sync::Arc;

use super::extract_json_object;
use crate::generation::client::{ChatMessage, GenerationClient, GenerationRequest};
use crate::profile::{ProfileError, ProfileUpdate, UserProfile};

/// Deterministic output parses more reliably.
const EXTRACTION_TEMPERATURE: f32 = 0.0;

pub struct ProfileExtractionTask {
    client: Arc<dyn GenerationClient>,
}

impl ProfileExtractionTask {
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Extracts profile fields from `message` and merges them into `profile`.
    ///
    /// Malformed or unreachable collaborator output means nothing was
    /// learned this turn and leaves the profile unchanged; an out-of-range
    /// GPA is a validation error.
    pub async fn extract_and_merge(
        &self,
        message: &str,
        profile: &UserProfile,
    ) -> Result<UserProfile, ProfileError> {
        let update = self.extract(message).await;
        profile.merged_with(&update)
    }

    /// Extracts whichever profile fields the model confidently identifies.
    pub async fn extract(&self, message: &str) -> ProfileUpdate {
        if message.trim().is_empty() {
            return ProfileUpdate::default();
        }

        let request = GenerationRequest::new(
            vec![
                ChatMessage::system(Self::build_system_message()),
                ChatMessage::user(message),
            ],
            EXTRACTION_TEMPERATURE,
        );

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Profile extraction call failed");
                return ProfileUpdate::default();
            }
        };

        match Self::parse_response(&response) {
            Some(update) => update,
            None => {
                tracing::debug!("Profile extraction produced no parseable fields");
                ProfileUpdate::default()
            }
        }
    }

    fn build_system_message() -> String {
        r#"You are a profile data extractor for a study-abroad assistant. Extract profile fields from the user's message.

Recognized fields:
- "degree": intended degree level ("Bachelor's", "Master's", "PhD", or another short label)
- "field_of_study": subject or major
- "country": destination country
- "gpa": grade point average on a 0.0-4.0 scale
- "budget": yearly budget in USD
- "target_year": intended start year

STRICT RULES:
1. Include ONLY fields the message states explicitly - NEVER guess or invent values
2. Omit a field entirely when the message does not mention it - never use null
3. Numbers must be plain JSON numbers, not strings
4. Return ONLY a valid JSON object using the recognized field names

Example: "I want a Master's in AI in Germany, GPA 3.6" → {"degree": "Master's", "field_of_study": "AI", "country": "Germany", "gpa": 3.6}"#
            .to_string()
    }

    /// Parses a raw model response into a [`ProfileUpdate`].
    ///
    /// Returns `None` when the response contains no parseable JSON object;
    /// individual fields with unusable values are skipped with a warning.
    #[must_use]
    pub fn parse_response(response: &str) -> Option<ProfileUpdate> {
        let json_str = extract_json_object(response)?;

        let value: serde_json::Value = match serde_json::from_str(json_str) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse profile extraction JSON");
                return None;
            }
        };

        Some(ProfileUpdate::from_json_value(&value))
    }
}
