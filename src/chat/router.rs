//! Conversation routing.
//!
//! Each chat turn is dispatched by cheap keyword checks, in a fixed order:
//! profile capture, then scholarship questions, then university search, then
//! a general consultant reply. Profile capture that learns nothing falls
//! through to the remaining branches, so a message is never swallowed by a
//! failed extraction.

use std::sync::Arc;

use crate::generation::client::{ChatMessage, GenerationClient, GenerationRequest};
use crate::generation::tasks::profile_extraction_task::ProfileExtractionTask;
use crate::profile::{InteractionLog, ProfileError, UserProfile};

use super::scholarships::{scholarship_context, ScholarshipSource};
use super::universities::{UniversityDirectory, UniversityRecord};

/// Words that suggest a message carries profile details.
const PROFILE_KEYWORDS: &[&str] = &[
    "degree",
    "bachelor",
    "master",
    "phd",
    "field of study",
    "major",
    "country",
    "gpa",
    "budget",
];

/// Prior turns folded into a generation call.
const HISTORY_WINDOW: usize = 8;

/// Directory hits shown in a reply.
const UNIVERSITY_DISPLAY_LIMIT: usize = 3;

/// Persona for general and scholarship replies.
const CONSULTANT_PROMPT: &str = "You are an education consultant helping prospective students \
    with universities, scholarships, and application planning. Answer concisely and concretely.";

/// Per-session conversation state.
///
/// Sessions are owned by their registry entry and never shared across
/// session ids, so one user's profile cannot leak into another's replies.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub profile: UserProfile,
    pub history: Vec<ChatMessage>,
}

/// Dispatches chat messages to the matching handler.
pub struct ConversationRouter {
    client: Arc<dyn GenerationClient>,
    profile_task: ProfileExtractionTask,
    scholarships: Arc<dyn ScholarshipSource>,
    universities: Arc<dyn UniversityDirectory>,
    interaction_log: Option<InteractionLog>,
    temperature: f32,
}

impl ConversationRouter {
    #[must_use]
    pub fn new(
        client: Arc<dyn GenerationClient>,
        scholarships: Arc<dyn ScholarshipSource>,
        universities: Arc<dyn UniversityDirectory>,
        interaction_log: Option<InteractionLog>,
        temperature: f32,
    ) -> Self {
        Self {
            profile_task: ProfileExtractionTask::new(Arc::clone(&client)),
            client,
            scholarships,
            universities,
            interaction_log,
            temperature,
        }
    }

    /// Handles one chat turn, updating `session` in place.
    ///
    /// Every branch degrades to a readable reply when a collaborator fails;
    /// a chat turn never returns an error.
    pub async fn handle_message(&self, session: &mut ChatSession, message: &str) -> String {
        session.history.push(ChatMessage::user(message));
        let reply = self.route(session, message).await;
        session.history.push(ChatMessage::assistant(reply.as_str()));
        reply
    }

    async fn route(&self, session: &mut ChatSession, message: &str) -> String {
        let lowered = message.to_lowercase();

        if mentions_profile_field(&lowered) {
            if let Some(reply) = self.update_profile(session, message).await {
                return reply;
            }
        }

        if lowered.contains("scholarship") {
            return self.scholarship_reply(session).await;
        }

        if lowered.contains("find") || lowered.contains("search") {
            return self.university_reply(session).await;
        }

        self.general_reply(session).await
    }

    /// Runs profile extraction over the message.
    ///
    /// Returns `None` when the message taught us nothing, so the turn falls
    /// through to the conversational branches.
    async fn update_profile(&self, session: &mut ChatSession, message: &str) -> Option<String> {
        match self
            .profile_task
            .extract_and_merge(message, &session.profile)
            .await
        {
            Ok(updated) => {
                if updated == session.profile {
                    tracing::debug!("No new profile fields in message");
                    return None;
                }
                session.profile = updated;
                if let Some(log) = &self.interaction_log {
                    if let Err(e) = log.append(&session.profile) {
                        tracing::warn!(error = %e, "Failed to append profile snapshot");
                    }
                }
                Some(format!(
                    "Profile updated. Known so far: {}.",
                    session.profile.summary()
                ))
            }
            Err(ProfileError::GpaOutOfRange { value }) => Some(format!(
                "The GPA I read ({value}) falls outside the 0.0-4.0 scale, so I have not saved \
                 it. If your school grades on a different scale, please share the converted value."
            )),
        }
    }

    async fn scholarship_reply(&self, session: &ChatSession) -> String {
        let items = match self.scholarships.fetch_recent().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Scholarship feed fetch failed");
                Vec::new()
            }
        };

        let mut system = String::from(CONSULTANT_PROMPT);
        if items.is_empty() {
            system.push_str(
                "\n\nNo recent scholarship feed entries are available right now; say so if the \
                 user asks about specific current postings.",
            );
        } else {
            system.push_str("\n\nRecent scholarship postings, for grounding:\n");
            system.push_str(&scholarship_context(&items));
        }

        self.generate(session, system).await
    }

    async fn university_reply(&self, session: &ChatSession) -> String {
        let Some(country) = session.profile.country.as_deref() else {
            return "Please tell me about your profile first (degree, country, and so on) so I \
                    can search in the right place."
                .to_string();
        };

        let results = match self.universities.search(country, None).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "University directory lookup failed");
                return "The university directory is not reachable right now. Please try again \
                        in a moment."
                    .to_string();
            }
        };

        if results.is_empty() {
            return format!("No universities found for {country}. Try a different country name.");
        }

        format_university_results(&results)
    }

    async fn general_reply(&self, session: &ChatSession) -> String {
        self.generate(session, CONSULTANT_PROMPT.to_string()).await
    }

    /// Completes against the recent history with the given system prompt.
    async fn generate(&self, session: &ChatSession, system: String) -> String {
        let recent = session
            .history
            .iter()
            .rev()
            .take(HISTORY_WINDOW)
            .rev()
            .cloned();
        let mut messages = vec![ChatMessage::system(system)];
        messages.extend(recent);

        let request = GenerationRequest::new(messages, self.temperature);
        match self.client.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Chat generation call failed");
                "I am having trouble reaching the language model right now. Please try again in \
                 a moment."
                    .to_string()
            }
        }
    }
}

fn mentions_profile_field(lowered: &str) -> bool {
    PROFILE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Renders directory hits as a numbered markdown list.
#[must_use]
pub fn format_university_results(results: &[UniversityRecord]) -> String {
    results
        .iter()
        .take(UNIVERSITY_DISPLAY_LIMIT)
        .enumerate()
        .map(|(idx, record)| {
            let mut entry = format!("{}. **{}**", idx + 1, record.name);
            match &record.state_province {
                Some(state) => entry.push_str(&format!("\n   - {state}, {}", record.country)),
                None if !record.country.is_empty() => {
                    entry.push_str(&format!("\n   - {}", record.country));
                }
                None => {}
            }
            if let Some(page) = record.web_pages.first() {
                entry.push_str(&format!("\n   - [Link]({page})"));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
