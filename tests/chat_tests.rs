mod common;

use std::sync::Arc;

use edubot::chat::scholarships::{items_from_channel, scholarship_context, ScholarshipItem};
use edubot::chat::universities::UniversityRecord;
use edubot::chat::{ChatSession, ConversationRouter};
use edubot::generation::{ChatMessage, GenerationError};
use edubot::profile::InteractionLog;

use common::{
    FailingDirectory, FailingScholarships, FixedDirectory, FixedScholarships, ScriptedClient,
};

fn item(title: &str) -> ScholarshipItem {
    ScholarshipItem {
        source: "TestFeed".to_string(),
        title: title.to_string(),
        link: "https://example.org/post".to_string(),
        published: "Mon, 01 Jun 2026 00:00:00 GMT".to_string(),
        summary: "Fully funded opportunity".to_string(),
    }
}

fn record(name: &str) -> UniversityRecord {
    UniversityRecord {
        name: name.to_string(),
        country: "Germany".to_string(),
        web_pages: vec!["https://example.edu".to_string()],
        domains: vec!["example.edu".to_string()],
        state_province: None,
    }
}

fn router_with(
    client: Arc<ScriptedClient>,
    items: Vec<ScholarshipItem>,
    records: Vec<UniversityRecord>,
) -> ConversationRouter {
    ConversationRouter::new(
        client,
        Arc::new(FixedScholarships(items)),
        Arc::new(FixedDirectory(records)),
        None,
        0.7,
    )
}

// ============================================================================
// Routing Tests
// ============================================================================

#[tokio::test]
async fn test_general_message_uses_consultant_persona() {
    let client = Arc::new(ScriptedClient::with_response("Focus on a clear narrative."));
    let router = router_with(client.clone(), Vec::new(), Vec::new());
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "How do I write a good essay?")
        .await;

    assert_eq!(reply, "Focus on a clear narrative.");
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.history[1].role, "assistant");

    let request = client.last_request();
    assert!(request.messages[0].content.contains("education consultant"));
}

#[tokio::test]
async fn test_profile_message_updates_and_confirms() {
    let client = Arc::new(ScriptedClient::with_response(
        r#"{"degree": "Master's", "country": "Germany"}"#,
    ));
    let router = router_with(client.clone(), Vec::new(), Vec::new());
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "I want a Master's degree in Germany")
        .await;

    assert!(reply.starts_with("Profile updated."), "got: {reply}");
    assert!(reply.contains("degree: Master's"));
    assert_eq!(session.profile.country.as_deref(), Some("Germany"));
    // The extraction call is the only generation call for this turn.
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_out_of_range_gpa_gets_correction_reply() {
    let client = Arc::new(ScriptedClient::with_response(r#"{"gpa": 4.8}"#));
    let router = router_with(client, Vec::new(), Vec::new());
    let mut session = ChatSession::default();

    let reply = router.handle_message(&mut session, "My GPA is 4.8").await;

    assert!(reply.contains("outside the 0.0-4.0 scale"));
    assert_eq!(session.profile.gpa, None);
}

#[tokio::test]
async fn test_profile_branch_falls_through_when_nothing_learned() {
    let client = Arc::new(ScriptedClient::new(vec![
        Ok("{}".to_string()),
        Ok("Pick a field you can argue for.".to_string()),
    ]));
    let router = router_with(client.clone(), Vec::new(), Vec::new());
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "What degree should I choose?")
        .await;

    assert_eq!(reply, "Pick a field you can argue for.");
    assert_eq!(client.request_count(), 2, "extraction call, then consultant call");
}

#[tokio::test]
async fn test_scholarship_context_is_injected() {
    let client = Arc::new(ScriptedClient::with_response(
        "The Fulbright deadline is coming up.",
    ));
    let router = router_with(
        client.clone(),
        vec![item("Fulbright 2027 Applications Open")],
        Vec::new(),
    );
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "Any scholarship deadlines soon?")
        .await;

    assert_eq!(reply, "The Fulbright deadline is coming up.");
    let system = client.last_request().messages[0].content.clone();
    assert!(system.contains("Recent scholarship postings"));
    assert!(system.contains("Fulbright 2027 Applications Open"));
}

#[tokio::test]
async fn test_scholarship_fetch_failure_degrades() {
    let client = Arc::new(ScriptedClient::with_response(
        "I cannot see current postings right now.",
    ));
    let router = ConversationRouter::new(
        client.clone(),
        Arc::new(FailingScholarships),
        Arc::new(FixedDirectory(Vec::new())),
        None,
        0.7,
    );
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "Tell me about scholarship options")
        .await;

    assert_eq!(reply, "I cannot see current postings right now.");
    let system = client.last_request().messages[0].content.clone();
    assert!(system.contains("No recent scholarship feed entries"));
}

#[tokio::test]
async fn test_university_search_requires_profile() {
    let client = Arc::new(ScriptedClient::with_response("unused"));
    let router = router_with(client.clone(), Vec::new(), vec![record("TU Munich")]);
    let mut session = ChatSession::default();

    let reply = router
        .handle_message(&mut session, "find universities for me")
        .await;

    assert!(reply.contains("tell me about your profile first"));
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_university_search_with_known_country() {
    let client = Arc::new(ScriptedClient::with_response("unused"));
    let router = router_with(client.clone(), Vec::new(), vec![record("TU Munich")]);
    let mut session = ChatSession::default();
    session.profile.country = Some("Germany".to_string());

    let reply = router
        .handle_message(&mut session, "please search universities")
        .await;

    assert!(reply.contains("1. **TU Munich**"), "got: {reply}");
    assert!(reply.contains("https://example.edu"));
    assert_eq!(client.request_count(), 0, "directory replies skip generation");
}

#[tokio::test]
async fn test_university_search_with_no_results() {
    let client = Arc::new(ScriptedClient::with_response("unused"));
    let router = router_with(client, Vec::new(), Vec::new());
    let mut session = ChatSession::default();
    session.profile.country = Some("Atlantis".to_string());

    let reply = router.handle_message(&mut session, "search programs").await;

    assert!(reply.contains("No universities found for Atlantis"));
}

#[tokio::test]
async fn test_university_directory_failure_degrades() {
    let client = Arc::new(ScriptedClient::with_response("unused"));
    let router = ConversationRouter::new(
        client,
        Arc::new(FixedScholarships(Vec::new())),
        Arc::new(FailingDirectory),
        None,
        0.7,
    );
    let mut session = ChatSession::default();
    session.profile.country = Some("Germany".to_string());

    let reply = router.handle_message(&mut session, "search programs").await;

    assert!(reply.contains("directory is not reachable"));
}

#[tokio::test]
async fn test_generation_failure_degrades_to_plain_reply() {
    let client = Arc::new(ScriptedClient::new(vec![Err(GenerationError::Api {
        status: 503,
        message: "down".to_string(),
    })]));
    let router = router_with(client, Vec::new(), Vec::new());
    let mut session = ChatSession::default();

    let reply = router.handle_message(&mut session, "Hello there").await;

    assert!(reply.contains("trouble reaching the language model"));
    assert_eq!(session.history.len(), 2, "degraded replies still enter history");
}

#[tokio::test]
async fn test_history_window_is_bounded() {
    let client = Arc::new(ScriptedClient::with_response("ok"));
    let router = router_with(client.clone(), Vec::new(), Vec::new());
    let mut session = ChatSession::default();
    for turn in 0..20 {
        session.history.push(ChatMessage::user(format!("old message {turn}")));
    }

    router.handle_message(&mut session, "tell me more").await;

    let request = client.last_request();
    assert_eq!(request.messages.len(), 9, "one system message plus the window");
    assert_eq!(request.messages[0].role, "system");
}

#[tokio::test]
async fn test_profile_update_appends_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("profiles.jsonl");

    let client = Arc::new(ScriptedClient::with_response(r#"{"country": "Germany"}"#));
    let router = ConversationRouter::new(
        client,
        Arc::new(FixedScholarships(Vec::new())),
        Arc::new(FixedDirectory(Vec::new())),
        Some(InteractionLog::new(&log_path)),
        0.7,
    );
    let mut session = ChatSession::default();

    router
        .handle_message(&mut session, "My target country is Germany")
        .await;

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let entry: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(entry["profile"]["country"], "Germany");
    assert!(entry["timestamp"].is_string());
}

// ============================================================================
// Feed Normalization Tests
// ============================================================================

const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Scholarship Feed</title>
    <link>https://example.org</link>
    <description>Postings</description>
    <item>
      <title>Fulbright 2027 Applications Open</title>
      <link>https://example.org/fulbright</link>
      <description>Fully funded scholarships for international students.</description>
      <pubDate>Mon, 01 Jun 2026 00:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated Posting</title>
      <link>https://example.org/undated</link>
      <description>Second entry</description>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_items_from_channel_normalizes_entries() {
    let channel = rss::Channel::read_from(FEED_XML.as_bytes()).unwrap();
    let items = items_from_channel("TestFeed", &channel);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].source, "TestFeed");
    assert_eq!(items[0].title, "Fulbright 2027 Applications Open");
    assert_eq!(items[0].link, "https://example.org/fulbright");
    assert_eq!(items[0].published, "Mon, 01 Jun 2026 00:00:00 GMT");
    assert_eq!(items[1].published, "N/A", "missing dates are filled in");
}

#[test]
fn test_items_from_channel_caps_entries_per_feed() {
    let mut channel = rss::Channel::read_from(FEED_XML.as_bytes()).unwrap();
    let extra = channel.items()[0].clone();
    let mut items = channel.items().to_vec();
    for _ in 0..6 {
        items.push(extra.clone());
    }
    channel.set_items(items);

    assert_eq!(items_from_channel("TestFeed", &channel).len(), 5);
}

#[test]
fn test_long_summaries_are_truncated() {
    let mut channel = rss::Channel::read_from(FEED_XML.as_bytes()).unwrap();
    let mut items = channel.items().to_vec();
    items[0].set_description("long ".repeat(100));
    channel.set_items(items);

    let normalized = items_from_channel("TestFeed", &channel);
    assert_eq!(normalized[0].summary.chars().count(), 251);
    assert!(normalized[0].summary.ends_with('…'));
}

#[test]
fn test_scholarship_context_renders_numbered_list() {
    let context = scholarship_context(&[item("First"), item("Second")]);

    assert!(context.contains("1. First (TestFeed"));
    assert!(context.contains("2. Second"));
    assert!(context.contains("Link: https://example.org/post"));
}
