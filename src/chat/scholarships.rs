//! Scholarship feed aggregation.
//!
//! Feeds are an external, read-only data source. Entries are normalized into
//! [`ScholarshipItem`]s and folded into generation prompts as grounding
//! context; the review and profile pipelines never depend on them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::config::FeedConfig;
use crate::utils::text::truncate_with_ellipsis;

/// Entries taken from the top of each feed.
const ENTRIES_PER_FEED: usize = 5;
/// Character bound for entry summaries.
const SUMMARY_BUDGET: usize = 250;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Failed to parse feed")]
    Parse {
        #[from]
        source: rss::Error,
    },
}

/// One normalized scholarship posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipItem {
    /// Display name of the feed the entry came from.
    pub source: String,
    pub title: String,
    pub link: String,
    /// Publication date string, `"N/A"` when the feed omits it.
    pub published: String,
    /// Entry summary, bounded to roughly 250 characters.
    pub summary: String,
}

/// Read-only source of recent scholarship postings.
#[async_trait]
pub trait ScholarshipSource: Send + Sync {
    async fn fetch_recent(&self) -> Result<Vec<ScholarshipItem>, FeedError>;
}

/// Aggregator over the configured RSS feeds.
pub struct RssFeedSource {
    http: reqwest::Client,
    feeds: Vec<FeedConfig>,
}

impl RssFeedSource {
    #[must_use]
    pub fn new(feeds: Vec<FeedConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            feeds,
        }
    }

    async fn fetch_feed(&self, feed: &FeedConfig) -> Result<rss::Channel, FeedError> {
        let body = self
            .http
            .get(feed.url.as_ref())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = rss::Channel::read_from(&body[..])?;
        Ok(channel)
    }
}

#[async_trait]
impl ScholarshipSource for RssFeedSource {
    /// Collects the top entries of every configured feed.
    ///
    /// Aggregation is best effort: a feed that cannot be fetched or parsed
    /// is skipped with a warning, and whatever the remaining feeds yielded
    /// is returned.
    async fn fetch_recent(&self) -> Result<Vec<ScholarshipItem>, FeedError> {
        let mut items = Vec::new();
        for feed in &self.feeds {
            match self.fetch_feed(feed).await {
                Ok(channel) => items.extend(items_from_channel(&feed.name, &channel)),
                Err(e) => {
                    tracing::warn!(feed = %feed.name, error = %e, "Skipping unreachable scholarship feed");
                }
            }
        }
        Ok(items)
    }
}

/// Normalizes the top entries of a parsed feed.
#[must_use]
pub fn items_from_channel(source: &str, channel: &rss::Channel) -> Vec<ScholarshipItem> {
    channel
        .items()
        .iter()
        .take(ENTRIES_PER_FEED)
        .map(|item| ScholarshipItem {
            source: source.to_string(),
            title: item.title().unwrap_or("Untitled").to_string(),
            link: item.link().unwrap_or_default().to_string(),
            published: item.pub_date().unwrap_or("N/A").to_string(),
            summary: truncate_with_ellipsis(item.description().unwrap_or_default(), SUMMARY_BUDGET),
        })
        .collect()
}

/// Renders items as a context block for generation prompts.
#[must_use]
pub fn scholarship_context(items: &[ScholarshipItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            format!(
                "{}. {} ({}, published {})\n   {}\n   Link: {}",
                idx + 1,
                item.title,
                item.source,
                item.published,
                item.summary,
                item.link
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
