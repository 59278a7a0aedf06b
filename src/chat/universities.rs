//! University directory lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on candidates returned from a search.
const RESULT_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory request failed")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

/// One university entry from the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityRecord {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub web_pages: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(
        default,
        rename = "state-province",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_province: Option<String>,
}

/// Searchable directory of universities.
#[async_trait]
pub trait UniversityDirectory: Send + Sync {
    /// Looks up universities by country, optionally narrowed by a name
    /// fragment.
    async fn search(
        &self,
        country: &str,
        name: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, DirectoryError>;
}

/// Client for a Hipolabs-style university search API.
pub struct HipolabsDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl HipolabsDirectory {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UniversityDirectory for HipolabsDirectory {
    async fn search(
        &self,
        country: &str,
        name: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, DirectoryError> {
        let url = format!("{}/search", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("country", country)];
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            query.push(("name", name));
        }

        let records: Vec<UniversityRecord> = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(records.into_iter().take(RESULT_LIMIT).collect())
    }
}
