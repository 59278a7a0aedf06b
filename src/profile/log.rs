//! Append-only record of profile snapshots.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use super::UserProfile;

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    profile: &'a UserProfile,
}

/// Writes one timestamped JSON line per successful profile merge.
///
/// Logging is best effort; the caller decides whether a failed append is
/// worth more than a warning.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

impl InteractionLog {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Appends a timestamped snapshot of `profile`.
    pub fn append(&self, profile: &UserProfile) -> std::io::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            profile,
        };
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
