use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One commit in a comparison. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<CommitAuthor>,
    sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CommitRecord {
    pub fn new(sha: impl Into<String>, author: Option<CommitAuthor>, message: Option<String>) -> Self {
        Self {
            author,
            sha: sha.into(),
            message,
        }
    }

    pub fn author(&self) -> Option<&CommitAuthor> {
        self.author.as_ref()
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Abbreviated SHA as printed by `git log --oneline`
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.sha.len());
        &self.sha[..end]
    }

    pub fn summary(&self) -> &str {
        self.message
            .as_deref()
            .and_then(|m| m.lines().next())
            .unwrap_or("")
    }
}

/// Git author signature. GitHub names the timestamp `date`; it serializes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
}
