use std::fmt;

use super::CommitRecord;

/// Which repository and which two refs to compare.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub owner: String,
    pub repo: String,
    pub base: String,
    pub head: String,
    pub credentials: Credentials,
}

impl ComparisonRequest {
    /// `base...head`, the form GitHub expects in the compare URL
    pub fn basehead(&self) -> String {
        format!("{}...{}", self.base, self.head)
    }
}

/// Username and password or personal access token. Only the transport reads these.
#[derive(Clone, Default)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &if self.pass.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// One page of a comparison as returned by the remote endpoint.
#[derive(Debug, Clone)]
pub struct ComparePage {
    pub total_commits: usize,
    pub commits: Vec<CommitRecord>,
}
