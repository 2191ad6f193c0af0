//! GitHub REST client for the compare endpoint.
//!
//! `CompareService` is the seam between the pagination logic and the network:
//! `CommitFetcher` only ever talks to the trait, tests substitute a scripted
//! implementation, and `GitHubClient` is the reqwest-backed one used by `main`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{CommitAuthor, CommitRecord, ComparePage, ComparisonRequest};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait CompareService: Send + Sync {
    /// Fetch one page of the comparison between `request.base` and `request.head`.
    async fn compare_page(
        &self,
        request: &ComparisonRequest,
        page: usize,
        per_page: usize,
    ) -> Result<ComparePage>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(api_url)
            .map_err(|e| AppError::Config(format!("invalid API URL '{}': {}", api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API URL must be http or https: {}",
                api_url
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: parsed,
        })
    }

    /// Every component is percent-encoded, so `#`, `?` and `%` in refs stay part
    /// of the path. Slashes inside branch names are kept literal.
    fn compare_url(&self, request: &ComparisonRequest) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["repos", request.owner.as_str(), request.repo.as_str(), "compare"])
            .extend(request.basehead().split('/'));
        Ok(url)
    }
}

#[async_trait]
impl CompareService for GitHubClient {
    async fn compare_page(
        &self,
        request: &ComparisonRequest,
        page: usize,
        per_page: usize,
    ) -> Result<ComparePage> {
        let url = self.compare_url(request)?;
        tracing::debug!(%url, page, per_page, "Requesting compare page");

        let mut builder = self
            .http
            .get(url)
            .query(&[("page", page), ("per_page", per_page)])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        let credentials = &request.credentials;
        if !credentials.user.is_empty() {
            builder = builder.basic_auth(&credentials.user, Some(&credentials.pass));
        } else if !credentials.pass.is_empty() {
            builder = builder.bearer_auth(&credentials.pass);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(remote_error(status.as_u16(), &body));
        }

        let payload: CompareResponse = response.json().await?;
        Ok(payload.into_page())
    }
}

/// Build a `Remote` error, preferring GitHub's `message` field over the raw body.
fn remote_error(status: u16, body: &str) -> AppError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    AppError::Remote { status, message }
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    total_commits: usize,
    #[serde(default)]
    commits: Vec<RepositoryCommit>,
}

#[derive(Debug, Deserialize)]
struct RepositoryCommit {
    sha: String,
    commit: GitCommit,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    #[serde(default)]
    author: Option<CommitAuthor>,
    #[serde(default)]
    message: Option<String>,
}

impl CompareResponse {
    fn into_page(self) -> ComparePage {
        // The record's identifier is the commit SHA, never commit.tree.sha
        let commits = self
            .commits
            .into_iter()
            .map(|c| CommitRecord::new(c.sha, c.commit.author, c.commit.message))
            .collect();

        ComparePage {
            total_commits: self.total_commits,
            commits,
        }
    }
}
