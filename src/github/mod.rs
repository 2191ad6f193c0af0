pub mod client;
pub mod fetcher;

pub use client::{CompareService, GitHubClient};
pub use fetcher::CommitFetcher;
