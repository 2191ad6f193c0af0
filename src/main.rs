//! compare-commits - list every commit between two refs of a GitHub repository
//!
//! # Usage
//! ```bash
//! compare-commits --owner rust-lang --repo rust --base 1.70.0 --head 1.71.0
//! compare-commits --owner octo --repo hello --base main --head topic --json
//! GITHUB_TOKEN=ghp_... compare-commits --owner octo --repo hello --base v1 --head v2 --short
//! ```

mod error;
mod github;
mod models;
mod output;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use error::AppError;
use github::client::DEFAULT_API_URL;
use github::{CommitFetcher, GitHubClient};
use models::{ComparisonRequest, Credentials};
use output::{MessageFormatter, OutputMode};

/// Fetch the commits between BASE and HEAD from GitHub's compare API
#[derive(Parser)]
#[command(name = "compare-commits")]
#[command(about = "List all commits between two refs of a GitHub repository", long_about = None)]
struct Cli {
    /// Name of the user or organization the repo belongs to
    #[arg(long, default_value = "")]
    owner: String,

    /// Name of the repo to compare commits from
    #[arg(long, default_value = "")]
    repo: String,

    /// Commit SHA, branch, or tag to use as HEAD in the comparison
    #[arg(long, default_value = "")]
    head: String,

    /// Commit SHA, branch, or tag to use as BASE in the comparison
    #[arg(long, default_value = "")]
    base: String,

    /// User to authenticate as
    #[arg(long, env = "GITHUB_USER", default_value = "")]
    user: String,

    /// Password or personal access token
    #[arg(long, env = "GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pass: String,

    /// Output commits as JSON
    #[arg(long, conflicts_with = "short")]
    json: bool,

    /// Output one line per commit
    #[arg(long)]
    short: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.short {
            OutputMode::Short
        } else {
            OutputMode::Text
        }
    }

    fn comparison_request(&self) -> ComparisonRequest {
        ComparisonRequest {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            base: self.base.clone(),
            head: self.head.clone(),
            credentials: Credentials {
                user: self.user.clone(),
                pass: self.pass.clone(),
            },
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = GitHubClient::new(&cli.api_url, Duration::from_secs(cli.timeout))?;
    let fetcher = CommitFetcher::new(client);
    let request = cli.comparison_request();

    let commits = tokio::select! {
        result = fetcher.fetch(&request) => result?,
        _ = tokio::signal::ctrl_c() => return Err(AppError::Cancelled.into()),
    };

    let rendered = MessageFormatter::render(&commits, cli.output_mode())?;

    let mut stdout = std::io::stdout().lock();
    if rendered.ends_with('\n') {
        write!(stdout, "{}", rendered)?;
    } else {
        writeln!(stdout, "{}", rendered)?;
    }
    stdout.flush()?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries rendered commits
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(owner = %cli.owner, repo = %cli.repo, api_url = %cli.api_url, "Parsed arguments");

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Comparison failed");
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
