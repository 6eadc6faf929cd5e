//! recent-files - list recently touched source files of a git repository
//!
//! # Usage
//! ```bash
//! recent-files                          # last 10 commits of the current repo, Go sources
//! recent-files ~/project -n 30          # walk 30 commits
//! recent-files -e rs --no-default-excludes -x generated/
//! recent-files --backend libgit2 --format json
//! ```
//!
//! Each output line is `<timestamp> <commit-hash> <file-name>`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recent_files::config::{DEFAULT_COMMIT_LIMIT, DEFAULT_EXTENSION, DEFAULT_TIMEOUT_SECS};
use recent_files::git::{build_reports, collect_recent_files, get_commits};
use recent_files::{
    Backend, CommitMetadataCache, FileReport, FilterSettings, GitCli, GitRepository, OperationContext,
    Options, OutputFormat, VcsProvider,
};

/// List files touched by the most recent commits, newest first
#[derive(Parser)]
#[command(name = "recent-files")]
#[command(about = "List recently touched source files of a git repository", long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(value_name = "REPO_PATH", default_value = ".")]
    repo_path: PathBuf,

    /// Number of recent commits to walk (0 means 1)
    #[arg(short = 'n', long, env = "RECENT_FILES_LIMIT", default_value_t = DEFAULT_COMMIT_LIMIT)]
    limit: usize,

    /// Deadline for the whole run, in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Source file extension to keep
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Extra substring to exclude (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "SUBSTRING")]
    excludes: Vec<String>,

    /// Keep generated-proto, mock and test files
    #[arg(long)]
    no_default_excludes: bool,

    /// How to talk to the repository
    #[arg(short, long, value_enum, default_value_t = Backend::Cli)]
    backend: Backend,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn open_provider(backend: Backend, repo_path: &Path) -> anyhow::Result<Box<dyn VcsProvider>> {
    let provider: Box<dyn VcsProvider> = match backend {
        Backend::Cli => Box::new(GitCli::new(repo_path)),
        Backend::Libgit2 => Box::new(GitRepository::open(repo_path)?),
    };
    Ok(provider)
}

fn render(reports: &[FileReport], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => reports
            .iter()
            .map(|report| format!("{}\n", report))
            .collect(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(reports)?),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = OperationContext::with_timeout(Duration::from_secs(cli.timeout));

    let token = ctx.token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let provider = open_provider(cli.backend, &cli.repo_path)
        .with_context(|| format!("Failed to open repository {}", cli.repo_path.display()))?;
    let options = Options {
        commit_limit: cli.limit,
    };
    let filters = FilterSettings {
        extension: cli.extension,
        default_excludes: !cli.no_default_excludes,
        extra_excludes: cli.excludes,
    }
    .build();
    let cache = CommitMetadataCache::new();

    let commits = get_commits(provider.as_ref(), &ctx, &options).await?;
    let files = collect_recent_files(&commits, provider.as_ref(), &ctx, &filters).await?;
    let reports = build_reports(&files, provider.as_ref(), &cache, &ctx).await?;

    tracing::debug!("Cache stats: {:?}", cache.stats());

    print!("{}", render(&reports, cli.format)?);
    Ok(())
}
