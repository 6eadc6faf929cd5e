//! Recently touched source files.
//!
//! Lists the distinct files changed across the most recent commits of a git
//! repository, keeps the ones a [`FilterChain`] admits, and attributes each to
//! the newest commit that surfaced it.
//!
//! ```no_run
//! # async fn run() -> recent_files::Result<()> {
//! use std::time::Duration;
//! use recent_files::{CommitMetadataCache, FilterChain, GitCli, OperationContext, Options};
//! use recent_files::git::{build_reports, collect_recent_files, get_commits};
//!
//! let provider = GitCli::new(".");
//! let ctx = OperationContext::with_timeout(Duration::from_secs(5));
//! let cache = CommitMetadataCache::new();
//!
//! let commits = get_commits(&provider, &ctx, &Options { commit_limit: 10 }).await?;
//! let files = collect_recent_files(&commits, &provider, &ctx, &FilterChain::source_files("go")).await?;
//! for report in build_reports(&files, &provider, &cache, &ctx).await? {
//!     println!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod git;
pub mod models;

pub use config::{Backend, FilterSettings, Options, OutputFormat};
pub use error::{AppError, Result};
pub use filters::{Filter, FilterChain};
pub use git::{CommitMetadataCache, GitCli, GitRepository, OperationContext, VcsProvider};
pub use models::{Commit, File, FileReport};
