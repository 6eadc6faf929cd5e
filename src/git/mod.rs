pub mod cache;
pub mod cli;
pub mod history;
pub mod provider;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheStats, CommitMetadataCache};
pub use cli::GitCli;
pub use history::{build_reports, collect_recent_files, get_commits};
pub use provider::{OperationContext, VcsProvider};
pub use repository::GitRepository;
