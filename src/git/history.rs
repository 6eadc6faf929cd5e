use std::collections::HashSet;

use crate::config::Options;
use crate::error::Result;
use crate::filters::FilterChain;
use crate::git::cache::CommitMetadataCache;
use crate::git::provider::{OperationContext, VcsProvider};
use crate::models::{Commit, File, FileReport};

fn non_empty_lines(output: &str) -> impl Iterator<Item = &str> {
    output.split('\n').filter(|line| !line.is_empty())
}

/// The `options.commit_limit` most recent commits, newest first. A zero limit means one.
pub async fn get_commits(
    provider: &dyn VcsProvider,
    ctx: &OperationContext,
    options: &Options,
) -> Result<Vec<Commit>> {
    let limit = options.effective_limit();
    let output = provider.recent_commits(ctx, limit).await?;
    let commits: Vec<Commit> = non_empty_lines(&output).map(Commit::new).collect();

    tracing::debug!("Loaded {} of {} requested commits", commits.len(), limit);
    Ok(commits)
}

impl Commit {
    /// Files changed relative to this commit, in provider order.
    pub async fn files<'a>(
        &'a self,
        provider: &dyn VcsProvider,
        ctx: &OperationContext,
    ) -> Result<Vec<File<'a>>> {
        let output = provider.changed_files(ctx, self.hash()).await?;
        Ok(non_empty_lines(&output)
            .map(|name| File::new(self, name))
            .collect())
    }
}

/// Walk `commits` in order and keep the first occurrence of every file name.
///
/// A name is claimed by the first commit that lists it whether or not the
/// filters admit it there; later copies are never re-evaluated. Any provider
/// failure aborts the walk and nothing collected so far is returned.
pub async fn collect_recent_files<'a>(
    commits: &'a [Commit],
    provider: &dyn VcsProvider,
    ctx: &OperationContext,
    filters: &FilterChain,
) -> Result<Vec<File<'a>>> {
    let mut unique_files = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for commit in commits {
        let files = commit.files(provider, ctx).await?;
        let listed = files.len();

        for file in files {
            if !seen.insert(file.name().to_string()) {
                continue;
            }
            if filters.admits(&file) {
                unique_files.push(file);
            }
        }

        tracing::debug!("Commit {}: {} files listed", commit.hash(), listed);
    }

    tracing::info!(
        "Collected {} files from {} commits ({} distinct names)",
        unique_files.len(),
        commits.len(),
        seen.len()
    );
    Ok(unique_files)
}

/// Resolve every file's commit timestamp. The first failure aborts with no rows.
pub async fn build_reports(
    files: &[File<'_>],
    provider: &dyn VcsProvider,
    cache: &CommitMetadataCache,
    ctx: &OperationContext,
) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        let commit = file.commit();
        let timestamp = commit.commit_time(provider, cache, ctx).await?;
        reports.push(FileReport {
            timestamp,
            commit: commit.hash().to_string(),
            name: file.name().to_string(),
        });
    }

    Ok(reports)
}
