use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use git2::{Delta, DiffFindOptions, Repository, Sort};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, Result};
use crate::git::provider::{OperationContext, VcsProvider};

/// In-process libgit2 backend producing the same text the `git` binary would.
///
/// libgit2 calls block, so each one runs on the blocking pool and is raced
/// against the run's deadline and cancellation token.
pub struct GitRepository {
    pub repo: Arc<Mutex<Repository>>,
    pub path: String,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        tracing::info!("Opened git repository at: {}", path_str);

        Ok(Self {
            repo: Arc::new(Mutex::new(repo)),
            path: path_str,
        })
    }

    pub async fn with_repo<F, T>(&self, operation: String, ctx: &OperationContext, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> std::result::Result<T, git2::Error> + Send + 'static,
        T: Send + 'static,
    {
        ctx.check(&operation)?;
        tracing::debug!("{}", operation);

        let repo = Arc::clone(&self.repo);
        let op = operation.clone();
        let task = tokio::task::spawn_blocking(move || {
            let repo = repo
                .lock()
                .map_err(|_| AppError::external(&op, "Lock poisoned"))?;
            f(&repo).map_err(|e| AppError::external(&op, e.message()))
        });

        ctx.run(&operation, async {
            task.await.map_err(|e| AppError::external(&operation, e))?
        })
        .await
    }
}

fn log_short_ids(repo: &Repository, limit: usize) -> std::result::Result<String, git2::Error> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push_head()?;

    let mut ids = Vec::new();
    for oid in revwalk.take(limit) {
        let commit = repo.find_commit(oid?)?;
        let short = commit.as_object().short_id()?;
        ids.push(short.as_str().unwrap_or_default().to_string());
    }

    Ok(ids.join("\n"))
}

/// Paths differing between the commit's tree and the working directory (index included).
///
/// Renames are paired up like `git diff` does by default, so a moved file
/// shows only under its new path.
fn workdir_changes(repo: &Repository, hash: &str) -> std::result::Result<String, git2::Error> {
    let commit = repo.revparse_single(hash)?.peel_to_commit()?;
    let tree = commit.tree()?;
    let mut diff = repo.diff_tree_to_workdir_with_index(Some(&tree), None)?;
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

    let mut out = String::new();
    for delta in diff.deltas() {
        let path = match delta.status() {
            Delta::Deleted => delta.old_file().path(),
            _ => delta.new_file().path(),
        };
        if let Some(path) = path {
            out.push_str(&path.to_string_lossy());
            out.push('\n');
        }
    }

    Ok(out)
}

fn committer_date(repo: &Repository, hash: &str) -> std::result::Result<String, git2::Error> {
    let commit = repo.revparse_single(hash)?.peel_to_commit()?;
    let when = commit.committer().when();

    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
        .ok_or_else(|| git2::Error::from_str("commit timezone offset out of range"))?;
    let time = DateTime::from_timestamp(when.seconds(), 0)
        .ok_or_else(|| git2::Error::from_str("commit timestamp out of range"))?
        .with_timezone(&offset);

    // Matches `git show -s --format=%cD`: unpadded day, trailing newline.
    Ok(format!("{}\n", time.format("%a, %-d %b %Y %H:%M:%S %z")))
}

#[async_trait]
impl VcsProvider for GitRepository {
    async fn recent_commits(&self, ctx: &OperationContext, limit: usize) -> Result<String> {
        let operation = format!("libgit2 log -{}", limit);
        self.with_repo(operation, ctx, move |repo| log_short_ids(repo, limit))
            .await
    }

    async fn changed_files(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        let operation = format!("libgit2 diff --name-only {}", hash);
        let hash = hash.to_string();
        self.with_repo(operation, ctx, move |repo| workdir_changes(repo, &hash))
            .await
    }

    async fn commit_time(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        let operation = format!("libgit2 show {}", hash);
        let hash = hash.to_string();
        self.with_repo(operation, ctx, move |repo| committer_date(repo, &hash))
            .await
    }
}
