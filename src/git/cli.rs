//! `git` binary backend using [`tokio::process::Command`].
//!
//! Each operation shells out to the system `git` inside the repository
//! directory. Calls race the run's deadline and cancellation token; a child
//! left behind by an aborted call is killed when its handle drops.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{AppError, Result};
use crate::git::provider::{OperationContext, VcsProvider};

pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    #[instrument(skip(self, ctx), fields(repo = %self.repo_path.display()))]
    async fn run_git(&self, ctx: &OperationContext, args: &[&str]) -> Result<String> {
        let operation = format!("git {}", args.join(" "));
        ctx.check(&operation)?;

        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_path).args(args);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        debug!("spawning {}", operation);

        let output = ctx
            .run(&operation, async {
                cmd.output()
                    .await
                    .map_err(|e| AppError::external(&operation, format!("failed to spawn: {}", e)))
            })
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::external(
                &operation,
                format!("status {}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VcsProvider for GitCli {
    async fn recent_commits(&self, ctx: &OperationContext, limit: usize) -> Result<String> {
        let count = format!("-{}", limit);
        self.run_git(ctx, &["log", &count, "--pretty=format:%h"]).await
    }

    async fn changed_files(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        self.run_git(ctx, &["diff", "--name-only", hash]).await
    }

    async fn commit_time(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        self.run_git(ctx, &["show", "-s", "--format=%cD", hash]).await
    }
}
