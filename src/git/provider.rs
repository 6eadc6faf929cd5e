//! Version-control provider seam.
//!
//! The pipeline only ever needs three textual operations from the VCS. Each
//! returns the provider's raw output; splitting and parsing happen in the
//! callers so every backend shares the same line handling.
//!
//! Every call receives the run's `OperationContext`, which carries the
//! cancellation token and the fixed deadline created at startup.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};

#[async_trait]
pub trait VcsProvider: Send + Sync {
    /// Abbreviated ids of the `limit` most recent commits, one per line, newest first.
    async fn recent_commits(&self, ctx: &OperationContext, limit: usize) -> Result<String>;

    /// Paths changed relative to `hash`, one per line.
    async fn changed_files(&self, ctx: &OperationContext, hash: &str) -> Result<String>;

    /// Committer timestamp of `hash` in RFC 1123 form with numeric zone, newline-terminated.
    async fn commit_time(&self, ctx: &OperationContext, hash: &str) -> Result<String>;
}

/// Cancellable, deadline-bound token shared by every external invocation of a run.
#[derive(Debug, Clone)]
pub struct OperationContext {
    token: CancellationToken,
    deadline: Instant,
}

impl OperationContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now() + timeout,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Fail fast when the run was cancelled or its deadline already passed.
    pub fn check(&self, operation: &str) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(AppError::external(operation, "operation cancelled"));
        }
        if Instant::now() >= self.deadline {
            return Err(AppError::external(operation, "deadline exceeded"));
        }
        Ok(())
    }

    /// Drive `fut` to completion unless the token fires or the deadline elapses first.
    pub async fn run<F, T>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::warn!("{} cancelled", operation);
                Err(AppError::external(operation, "operation cancelled"))
            }
            res = tokio::time::timeout_at(self.deadline, fut) => match res {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("{} hit the deadline", operation);
                    Err(AppError::external(operation, "deadline exceeded"))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_passes_through_result_before_deadline() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));
        let value = ctx.run("noop", async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn cancelled_context_fails_as_external_tool() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));
        ctx.cancel();

        let err = ctx.check("git log").unwrap_err();
        assert!(err.is_external_tool());

        let err = ctx
            .run("git log", std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert!(err.is_external_tool());
        assert!(err.to_string().contains("cancelled"));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_aborts_in_flight_call() {
        let ctx = OperationContext::with_timeout(Duration::from_millis(50));
        let err = ctx
            .run("git diff", std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert!(err.is_external_tool());
        assert!(err.to_string().contains("deadline exceeded"));
        assert!(ctx.check("git diff").is_err());
    }

    #[tokio::test]
    async fn clones_share_cancellation() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.token().is_cancelled());
    }
}
