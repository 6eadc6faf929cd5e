//! In-memory provider for unit tests: canned outputs plus a call log.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::git::provider::{OperationContext, VcsProvider};

#[derive(Default)]
pub struct ScriptedProvider {
    log: String,
    files: HashMap<String, String>,
    times: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// `log` is the full history, newest first, as `git log --pretty=format:%h` prints it.
    pub fn new(log: &str) -> Self {
        Self {
            log: log.to_string(),
            ..Self::default()
        }
    }

    pub fn with_files(mut self, hash: &str, output: &str) -> Self {
        self.files.insert(hash.to_string(), output.to_string());
        self
    }

    pub fn with_time(mut self, hash: &str, payload: &str) -> Self {
        self.times.insert(hash.to_string(), payload.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, verb: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(' ').next() == Some(verb))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl VcsProvider for ScriptedProvider {
    async fn recent_commits(&self, ctx: &OperationContext, limit: usize) -> Result<String> {
        let call = format!("log -{}", limit);
        ctx.check(&call)?;
        self.record(call);
        Ok(self.log.split('\n').take(limit).collect::<Vec<_>>().join("\n"))
    }

    async fn changed_files(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        let call = format!("diff {}", hash);
        ctx.check(&call)?;
        self.record(call.clone());
        self.files
            .get(hash)
            .cloned()
            .ok_or_else(|| AppError::external(call, "unknown revision"))
    }

    async fn commit_time(&self, ctx: &OperationContext, hash: &str) -> Result<String> {
        let call = format!("show {}", hash);
        ctx.check(&call)?;
        self.record(call.clone());
        self.times
            .get(hash)
            .cloned()
            .ok_or_else(|| AppError::external(call, "unknown revision"))
    }
}
