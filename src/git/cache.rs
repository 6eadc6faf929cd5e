//! Commit metadata cache.
//!
//! Keeps the raw provider payload for per-commit lookups so a commit asked
//! about twice costs one external call.
//! - Keys: `<namespace>-<hash>`, e.g. `commit-time-1a2b3c4`
//! - Values: provider output exactly as returned (parsed again on every read)
//! - Write-once per key, never evicted; lives as long as its owner
//!
//! The map sits behind a mutex so the check-then-fetch-then-store sequence
//! stays consistent when the cache is shared between tasks.
//!
//! Used by: `Commit::commit_time()`

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::error::{AppError, Result};
use crate::git::provider::{OperationContext, VcsProvider};
use crate::models::Commit;

pub const COMMIT_TIME_NAMESPACE: &str = "commit-time";

/// RFC 1123 with numeric zone, the shape of `git show -s --format=%cD`.
pub const RFC1123Z_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

pub fn cache_key(namespace: &str, hash: &str) -> String {
    format!("{}-{}", namespace, hash)
}

pub struct CommitMetadataCache {
    entries: Mutex<HashMap<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
    created_at: Instant,
}

impl Default for CommitMetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitMetadataCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Store `payload` unless the key is already populated; returns the stored value.
    pub fn insert(&self, key: String, payload: String) -> String {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(key)
            .or_insert(payload)
            .clone()
    }

    /// Return the cached payload for `key`, or run `fetch` once and remember its output.
    ///
    /// A failed fetch leaves the key empty so a later call can try again.
    pub async fn get_or_fetch<F, Fut>(&self, key: String, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if let Some(payload) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("cache hit: {}", key);
            return Ok(payload);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("cache miss: {}", key);
        let payload = fetch().await?;
        Ok(self.insert(key, payload))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics for debugging
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            age_secs: self.created_at.elapsed().as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub age_secs: u64,
}

/// Parse a `%cD` payload after dropping exactly one trailing line terminator.
pub fn parse_commit_time(payload: &str) -> Result<DateTime<FixedOffset>> {
    let text = payload
        .strip_suffix("\r\n")
        .or_else(|| payload.strip_suffix('\n'))
        .unwrap_or(payload);

    DateTime::parse_from_str(text, RFC1123Z_FORMAT).map_err(|source| AppError::TimestampParse {
        payload: payload.to_string(),
        source,
    })
}

impl Commit {
    /// Committer timestamp, fetched at most once per hash for the lifetime of `cache`.
    pub async fn commit_time(
        &self,
        provider: &dyn VcsProvider,
        cache: &CommitMetadataCache,
        ctx: &OperationContext,
    ) -> Result<DateTime<FixedOffset>> {
        let key = cache_key(COMMIT_TIME_NAMESPACE, self.hash());
        let payload = cache
            .get_or_fetch(key, || provider.commit_time(ctx, self.hash()))
            .await?;
        parse_commit_time(&payload)
    }
}
