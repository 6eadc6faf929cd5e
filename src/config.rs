//! Run configuration shared by the library and the binary.

use clap::ValueEnum;

use crate::filters::{Filter, FilterChain, MOCK_MARKER, PROTO_MARKER, TEST_MARKER};

pub const DEFAULT_COMMIT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_EXTENSION: &str = "go";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// How many recent commits to walk; 0 is treated as 1.
    pub commit_limit: usize,
}

impl Options {
    pub fn effective_limit(&self) -> usize {
        self.commit_limit.max(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Shell out to the `git` binary
    #[default]
    Cli,
    /// Read the repository in-process through libgit2
    Libgit2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User-facing knobs that assemble into a `FilterChain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub extension: String,
    pub default_excludes: bool,
    pub extra_excludes: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            default_excludes: true,
            extra_excludes: Vec::new(),
        }
    }
}

impl FilterSettings {
    pub fn build(&self) -> FilterChain {
        let mut chain = FilterChain::new().with(Filter::extension(&self.extension));
        if self.default_excludes {
            for marker in [PROTO_MARKER, MOCK_MARKER, TEST_MARKER] {
                chain.push(Filter::exclude(marker));
            }
        }
        for marker in self.extra_excludes.iter().filter(|m| !m.is_empty()) {
            chain.push(Filter::exclude(marker.clone()));
        }
        chain
    }
}
