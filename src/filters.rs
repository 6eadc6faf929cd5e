//! Name-based file filters.
//!
//! A `FilterChain` admits a file only when every `Filter` accepts its name.
//! Filters are pure values, so evaluation order only affects how early a
//! rejection short-circuits.

use crate::models::File;

pub const PROTO_MARKER: &str = ".pb.";
pub const MOCK_MARKER: &str = "mock/";
pub const TEST_MARKER: &str = "_test.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Accept only names whose extension equals this one (no leading dot).
    Extension(String),
    /// Reject names containing this substring.
    Exclude(String),
}

impl Filter {
    pub fn extension(ext: &str) -> Self {
        Filter::Extension(ext.trim_start_matches('.').to_string())
    }

    pub fn exclude(marker: impl Into<String>) -> Self {
        Filter::Exclude(marker.into())
    }

    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Filter::Extension(ext) => extension_of(name) == Some(ext.as_str()),
            Filter::Exclude(marker) => !name.contains(marker.as_str()),
        }
    }
}

/// Text after the last dot of the final path segment; a leading dot counts.
fn extension_of(name: &str) -> Option<&str> {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.rfind('.').map(|dot| &base[dot + 1..])
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source extension plus the generated-proto, mock and test exclusions.
    pub fn source_files(ext: &str) -> Self {
        Self::new()
            .with(Filter::extension(ext))
            .with(Filter::exclude(PROTO_MARKER))
            .with(Filter::exclude(MOCK_MARKER))
            .with(Filter::exclude(TEST_MARKER))
    }

    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn admits(&self, file: &File<'_>) -> bool {
        self.admits_name(file.name())
    }

    pub fn admits_name(&self, name: &str) -> bool {
        self.filters.iter().all(|filter| filter.accepts(name))
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
