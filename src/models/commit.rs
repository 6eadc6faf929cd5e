/// A commit known only by its (possibly abbreviated) hash.
///
/// Files and timestamps are resolved on demand through a `VcsProvider`;
/// see `git::history` and `git::cache`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    hash: String,
}

impl Commit {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// A changed path, tied to the commit that first surfaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File<'a> {
    name: String,
    commit: &'a Commit,
}

impl<'a> File<'a> {
    pub fn new(commit: &'a Commit, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commit(&self) -> &'a Commit {
        self.commit
    }
}
