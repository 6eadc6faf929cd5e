//! Scratch repositories built through libgit2.

use git2::{Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Offset of every test commit, in minutes east of UTC.
pub const OFFSET_MINUTES: i32 = 120;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write file");
    }

    /// Write and stage `files`, then commit them on HEAD at `seconds`.
    pub fn commit(&self, files: &[(&str, &str)], seconds: i64) -> String {
        let mut index = self.repo.index().expect("open index");
        for (name, content) in files {
            self.write(name, content);
            index.add_path(Path::new(name)).expect("stage file");
        }
        index.write().expect("write index");

        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, OFFSET_MINUTES))
            .expect("signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "change", &tree, &parents)
            .expect("commit")
            .to_string()
    }
}

impl TestRepo {
    /// Move `from` to `to` in the working tree and stage the move.
    pub fn stage_rename(&self, from: &str, to: &str) {
        fs::rename(self.path().join(from), self.path().join(to)).expect("rename file");
        let mut index = self.repo.index().expect("open index");
        index.remove_path(Path::new(from)).expect("unstage old path");
        index.add_path(Path::new(to)).expect("stage new path");
        index.write().expect("write index");
    }
}

pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}
