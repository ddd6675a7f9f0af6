//! Temporary git repository helper for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary git repository for testing
pub struct TempGitRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TempGitRepo {
    /// Create a new temporary git repository on branch `main`
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().to_path_buf();

        // Initialize git repo
        Command::new("git")
            .args(["init"])
            .current_dir(&path)
            .output()
            .expect("Failed to init git repo");

        Command::new("git")
            .args(["checkout", "-b", "main"])
            .current_dir(&path)
            .output()
            .expect("Failed to create main branch");

        // Configure git user and disable signing
        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(&path)
            .output()
            .expect("Failed to set git user.name");

        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(&path)
            .output()
            .expect("Failed to set git user.email");

        Command::new("git")
            .args(["config", "commit.gpgsign", "false"])
            .current_dir(&path)
            .output()
            .expect("Failed to disable commit signing");

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a file to the repository
    pub fn write_file(&self, name: &str, content: &str) {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(file_path, content).expect("Failed to write file");
    }

    /// Stage a file
    pub fn stage(&self, name: &str) {
        Command::new("git")
            .args(["add", name])
            .current_dir(&self.path)
            .output()
            .expect("Failed to stage file");
    }

    /// Commit staged changes
    pub fn commit(&self, message: &str) {
        Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(&self.path)
            .output()
            .expect("Failed to commit");
    }

    /// Stage everything and commit
    pub fn commit_all(&self, message: &str) {
        Command::new("git")
            .args(["add", "-A"])
            .current_dir(&self.path)
            .output()
            .expect("Failed to stage all files");
        self.commit(message);
    }

    /// Stage everything and commit with explicit author and committer epochs
    pub fn commit_all_with_dates(&self, message: &str, author_epoch: i64, committer_epoch: i64) {
        Command::new("git")
            .args(["add", "-A"])
            .current_dir(&self.path)
            .output()
            .expect("Failed to stage all files");

        Command::new("git")
            .args(["commit", "-m", message])
            .env("GIT_AUTHOR_DATE", format!("{author_epoch} +0000"))
            .env("GIT_COMMITTER_DATE", format!("{committer_epoch} +0000"))
            .current_dir(&self.path)
            .output()
            .expect("Failed to commit with dates");
    }

    /// Set the author identity used for subsequent commits
    pub fn set_author(&self, name: &str, email: &str) {
        Command::new("git")
            .args(["config", "user.name", name])
            .current_dir(&self.path)
            .output()
            .expect("Failed to set git user.name");

        Command::new("git")
            .args(["config", "user.email", email])
            .current_dir(&self.path)
            .output()
            .expect("Failed to set git user.email");
    }

    /// Full hash of the current HEAD commit
    pub fn head_hash(&self) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(&self.path)
            .output()
            .expect("Failed to resolve HEAD");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run a git command and return output
    pub fn git(&self, args: &[&str]) -> std::process::Output {
        Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .expect("Failed to run git command")
    }
}

impl Default for TempGitRepo {
    fn default() -> Self {
        Self::new()
    }
}
