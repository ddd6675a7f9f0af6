//! Ignore-revisions sidecar file
//!
//! `.git-blame-ignore-revs` at the repository root lists commits that blame
//! attribution should look through (mass reformats and the like). A missing
//! file is an empty set, not an error, and unknown commit identifiers are
//! tolerated: git ignores what it cannot resolve.

use std::fs;
use std::path::Path;

/// Well-known sidecar filename passed to `git blame --ignore-revs-file`
pub const IGNORE_REVS_FILE: &str = ".git-blame-ignore-revs";

/// Commits that attribution treats as transparent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredRevisions {
    revisions: Vec<String>,
}

impl IgnoredRevisions {
    /// Load the sidecar from the repository root
    ///
    /// One commit identifier per line; blank lines and `#` comments are
    /// skipped. No validation beyond that — the set is forwarded to git
    /// verbatim.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let Ok(content) = fs::read_to_string(root.join(IGNORE_REVS_FILE)) else {
            return Self::default();
        };

        let revisions = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        Self { revisions }
    }

    /// Whether no revisions are listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Number of listed revisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// The listed revisions, in file order
    #[must_use]
    pub fn revisions(&self) -> &[String] {
        &self.revisions
    }
}
