//! Unified diff parsing
//!
//! Discovers which files changed in a commit window and which line ranges
//! were added, from the raw text of `git diff`. Parsing is per-file-block
//! and failure-isolated: a block we cannot make sense of is skipped with a
//! warning, never aborting the rest of the diff.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use super::{GitError, run_git};

/// Marker git prints in place of a path when a file was deleted
const FILE_DELETED_SYMBOL: &str = "/dev/null";

/// A half-open range of 1-indexed line numbers `[start, start + count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    /// First line in the range
    pub start: u32,
    /// Number of lines covered
    pub count: u32,
}

impl LineRange {
    /// Whether `line` falls inside the range
    #[must_use]
    pub const fn contains(self, line: u32) -> bool {
        line >= self.start && line < self.start + self.count
    }

    /// One past the last line in the range
    #[must_use]
    pub const fn end(self) -> u32 {
        self.start + self.count
    }
}

/// A file that changed within the analyzed window
///
/// Deleted files never appear here; blocks headed by the deletion marker are
/// dropped during parsing. A file whose window changes were deletions only
/// carries an empty `added_ranges`, which downstream means "no lines to
/// track" rather than "all lines".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Added line ranges on the post-change side, in hunk order
    pub added_ranges: Vec<LineRange>,
}

/// Raw diff of `commit` against the current working tree state
pub fn diff_commit(root: &Path, commit: &str) -> Result<String, GitError> {
    run_git(root, ["diff", commit])
}

/// Extract the changed files and their added line ranges from raw diff text
///
/// Returns one record per file block that carries line-level changes, in
/// block order. Blocks without a `+++` marker (pure renames, mode changes)
/// and blocks for deleted files are skipped silently; a block whose path is
/// not a valid repository-relative path is skipped with a warning.
#[must_use]
pub fn extract_changed_files(diff_text: &str) -> Vec<ChangedFile> {
    // Compiled once per call, reused across every block
    let file_marker = Regex::new(r"(?m)^\+\+\+ (?:b/)?(?P<path>.+)$").expect("valid regex");
    let hunk_header = Regex::new(r"(?m)^@@ -\d+(?:,\d+)? \+(?P<start>\d+)(?:,(?P<count>\d+))? @@")
        .expect("valid regex");

    let mut changed = Vec::new();

    // Split on the block marker at line starts only; an added content line
    // that happens to contain the marker text must not open a new block.
    for block in diff_text.split("\ndiff --git ") {
        // No marker means the block has no line-level changes (e.g. a pure
        // rename or a mode change); that is expected, not an error.
        let Some(caps) = file_marker.captures(block) else {
            continue;
        };
        let raw_path = &caps["path"];

        if raw_path == FILE_DELETED_SYMBOL {
            continue;
        }

        let Some(path) = validate_repo_path(raw_path) else {
            log::warn!("invalid file path {raw_path}, skipping this file");
            continue;
        };

        let added_ranges = hunk_header
            .captures_iter(block)
            .filter_map(|hunk| {
                let start = hunk["start"].parse().ok()?;
                let count = hunk
                    .name("count")
                    .map_or(Some(1), |c| c.as_str().parse().ok())?;
                // A zero-count new side is a pure deletion hunk
                (count > 0).then_some(LineRange { start, count })
            })
            .collect();

        changed.push(ChangedFile { path, added_ranges });
    }

    changed
}

/// Check that a diff-reported path is a sane repository-relative path
///
/// Rejects empty paths, embedded NUL, absolute paths, and `..` components
/// that would escape the repository root.
fn validate_repo_path(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() || raw.contains('\0') {
        return None;
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        return None;
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }

    Some(path.to_path_buf())
}
