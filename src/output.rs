//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::git::diff::ChangedFile;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of listing the files changed since a commit
#[derive(Debug, Serialize)]
pub struct ChangedFilesResult {
    /// The commit the working tree was diffed against
    pub commit: String,
    /// Changed files with their added line ranges
    pub files: Vec<ChangedFileInfo>,
}

/// One changed file in a listing
#[derive(Debug, Serialize)]
pub struct ChangedFileInfo {
    /// Path relative to the repository root
    pub path: String,
    /// Total number of added lines across all hunks
    pub added_lines: u32,
    /// Added ranges as `(start, count)` pairs, in hunk order
    pub ranges: Vec<(u32, u32)>,
}

impl ChangedFilesResult {
    /// Build a listing from parsed diff records
    #[must_use]
    pub fn from_changed_files(commit: &str, changed: &[ChangedFile]) -> Self {
        let files = changed
            .iter()
            .map(|file| ChangedFileInfo {
                path: file.path.display().to_string(),
                added_lines: file.added_ranges.iter().map(|r| r.count).sum(),
                ranges: file.added_ranges.iter().map(|r| (r.start, r.count)).collect(),
            })
            .collect();

        Self {
            commit: commit.to_string(),
            files,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.files.is_empty() {
            println!("No files changed since {}.", self.commit);
            return;
        }

        println!("Files changed since {}:\n", self.commit);
        for file in &self.files {
            println!("  {} (+{} line(s))", file.path, file.added_lines);
            for (start, count) in &file.ranges {
                println!("      lines {}..{}", start, start + count);
            }
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
