//! Line attribution
//!
//! Joins the two parser outputs: diff-derived "lines to track" and blame
//! attribution records. The batch analyzer runs one blame query per changed
//! file with per-file failure isolation — a file whose blame output cannot
//! be decoded is logged and skipped, while a subprocess failure aborts the
//! whole repository analysis, since it indicates a broken checkout rather
//! than malformed-but-parseable text.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::git::GitError;
use crate::git::blame::{self, BlameError, BlameLine};
use crate::git::diff::{self, LineRange};
use crate::git::ignore::IgnoredRevisions;

/// Per-file attribution with the tracked-line subset for the report window
///
/// Assembled once by [`correlate`] and never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct FileAttribution {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Attribution for every line, in file order (index 0 is line 1)
    pub lines: Vec<BlameLine>,
    /// Sorted 1-indexed line numbers counted toward the report window
    pub tracked: Vec<u32>,
}

impl FileAttribution {
    /// Whether `line` is counted toward the report window
    #[must_use]
    pub fn is_tracked(&self, line: u32) -> bool {
        self.tracked.binary_search(&line).is_ok()
    }
}

/// A file omitted from results, with the reason it was skipped
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Human-readable reason
    pub reason: String,
}

/// Options for a repository analysis run
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Look through commits listed in `.git-blame-ignore-revs` and report
    /// the prior real author instead
    pub find_previous_authors: bool,
}

/// Attribution results for one repository analysis
#[derive(Debug, Serialize)]
pub struct RepoAnalysis {
    /// Per-file attribution, in processing order
    pub files: Vec<FileAttribution>,
    /// Files omitted because their blame output could not be decoded
    pub skipped: Vec<SkippedFile>,
}

/// Join blame lines with an optional tracking constraint
///
/// `ranges` distinguishes two cases that must not collapse: `None` means no
/// diff constraint applies (full-history baseline) and every line is
/// tracked; `Some(&[])` means the file's window changes were deletions only
/// and nothing is tracked. Overlapping ranges are treated as a union; a
/// boundary line is tracked iff it falls in `[start, start + count)` of at
/// least one range.
#[must_use]
pub fn correlate(
    path: PathBuf,
    lines: Vec<BlameLine>,
    ranges: Option<&[LineRange]>,
) -> FileAttribution {
    let total = u32::try_from(lines.len()).unwrap_or(u32::MAX);

    let tracked = match ranges {
        None => (1..=total).collect(),
        Some(ranges) => (1..=total)
            .filter(|&line| ranges.iter().any(|range| range.contains(line)))
            .collect(),
    };

    FileAttribution { path, lines, tracked }
}

/// Attribution for every file changed since `commit`
///
/// Runs `git diff <commit>` against the current checkout, extracts the
/// changed files, and blames each one. Tracked lines are the added ranges
/// from the diff; files the diff parser skipped never reach blame.
pub fn analyze_window(
    root: &Path,
    commit: &str,
    options: AnalysisOptions,
) -> Result<RepoAnalysis, GitError> {
    let diff_text = diff::diff_commit(root, commit)?;
    let changed = diff::extract_changed_files(&diff_text);
    let with_previous_authors = use_previous_authors(root, options);

    let mut files = Vec::with_capacity(changed.len());
    let mut skipped = Vec::new();

    for file in changed {
        match blame::blame_file(root, &file.path, with_previous_authors) {
            Ok(lines) => files.push(correlate(file.path, lines, Some(&file.added_ranges))),
            Err(BlameError::Malformed(reason)) => {
                log::warn!("skipping {}: {reason}", file.path.display());
                skipped.push(SkippedFile { path: file.path, reason });
            }
            Err(BlameError::Git(err)) => return Err(err),
        }
    }

    Ok(RepoAnalysis { files, skipped })
}

/// Attribution for every file in the working tree, with all lines tracked
///
/// Used when no commit window constrains the report. Hidden entries
/// (including `.git`) are not descended into; file order is sorted for
/// deterministic output.
pub fn analyze_baseline(root: &Path, options: AnalysisOptions) -> Result<RepoAnalysis, GitError> {
    let with_previous_authors = use_previous_authors(root, options);

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.path() == root || !is_hidden(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf()
        })
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        match blame::blame_file(root, &path, with_previous_authors) {
            Ok(lines) => files.push(correlate(path, lines, None)),
            Err(BlameError::Malformed(reason)) => {
                log::warn!("skipping {}: {reason}", path.display());
                skipped.push(SkippedFile { path, reason });
            }
            Err(BlameError::Git(err)) => return Err(err),
        }
    }

    Ok(RepoAnalysis { files, skipped })
}

/// Previous-author lookthrough is only requested when the sidecar exists;
/// git fails outright on a missing ignore-revs file.
fn use_previous_authors(root: &Path, options: AnalysisOptions) -> bool {
    options.find_previous_authors && !IgnoredRevisions::load(root).is_empty()
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
