//! Checkout and commit-selection collaborators
//!
//! Checkout mutates the shared working copy, so it is a strict barrier:
//! these functions must return before any blame or diff query runs against
//! the same working copy.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::{GitError, run_git};

/// Check out `branch` in the working copy
pub fn checkout_branch(root: &Path, branch: &str) -> Result<(), GitError> {
    run_git(root, ["checkout", branch]).map(drop)
}

/// Hash of the last commit on `branch` at or before `date`, if any
pub fn commit_hash_before_date(
    root: &Path,
    branch: &str,
    date: DateTime<Utc>,
) -> Result<Option<String>, GitError> {
    let before = date.to_rfc3339();
    let output = run_git(root, ["rev-list", "-1", "--before", before.as_str(), branch])?;
    let hash = output.trim();
    Ok((!hash.is_empty()).then(|| hash.to_string()))
}

/// Check out the working copy at the last commit on `branch` before `date`
pub fn checkout_date(root: &Path, branch: &str, date: DateTime<Utc>) -> Result<(), GitError> {
    let hash = commit_hash_before_date(root, branch, date)?.ok_or_else(|| {
        GitError::NoCommitBeforeDate {
            branch: branch.to_string(),
            date: date.to_rfc3339(),
        }
    })?;
    run_git(root, ["checkout", hash.as_str()]).map(drop)
}
