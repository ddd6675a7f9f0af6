//! List the files changed since a commit

use std::path::Path;

use anyhow::Context;

use lineage::git::diff;
use lineage::output::{ChangedFilesResult, OutputMode};

/// Diff the working tree against `commit` and list the changed files
pub fn files(repo: &Path, commit: &str, mode: OutputMode) -> anyhow::Result<()> {
    let diff_text = diff::diff_commit(repo, commit)
        .with_context(|| format!("diffing against {commit}"))?;
    let changed = diff::extract_changed_files(&diff_text);

    let result = ChangedFilesResult::from_changed_files(commit, &changed);
    result.render(mode);
    Ok(())
}
