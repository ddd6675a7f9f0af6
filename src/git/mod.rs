//! Git integration
//!
//! Everything the analyzer knows about a repository arrives through one
//! subprocess seam: `run_git` executes git with argv-style arguments inside
//! a repository root and hands the raw text output to the parsers in the
//! submodules. Arguments are passed as separate argv entries, never through
//! a shell, so file paths with spaces or special characters need no quoting.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use thiserror::Error;

pub mod blame;
pub mod checkout;
pub mod diff;
pub mod ignore;

/// Errors from the git subprocess boundary
#[derive(Debug, Error)]
pub enum GitError {
    /// git could not be spawned at all
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git exited with a non-zero status
    #[error("`git {command}` exited with status {status}: {stderr}")]
    CommandFailed {
        /// The arguments git was invoked with
        command: String,
        /// Exit status, or "signal" when terminated without one
        status: String,
        /// Trimmed stderr from the failed invocation
        stderr: String,
    },

    /// git succeeded but produced no output where output was required
    #[error("`git {command}` produced no output")]
    EmptyOutput {
        /// The arguments git was invoked with
        command: String,
    },

    /// No commit exists on the branch at or before the requested date
    #[error("no commit found on {branch} before {date}")]
    NoCommitBeforeDate {
        /// Branch that was searched
        branch: String,
        /// The requested cutoff date
        date: String,
    },
}

/// Run a git command in `root` and return its stdout as text
///
/// Non-zero exit status is an error carrying the trimmed stderr; empty
/// output is not, since many git commands legitimately print nothing.
pub fn run_git<I, S>(root: &Path, args: I) -> Result<String, GitError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();

    let output = Command::new("git").args(&args).current_dir(root).output()?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: display_args(&args),
            status: output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Render argv entries as a single diagnostic string
fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
