//! Analysis run configuration
//!
//! A TOML file lists the repositories to analyze. Each `[[repo]]` table
//! names a working copy and, optionally, the branch and date window to
//! report on. Repositories are analyzed independently: a failure in one
//! never stops the others.
//!
//! ```toml
//! [[repo]]
//! path = "/home/dev/projects/service"
//! branch = "main"
//! since = "2026-07-01"
//! until = "2026-08-01"
//! find_previous_authors = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading or interpreting a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A date field could not be parsed
    #[error("invalid date {0:?}: expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),
}

/// Top-level run configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Repositories to analyze, in order
    #[serde(default, rename = "repo")]
    pub repos: Vec<RepoConfig>,
}

/// One repository to analyze
#[derive(Debug, Clone, Deserialize)]
pub struct RepoConfig {
    /// Working copy root
    pub path: PathBuf,
    /// Branch to check out before analysis; current checkout when absent
    #[serde(default)]
    pub branch: Option<String>,
    /// Window start date; changes since the last commit before this date
    /// are tracked. Absent means full-history baseline.
    #[serde(default)]
    pub since: Option<String>,
    /// Checkout cutoff date; the working copy is moved to the last commit
    /// at or before it. Absent means the current checkout.
    #[serde(default)]
    pub until: Option<String>,
    /// Look through `.git-blame-ignore-revs` commits
    #[serde(default)]
    pub find_previous_authors: bool,
}

impl RunConfig {
    /// Load a run configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl RepoConfig {
    /// A configuration for a single repository with no window constraints
    #[must_use]
    pub fn bare(path: PathBuf) -> Self {
        Self {
            path,
            branch: None,
            since: None,
            until: None,
            find_previous_authors: false,
        }
    }
}

/// Parse a window-start date: plain dates resolve to the start of the day
pub fn parse_since_date(text: &str) -> Result<DateTime<Utc>, ConfigError> {
    parse_date(text, false)
}

/// Parse a checkout cutoff date: plain dates resolve to the end of the day
pub fn parse_until_date(text: &str) -> Result<DateTime<Utc>, ConfigError> {
    parse_date(text, true)
}

fn parse_date(text: &str, end_of_day: bool) -> Result<DateTime<Utc>, ConfigError> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(text.to_string()))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| ConfigError::InvalidDate(text.to_string()))
}
