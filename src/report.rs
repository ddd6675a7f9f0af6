//! Contribution report aggregation
//!
//! Folds per-file attribution into per-author tracked-line counts. This is
//! the downstream consumer of the analysis output; authors are keyed by
//! email, with the first observed name kept for display.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::attribution::RepoAnalysis;
use crate::output::OutputMode;

/// Tracked-line contribution of one author
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    /// Display name (first observed casing)
    pub name: String,
    /// Email, the aggregation key
    pub email: String,
    /// Tracked lines attributed to this author
    pub tracked_lines: usize,
    /// Files containing at least one of those lines
    pub files: usize,
    /// Most recent attribution timestamp, seconds since epoch
    pub last_touched: i64,
}

/// Aggregated contribution report for one repository analysis
#[derive(Debug, Serialize)]
pub struct ContributionReport {
    /// Repository the report covers
    pub repo: String,
    /// Files that produced attribution
    pub files_analyzed: usize,
    /// Files omitted with warnings
    pub files_skipped: usize,
    /// Sum of tracked lines across all files
    pub total_tracked_lines: usize,
    /// Per-author summaries, most lines first
    pub authors: Vec<AuthorSummary>,
}

impl ContributionReport {
    /// Aggregate an analysis into per-author counts
    #[must_use]
    pub fn from_analysis(repo: &str, analysis: &RepoAnalysis) -> Self {
        // BTreeMap keyed by email keeps iteration deterministic
        let mut by_email: BTreeMap<String, AuthorSummary> = BTreeMap::new();
        let mut total_tracked_lines = 0;

        for file in &analysis.files {
            let mut touched: Vec<&str> = Vec::new();

            for &line_number in &file.tracked {
                let Some(line) = usize::try_from(line_number)
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| file.lines.get(index))
                else {
                    continue;
                };
                total_tracked_lines += 1;

                let entry = by_email
                    .entry(line.author_email.clone())
                    .or_insert_with(|| AuthorSummary {
                        name: line.author_name.clone(),
                        email: line.author_email.clone(),
                        tracked_lines: 0,
                        files: 0,
                        last_touched: line.timestamp,
                    });
                entry.tracked_lines += 1;
                entry.last_touched = entry.last_touched.max(line.timestamp);

                if !touched.contains(&line.author_email.as_str()) {
                    touched.push(&line.author_email);
                    entry.files += 1;
                }
            }
        }

        let mut authors: Vec<AuthorSummary> = by_email.into_values().collect();
        authors.sort_by(|a, b| {
            b.tracked_lines
                .cmp(&a.tracked_lines)
                .then_with(|| a.email.cmp(&b.email))
        });

        Self {
            repo: repo.to_string(),
            files_analyzed: analysis.files.len(),
            files_skipped: analysis.skipped.len(),
            total_tracked_lines,
            authors,
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!(
            "{}: {} file(s), {} tracked line(s)",
            self.repo.as_str().bold(),
            self.files_analyzed,
            self.total_tracked_lines
        );
        if self.files_skipped > 0 {
            let skipped = format!("  {} file(s) skipped", self.files_skipped);
            println!("{}", skipped.as_str().yellow());
        }

        if self.authors.is_empty() {
            println!("\nNo tracked lines in this window.");
            return;
        }

        println!();
        for author in &self.authors {
            let when = DateTime::<Utc>::from_timestamp(author.last_touched, 0)
                .map_or_else(|| "unknown".to_string(), |t| t.format("%Y-%m-%d").to_string());
            let count = author.tracked_lines.to_string();
            println!(
                "  {:>6}  {} <{}>  ({} file(s), last {})",
                count.as_str().green(),
                author.name,
                author.email,
                author.files,
                when
            );
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
