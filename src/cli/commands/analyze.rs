//! Analyze repositories and report per-author contributions

use std::path::PathBuf;

use anyhow::Context;

use lineage::attribution::{self, AnalysisOptions, RepoAnalysis};
use lineage::config::{self, RepoConfig, RunConfig};
use lineage::git::checkout;
use lineage::output::OutputMode;
use lineage::report::ContributionReport;

/// Analyze one repository or every repository in a config file
///
/// Repository configurations are independent: one failing is logged and the
/// rest continue, with a non-zero exit at the end if any failed.
pub fn analyze(
    repo: Option<PathBuf>,
    config: Option<PathBuf>,
    branch: Option<String>,
    since: Option<String>,
    until: Option<String>,
    previous_authors: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let repos = match (repo, config) {
        (_, Some(config_path)) => RunConfig::load(&config_path)?.repos,
        (repo, None) => {
            let mut single = RepoConfig::bare(repo.unwrap_or_else(|| PathBuf::from(".")));
            single.branch = branch;
            single.since = since;
            single.until = until;
            single.find_previous_authors = previous_authors;
            vec![single]
        }
    };

    if repos.is_empty() {
        anyhow::bail!("no repositories configured");
    }

    let mut failures = 0usize;
    for repo in &repos {
        if let Err(err) = analyze_repo(repo, mode) {
            log::error!("analysis of {} failed: {err:#}", repo.path.display());
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} repository configuration(s) failed", repos.len());
    }
    Ok(())
}

/// Run the checkout barrier and window analysis for one repository
fn analyze_repo(repo: &RepoConfig, mode: OutputMode) -> anyhow::Result<()> {
    let root = &repo.path;
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let branch = repo.branch.as_deref().unwrap_or("HEAD");

    // Checkout settles the working copy before any blame or diff runs
    if let Some(name) = repo.branch.as_deref() {
        checkout::checkout_branch(root, name)
            .with_context(|| format!("checking out {name}"))?;
    }
    if let Some(until) = repo.until.as_deref() {
        let cutoff = config::parse_until_date(until)?;
        checkout::checkout_date(root, branch, cutoff)
            .with_context(|| format!("checking out state at {until}"))?;
    }

    let options = AnalysisOptions {
        find_previous_authors: repo.find_previous_authors,
    };
    let analysis = run_window(repo, branch, options)?;

    let report = ContributionReport::from_analysis(&root.display().to_string(), &analysis);
    report.render(mode);
    Ok(())
}

fn run_window(
    repo: &RepoConfig,
    branch: &str,
    options: AnalysisOptions,
) -> anyhow::Result<RepoAnalysis> {
    let root = &repo.path;

    let Some(since) = repo.since.as_deref() else {
        return Ok(attribution::analyze_baseline(root, options)?);
    };

    let start = config::parse_since_date(since)?;
    match checkout::commit_hash_before_date(root, branch, start)? {
        Some(commit) => Ok(attribution::analyze_window(root, &commit, options)?),
        // The whole history falls inside the window
        None => Ok(attribution::analyze_baseline(root, options)?),
    }
}
