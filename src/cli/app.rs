//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use lineage::output::OutputMode;

/// lineage - per-line authorship attribution from git history
#[derive(Parser, Debug)]
#[command(
    name = "lineage",
    version,
    about = "Per-line authorship attribution from git history",
    long_about = "Determine which lines of a repository changed in a window and\n\
                  who (and when) last modified each surviving line.\n\n\
                  Attribution is aggregated into per-author tracked-line counts."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one or more repositories and report per-author contributions
    Analyze {
        /// Repository working copy to analyze
        #[arg(short, long, conflicts_with = "config")]
        repo: Option<PathBuf>,

        /// TOML file listing repositories to analyze
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Branch to check out before analysis
        #[arg(short, long)]
        branch: Option<String>,

        /// Window start date (YYYY-MM-DD or RFC 3339); changes since the
        /// last commit before this date are tracked
        #[arg(long)]
        since: Option<String>,

        /// Checkout cutoff date; the working copy is moved to the last
        /// commit at or before it
        #[arg(long)]
        until: Option<String>,

        /// Look through commits listed in .git-blame-ignore-revs and
        /// attribute lines to the prior real author
        #[arg(long)]
        previous_authors: bool,
    },

    /// List the files changed since a commit, with added line ranges
    Files {
        /// Repository working copy
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Commit to diff the working tree against
        commit: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Analyze {
            repo,
            config,
            branch,
            since,
            until,
            previous_authors,
        }) => commands::analyze(
            repo,
            config,
            branch,
            since,
            until,
            previous_authors,
            output_mode,
        ),
        Some(Command::Files { repo, commit }) => commands::files(&repo, &commit, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("lineage v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        }
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("lineage v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'lineage --help' for usage");
                println!("Run 'lineage analyze --repo .' to analyze the current repository");
            }
            Ok(())
        }
    }
}
