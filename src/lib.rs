//! lineage - per-line authorship attribution from git history
//!
//! This library answers two questions about a repository at a point in time:
//! which lines changed in a given window, and who (and when) last modified
//! each surviving line. It parses the textual output of `git diff` and
//! `git blame --line-porcelain` into structured records and correlates the
//! two into per-file tracked-line attribution.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod attribution;
pub mod config;
pub mod git;
pub mod output;
pub mod report;
