//! Git blame invocation and porcelain decoding
//!
//! Runs `git blame --line-porcelain` and decodes its fixed-field metadata
//! blocks into per-line attribution records. The decoder is tag-driven:
//! each recognized metadata line becomes a tagged field, and a record is
//! assembled once all required fields for a source line have been seen.
//! A truncated or misaligned block therefore surfaces as a missing-field
//! error for that file instead of silently shifting every later record.

use std::ffi::OsString;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::ignore::IGNORE_REVS_FILE;
use super::{GitError, run_git};

const FULL_COMMIT_HASH_LENGTH: usize = 40;

/// Attribution of one source line to the commit that last touched it
///
/// The line number is implicit: the first record of a full-file blame is
/// line 1, and order follows file order as emitted by git.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlameLine {
    /// Full 40-character lowercase hex commit hash
    pub commit_hash: String,
    /// Author name, original casing preserved
    pub author_name: String,
    /// Author email with the surrounding angle brackets stripped
    pub author_email: String,
    /// Seconds since epoch; author time for full-file queries, committer
    /// time for single-line-at-commit queries
    pub timestamp: i64,
}

/// Errors from blame invocation or decoding
#[derive(Debug, Error)]
pub enum BlameError {
    /// The underlying git invocation failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// The porcelain output could not be decoded into complete records
    #[error("malformed blame output: {0}")]
    Malformed(String),
}

/// Which porcelain timestamp field a query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeSource {
    /// `author-time`, used by full-file queries
    Author,
    /// `committer-time`, used by single-line-at-commit queries
    Committer,
}

/// Per-line attribution for every line of `file` at the current checkout
///
/// With `with_previous_authors`, the `.git-blame-ignore-revs` sidecar at the
/// repository root is passed to git so attribution looks through the listed
/// commits and reports the prior real author instead. Callers should only
/// request it when the sidecar exists; git fails on a missing file.
pub fn blame_file(
    root: &Path,
    file: &Path,
    with_previous_authors: bool,
) -> Result<Vec<BlameLine>, BlameError> {
    let mut args: Vec<OsString> = vec!["blame".into(), "-w".into(), "--line-porcelain".into()];
    if with_previous_authors {
        args.push("--ignore-revs-file".into());
        args.push(IGNORE_REVS_FILE.into());
    }
    args.push("--".into());
    args.push(file.as_os_str().to_owned());

    let raw = run_git(root, args)?;
    decode_records(&raw, TimeSource::Author)
}

/// Attribution of one line of `file` as of `commit_hash`
///
/// The timestamp is the committer time of the attributed commit; single-line
/// historical queries always read committer time, unlike the full-file path.
pub fn blame_line(
    root: &Path,
    commit_hash: &str,
    file: &Path,
    line_number: u32,
) -> Result<BlameLine, BlameError> {
    let range = format!("{line_number},+1");
    let args: Vec<OsString> = vec![
        "blame".into(),
        "-w".into(),
        "--line-porcelain".into(),
        "-L".into(),
        range.into(),
        commit_hash.into(),
        "--".into(),
        file.as_os_str().to_owned(),
    ];

    let raw = run_git(root, &args)?;
    if raw.trim().is_empty() {
        return Err(GitError::EmptyOutput {
            command: format!("blame {commit_hash} -L {line_number},+1"),
        }
        .into());
    }

    let records = decode_records(&raw, TimeSource::Committer)?;
    records
        .into_iter()
        .next()
        .ok_or_else(|| BlameError::Malformed("no blame record in output".to_string()))
}

/// One recognized metadata line of porcelain output
///
/// Anything not listed here (file content, `summary`, `filename`, committer
/// name/mail, ...) is discarded before record assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    /// `<40-hex> <orig> <final> [<group>]` record header
    Header(String),
    /// `author <name>`
    Author(String),
    /// `author-mail <<email>>`
    AuthorMail(String),
    /// `author-time <epoch>`
    AuthorTime(i64),
    /// `committer-time <epoch>`
    CommitterTime(i64),
}

fn decode_field(line: &str) -> Option<Field> {
    // Prefix checks are ordered longest-first: `author ` is a prefix of
    // nothing, but `author` itself prefixes `author-mail` and `author-time`.
    if let Some(rest) = line.strip_prefix("author-mail ") {
        let email = rest.trim().trim_start_matches('<').trim_end_matches('>');
        return Some(Field::AuthorMail(email.to_string()));
    }
    if let Some(rest) = line.strip_prefix("author-time ") {
        return rest.trim().parse().ok().map(Field::AuthorTime);
    }
    if let Some(rest) = line.strip_prefix("committer-time ") {
        return rest.trim().parse().ok().map(Field::CommitterTime);
    }
    if let Some(rest) = line.strip_prefix("author ") {
        return Some(Field::Author(rest.to_string()));
    }
    if is_commit_header(line) {
        return Some(Field::Header(line[..FULL_COMMIT_HASH_LENGTH].to_string()));
    }
    None
}

/// Whether a line is a `<40-hex> <orig> <final> ...` record header
fn is_commit_header(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > FULL_COMMIT_HASH_LENGTH
        && bytes[FULL_COMMIT_HASH_LENGTH] == b' '
        && bytes[..FULL_COMMIT_HASH_LENGTH]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}

/// Accumulates tagged fields until a record can be assembled
#[derive(Debug)]
struct RecordBuilder {
    commit_hash: String,
    author_name: Option<String>,
    author_email: Option<String>,
    author_time: Option<i64>,
    committer_time: Option<i64>,
}

impl RecordBuilder {
    fn new(commit_hash: String) -> Self {
        Self {
            commit_hash,
            author_name: None,
            author_email: None,
            author_time: None,
            committer_time: None,
        }
    }

    fn set(&mut self, field: Field) {
        match field {
            Field::Author(name) => self.author_name = Some(name),
            Field::AuthorMail(email) => self.author_email = Some(email),
            Field::AuthorTime(time) => self.author_time = Some(time),
            Field::CommitterTime(time) => self.committer_time = Some(time),
            // Headers start a new builder in the decode loop
            Field::Header(_) => {}
        }
    }

    fn finish(self, source: TimeSource, line_number: usize) -> Result<BlameLine, BlameError> {
        let missing = |field: &str| {
            BlameError::Malformed(format!("line {line_number}: missing {field} field"))
        };

        let timestamp = match source {
            TimeSource::Author => self.author_time.ok_or_else(|| missing("author-time"))?,
            TimeSource::Committer => {
                self.committer_time.ok_or_else(|| missing("committer-time"))?
            }
        };

        Ok(BlameLine {
            commit_hash: self.commit_hash,
            author_name: self.author_name.ok_or_else(|| missing("author"))?,
            author_email: self.author_email.ok_or_else(|| missing("author-mail"))?,
            timestamp,
        })
    }
}

/// Decode raw porcelain text into one record per source line, in file order
fn decode_records(raw: &str, source: TimeSource) -> Result<Vec<BlameLine>, BlameError> {
    let mut records = Vec::new();
    let mut current: Option<RecordBuilder> = None;

    for line in raw.lines() {
        let Some(field) = decode_field(line) else {
            continue;
        };

        if let Field::Header(hash) = field {
            if let Some(builder) = current.take() {
                records.push(builder.finish(source, records.len() + 1)?);
            }
            current = Some(RecordBuilder::new(hash));
        } else if let Some(builder) = current.as_mut() {
            builder.set(field);
        } else {
            return Err(BlameError::Malformed(
                "metadata line before any commit header".to_string(),
            ));
        }
    }

    if let Some(builder) = current.take() {
        records.push(builder.finish(source, records.len() + 1)?);
    }

    Ok(records)
}
