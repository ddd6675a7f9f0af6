//! Tests for the ignore-revisions sidecar

use lineage::git::ignore::{IGNORE_REVS_FILE, IgnoredRevisions};

use crate::common::TempGitRepo;

#[test]
fn missing_sidecar_is_an_empty_set() {
    let repo = TempGitRepo::new();
    let revs = IgnoredRevisions::load(repo.path());
    assert!(revs.is_empty());
    assert_eq!(revs.len(), 0);
}

#[test]
fn entries_loaded_in_file_order() {
    let repo = TempGitRepo::new();
    repo.write_file(
        IGNORE_REVS_FILE,
        "# mass reformat, 2026-01\n\
         aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\n\
         \n\
         bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\n",
    );

    let revs = IgnoredRevisions::load(repo.path());
    assert_eq!(revs.len(), 2);
    assert_eq!(
        revs.revisions(),
        [
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        ]
    );
}

#[test]
fn unknown_identifiers_are_tolerated() {
    let repo = TempGitRepo::new();
    repo.write_file(IGNORE_REVS_FILE, "not-even-a-hash\n");

    let revs = IgnoredRevisions::load(repo.path());
    assert_eq!(revs.len(), 1);
}
