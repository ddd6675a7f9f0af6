//! Tests for unified diff parsing
//!
//! DiffParser discovers changed files and their added line ranges from raw
//! `git diff` text, skipping blocks it cannot attribute instead of failing.

use std::path::PathBuf;

use lineage::git::diff::{LineRange, extract_changed_files};

/// A realistic per-file diff block with the given new-side hunks
fn file_block(path: &str, hunks: &[(u32, u32, u32, u32)]) -> String {
    let mut block = format!(
        "diff --git a/{path} b/{path}\n\
         index 1111111..2222222 100644\n\
         --- a/{path}\n\
         +++ b/{path}\n"
    );
    for &(old_start, old_count, new_start, new_count) in hunks {
        block += &format!("@@ -{old_start},{old_count} +{new_start},{new_count} @@\n");
        block += "+added line\n";
    }
    block
}

// =============================================================================
// Record Extraction
// =============================================================================

#[test]
fn one_record_per_block_in_header_order() {
    let diff = file_block("src/a.rs", &[(1, 0, 1, 3)])
        + &file_block("src/b.rs", &[(5, 2, 5, 2)])
        + &file_block("docs/c.md", &[(10, 1, 10, 4)]);

    let changed = extract_changed_files(&diff);
    assert_eq!(changed.len(), 3);
    assert_eq!(changed[0].path, PathBuf::from("src/a.rs"));
    assert_eq!(changed[1].path, PathBuf::from("src/b.rs"));
    assert_eq!(changed[2].path, PathBuf::from("docs/c.md"));
}

#[test]
fn hunk_ranges_parsed_in_order() {
    let diff = file_block("src/a.rs", &[(1, 0, 1, 3), (20, 2, 22, 5)]);

    let changed = extract_changed_files(&diff);
    assert_eq!(
        changed[0].added_ranges,
        vec![
            LineRange { start: 1, count: 3 },
            LineRange { start: 22, count: 5 },
        ]
    );
}

#[test]
fn omitted_count_means_one_line() {
    let diff = "diff --git a/f.txt b/f.txt\n\
                index 1111111..2222222 100644\n\
                --- a/f.txt\n\
                +++ b/f.txt\n\
                @@ -1 +1 @@\n\
                +changed\n";

    let changed = extract_changed_files(diff);
    assert_eq!(changed[0].added_ranges, vec![LineRange { start: 1, count: 1 }]);
}

#[test]
fn new_file_yields_single_spanning_range() {
    let diff = "diff --git a/new.txt b/new.txt\n\
                new file mode 100644\n\
                index 0000000..2222222\n\
                --- /dev/null\n\
                +++ b/new.txt\n\
                @@ -0,0 +1,5 @@\n\
                +one\n+two\n+three\n+four\n+five\n";

    let changed = extract_changed_files(diff);
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].added_ranges, vec![LineRange { start: 1, count: 5 }]);
}

#[test]
fn deletions_only_file_has_empty_ranges() {
    // "No lines to track", not "all lines"
    let diff = "diff --git a/f.txt b/f.txt\n\
                index 1111111..2222222 100644\n\
                --- a/f.txt\n\
                +++ b/f.txt\n\
                @@ -3,4 +2,0 @@\n\
                -gone\n-gone\n-gone\n-gone\n";

    let changed = extract_changed_files(diff);
    assert_eq!(changed.len(), 1);
    assert!(changed[0].added_ranges.is_empty());
}

// =============================================================================
// Skipped Blocks
// =============================================================================

#[test]
fn deleted_file_block_yields_no_record() {
    let diff = "diff --git a/old.txt b/old.txt\n\
                deleted file mode 100644\n\
                index 1111111..0000000\n\
                --- a/old.txt\n\
                +++ /dev/null\n\
                @@ -1,3 +0,0 @@\n\
                -one\n-two\n-three\n";

    assert!(extract_changed_files(diff).is_empty());
}

#[test]
fn rename_block_without_marker_skipped_silently() {
    let diff = "diff --git a/before.rs b/after.rs\n\
                similarity index 100%\n\
                rename from before.rs\n\
                rename to after.rs\n";

    assert!(extract_changed_files(diff).is_empty());
}

#[test]
fn invalid_path_skips_only_that_file() {
    let diff = file_block("src/first.rs", &[(1, 0, 1, 2)])
        + &file_block("../escape.rs", &[(1, 0, 1, 2)])
        + &file_block("src/third.rs", &[(1, 0, 1, 2)]);

    let changed = extract_changed_files(&diff);
    assert_eq!(changed.len(), 2);
    assert_eq!(changed[0].path, PathBuf::from("src/first.rs"));
    assert_eq!(changed[1].path, PathBuf::from("src/third.rs"));
}

#[test]
fn path_with_spaces_accepted() {
    let diff = file_block("dir with spaces/my file.txt", &[(1, 0, 1, 1)]);

    let changed = extract_changed_files(&diff);
    assert_eq!(changed[0].path, PathBuf::from("dir with spaces/my file.txt"));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn parsing_is_idempotent() {
    let diff = file_block("src/a.rs", &[(1, 0, 1, 3)])
        + &file_block("src/b.rs", &[(5, 2, 5, 2)]);

    let first = extract_changed_files(&diff);
    let second = extract_changed_files(&diff);
    assert_eq!(first, second);
}

#[test]
fn empty_diff_yields_nothing() {
    assert!(extract_changed_files("").is_empty());
}
