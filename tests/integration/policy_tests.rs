use dupsweep::actions::{
    apply_automatic, apply_manual, resolve_selection, DeleteError, DeleteResult, DryRunRemover,
    FileRemover, Listing, PermanentRemover, SelectionError,
};
use dupsweep::duplicates::DuplicateFinder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Refuses to delete the listed paths, deletes everything else.
struct Refuse(Vec<PathBuf>);

impl FileRemover for Refuse {
    fn remove(&self, path: &Path) -> Result<DeleteResult, DeleteError> {
        if self.0.iter().any(|p| p == path) {
            Err(DeleteError::PermissionDenied(path.to_path_buf()))
        } else {
            PermanentRemover.remove(path)
        }
    }
}

fn hello_world_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"world").unwrap();
    dir
}

#[test]
fn test_manual_selection_end_to_end() {
    let dir = hello_world_tree();
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let listing = Listing::build(&result.groups);
    assert_eq!(listing.len(), 2);

    let report = apply_manual(&listing, "2", &PermanentRemover, None);

    assert_eq!(report.deleted_count(), 1);
    assert_eq!(report.deleted, vec![dir.path().join("b.txt")]);
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_manual_out_of_range_and_garbage() {
    let dir = hello_world_tree();
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let listing = Listing::build(&result.groups);

    let selection = resolve_selection(&listing, "0, 3, abc");

    assert!(selection.paths.is_empty());
    assert_eq!(
        selection.diagnostics,
        vec![
            SelectionError::InvalidIndex {
                index: "0".to_string(),
                max: 2
            },
            SelectionError::InvalidIndex {
                index: "3".to_string(),
                max: 2
            },
            SelectionError::InvalidInput("abc".to_string()),
        ]
    );

    let report = apply_manual(&listing, "0, 3, abc", &PermanentRemover, None);
    assert!(report.nothing_to_delete());
    assert!(dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_manual_valid_tokens_survive_bad_neighbours() {
    let dir = hello_world_tree();
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let listing = Listing::build(&result.groups);

    let report = apply_manual(&listing, "x,2,99", &PermanentRemover, None);

    assert_eq!(report.deleted_count(), 1);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_automatic_keeps_first_of_three() {
    let dir = tempdir().unwrap();
    for name in ["A", "B", "C"] {
        fs::write(dir.path().join(name), b"triplicate").unwrap();
    }

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let report = apply_automatic(&result.groups, &PermanentRemover, None);

    assert_eq!(report.deleted_count(), 2);
    assert_eq!(report.kept, 1);
    assert!(dir.path().join("A").exists());
    assert!(!dir.path().join("B").exists());
    assert!(!dir.path().join("C").exists());
}

#[test]
fn test_rescan_after_automatic_finds_nothing() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("one"), b"1").unwrap();
    fs::write(dir.path().join("sub/one"), b"1").unwrap();
    fs::write(dir.path().join("two"), b"2").unwrap();
    fs::write(dir.path().join("sub/two"), b"2").unwrap();
    fs::write(dir.path().join("sub/two-again"), b"2").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let before = finder.scan(dir.path()).unwrap();
    assert_eq!(before.groups.len(), 2);

    let report = apply_automatic(&before.groups, &PermanentRemover, None);
    assert_eq!(report.deleted_count(), 3);
    assert_eq!(report.kept, 2);

    let after = finder.scan(dir.path()).unwrap();
    assert!(after.is_empty());
    assert_eq!(after.summary.total_files, 2);
}

#[test]
fn test_automatic_partial_failure() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c", "d"] {
        fs::write(dir.path().join(name), b"q").unwrap();
    }
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let blocked = dir.path().join("c");

    let report = apply_automatic(&result.groups, &Refuse(vec![blocked.clone()]), None);

    assert_eq!(report.deleted_count(), 2);
    assert!(report.has_failures());
    assert_eq!(report.failures[0].path, blocked);
    assert!(!dir.path().join("b").exists());
    assert!(blocked.exists());
    assert!(!dir.path().join("d").exists());
}

#[test]
fn test_manual_reports_vanished_file() {
    let dir = hello_world_tree();
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let listing = Listing::build(&result.groups);
    fs::remove_file(dir.path().join("b.txt")).unwrap();

    let report = apply_manual(&listing, "2", &PermanentRemover, None);

    assert_eq!(report.deleted_count(), 0);
    assert_eq!(report.failures.len(), 1);
    assert!(!report.nothing_to_delete());
}

#[test]
fn test_dry_run_mutates_nothing() {
    let dir = hello_world_tree();
    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    let report = apply_automatic(&result.groups, &DryRunRemover, None);

    assert_eq!(report.deleted, vec![dir.path().join("b.txt")]);
    assert_eq!(report.bytes_freed, 5);
    assert!(dir.path().join("b.txt").exists());
}
