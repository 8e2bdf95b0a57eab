use dupsweep::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupsweep::scanner::{Hasher, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let result = finder.scan(dir.path()).unwrap();

    assert!(result.groups.is_empty());
    assert_eq!(result.summary.total_files, 0);
    assert_eq!(result.summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"content a")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"content b")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"content c")
        .unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.summary.total_files, 3);
    assert_eq!(result.summary.hashed_files, 3);
}

#[test]
fn test_scan_hello_world_example() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"world").unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 1);
    let group = &result.groups[0];
    assert_eq!(group.fingerprint, Hasher::hash_bytes(b"hello"));
    assert_eq!(
        group.hash_hex(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(
        group.paths,
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    assert_eq!(result.summary.duplicate_files, 1);
}

#[test]
fn test_scan_first_seen_follows_depth_first_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/inner")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/copy"), b"data").unwrap();
    fs::write(dir.path().join("a/inner/deep"), b"data").unwrap();
    fs::write(dir.path().join("z"), b"data").unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(
        result.groups[0].paths,
        vec![
            dir.path().join("a/inner/deep"),
            dir.path().join("b/copy"),
            dir.path().join("z"),
        ]
    );
}

#[test]
fn test_scan_groups_in_creation_order() {
    let dir = tempdir().unwrap();
    // X is seen first, but Y gets its second member first.
    fs::write(dir.path().join("1"), b"X").unwrap();
    fs::write(dir.path().join("2"), b"Y").unwrap();
    fs::write(dir.path().join("3"), b"Y").unwrap();
    fs::write(dir.path().join("4"), b"X").unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 2);
    assert_eq!(result.groups[0].fingerprint, Hasher::hash_bytes(b"Y"));
    assert_eq!(result.groups[1].fingerprint, Hasher::hash_bytes(b"X"));
}

#[test]
fn test_scan_is_repeatable() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("f{i:02}")), format!("{}", i % 4)).unwrap();
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(8));
    let first = finder.scan(dir.path()).unwrap();
    let second = finder.scan(dir.path()).unwrap();

    let paths = |r: &dupsweep::duplicates::ScanResult| {
        r.groups.iter().map(|g| g.paths.clone()).collect::<Vec<_>>()
    };
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.groups.len(), 4);
    assert!(first.groups.iter().all(|g| g.len() == 5));
}

#[test]
fn test_scan_with_small_buffer_matches_default() {
    let dir = tempdir().unwrap();
    let big = vec![7u8; 100_000];
    fs::write(dir.path().join("a"), &big).unwrap();
    fs::write(dir.path().join("b"), &big).unwrap();

    let small = DuplicateFinder::new(FinderConfig::default().with_buffer_size(4096))
        .scan(dir.path())
        .unwrap();
    let default = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(small.groups[0].fingerprint, default.groups[0].fingerprint);
    assert_eq!(small.groups[0].fingerprint, Hasher::hash_bytes(&big));
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("visible"), b"same").unwrap();
    fs::write(dir.path().join(".hidden"), b"same").unwrap();

    let all = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    assert_eq!(all.groups.len(), 1);

    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(None, true));
    let visible_only = DuplicateFinder::new(config).scan(dir.path()).unwrap();
    assert!(visible_only.is_empty());
    assert_eq!(visible_only.summary.total_files, 1);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = DuplicateFinder::with_defaults().scan(&missing).unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(ref p) if *p == missing));
}

#[test]
fn test_scan_file_as_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let err = DuplicateFinder::with_defaults().scan(&file).unwrap_err();

    assert!(matches!(err, FinderError::NotADirectory(_)));
    assert!(err.to_string().contains("file.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_and_reported() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"keep").unwrap();
    fs::write(dir.path().join("b"), b"keep").unwrap();
    let locked = dir.path().join("locked");
    fs::write(&locked, b"other").unwrap();
    fs::write(dir.path().join("m"), b"other").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // File modes do not stop root
    if fs::read(&locked).is_ok() {
        return;
    }

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(
        result.groups[0].paths,
        vec![dir.path().join("a"), dir.path().join("b")]
    );
    assert_eq!(result.summary.total_files, 4);
    assert_eq!(result.summary.hashed_files, 3);
    assert!(result.summary.has_warnings());
    assert!(result
        .summary
        .scan_errors
        .iter()
        .any(|e| e.path() == locked.as_path()));
}
