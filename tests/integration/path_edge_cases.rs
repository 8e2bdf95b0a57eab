use dupsweep::actions::{apply_manual, Listing, PermanentRemover};
use dupsweep::duplicates::DuplicateFinder;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_unicode_and_spaces_in_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("résumé final.txt"), b"cv").unwrap();
    fs::write(dir.path().join("日本語 コピー.txt"), b"cv").unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert!(result.groups[0]
        .paths
        .contains(&dir.path().join("日本語 コピー.txt")));
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    fs::File::create(dir.path().join("empty1")).unwrap();
    fs::File::create(dir.path().join("empty2")).unwrap();
    fs::write(dir.path().join("full"), b"x").unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(
        result.groups[0].hash_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_same_name_in_different_directories() {
    let dir = tempdir().unwrap();
    for sub in ["x", "y"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("same.txt"), b"payload").unwrap();
    }

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let listing = Listing::build(&result.groups);
    let report = apply_manual(&listing, "1", &PermanentRemover, None);

    assert_eq!(report.deleted, vec![dir.path().join("x/same.txt")]);
    assert!(dir.path().join("y/same.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_grouped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), b"target").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

    let result = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.summary.total_files, 1);
}
