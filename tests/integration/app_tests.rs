use clap::Parser;
use dupsweep::cli::Cli;
use dupsweep::error::ExitCode;
use dupsweep::run_session;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str], input: &str) -> (anyhow::Result<ExitCode>, String) {
    yansi::disable();
    let mut argv = vec!["dupsweep", "--quiet"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let result = run_session(&cli, &mut input, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn hello_world_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"world").unwrap();
    dir
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_fully_interactive_manual_session() {
    let dir = hello_world_tree();
    let input = format!("{}\n1\n2\n", dir.path().display());

    let (result, out) = run(&[], &input);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Directory to scan:"));
    assert!(out.contains("Duplicate files:"));
    assert!(out.contains("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"));
    assert!(out.contains("How should duplicates be removed?"));
    assert!(out.contains("Deleted"));
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_menu_choice_two_is_automatic() {
    let dir = tempdir().unwrap();
    for name in ["A", "B", "C"] {
        fs::write(dir.path().join(name), b"same").unwrap();
    }

    let (result, out) = run(&[arg(dir.path())], "2\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.contains("Enter file numbers"));
    assert!(out.contains("kept"));
    assert!(dir.path().join("A").exists());
    assert!(!dir.path().join("B").exists());
    assert!(!dir.path().join("C").exists());
}

#[test]
fn test_flags_skip_every_prompt() {
    let dir = hello_world_tree();

    let (result, out) = run(&[arg(dir.path()), "--policy", "manual", "--select", "2"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.contains("How should duplicates be removed?"));
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_bad_tokens_are_reported() {
    let dir = hello_world_tree();

    let (result, out) = run(&[arg(dir.path()), "-p", "manual"], "0,abc,7\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("invalid index: 0"));
    assert!(out.contains("invalid input: 'abc'"));
    assert!(out.contains("invalid index: 7"));
    assert!(out.contains("Nothing to delete."));
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_invalid_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"x").unwrap();

    let (result, out) = run(&[arg(&file)], "");

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Not a directory"));
    assert!(!out.contains("Duplicate files:"));
    assert!(file.exists());
}

#[test]
fn test_prompted_missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let input = format!("{}\n", dir.path().join("nope").display());

    let (result, _out) = run(&[], &input);

    assert!(format!("{:#}", result.unwrap_err()).contains("Path not found"));
}

#[test]
fn test_no_duplicates_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), b"1").unwrap();
    fs::write(dir.path().join("two"), b"2").unwrap();

    let (result, out) = run(&[arg(dir.path())], "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(out.contains("No duplicate files found."));
    assert!(!out.contains("How should duplicates be removed?"));
}

#[test]
fn test_list_only_never_deletes() {
    let dir = hello_world_tree();

    let (result, out) = run(&[arg(dir.path()), "--list-only"], "2\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("  1. "));
    assert!(out.contains("  2. "));
    assert!(!out.contains("How should duplicates be removed?"));
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_dry_run_automatic() {
    let dir = hello_world_tree();

    let (result, out) = run(&[arg(dir.path()), "--policy", "auto", "--dry-run"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Would delete"));
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_json_automatic_report() {
    let dir = hello_world_tree();

    let (result, out) = run(&[arg(dir.path()), "--output", "json", "--policy", "auto"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["report"]["policy"], "automatic");
    assert_eq!(value["report"]["kept"], 1);
    assert_eq!(value["exit_code"], 0);
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_json_no_duplicates() {
    let dir = tempdir().unwrap();

    let (result, out) = run(&[arg(dir.path()), "--output", "json"], "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["exit_code_name"], "DS002");
    assert!(value["report"].is_null());
}

#[test]
fn test_json_requires_path() {
    let (result, out) = run(&["--output", "json"], "/tmp\n");

    assert!(result.is_err());
    assert!(out.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_gives_partial_success() {
    use std::os::unix::fs::PermissionsExt;

    let dir = hello_world_tree();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // File modes do not stop root
    if fs::read(&locked).is_ok() {
        return;
    }

    let (result, out) = run(&[arg(dir.path()), "--policy", "auto"], "");

    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert!(out.contains("warning:"));
    assert!(out.contains(&locked.display().to_string()));
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());

    let (result, out) = run(&[arg(dir.path()), "--output", "json"], "");
    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value["summary"]["warnings"][0]["path"],
        locked.display().to_string()
    );
}
