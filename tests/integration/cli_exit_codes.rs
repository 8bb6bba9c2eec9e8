//! Process-level behaviour of the fim binary: exit codes and report output

use super::test_utils::{fim_command, make_tree, write_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_baseline_command_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello"), ("b.txt", "world")]);
    let baseline = temp_dir.path().join("baseline.json");

    let output = fim_command(&temp_dir)
        .arg("baseline")
        .arg(&root)
        .arg("--output")
        .arg(&baseline)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(baseline.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files: 2"), "stdout: {}", stdout);
}

#[test]
fn test_check_with_changes_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello"), ("b.txt", "world")]);
    let baseline = temp_dir.path().join("baseline.json");

    let status = fim_command(&temp_dir)
        .arg("baseline")
        .arg(&root)
        .arg("-o")
        .arg(&baseline)
        .status()
        .unwrap();
    assert!(status.success());

    write_file(&root, "a.txt", "hellp");
    fs::remove_file(root.join("b.txt")).unwrap();
    write_file(&root, "c.txt", "new");

    let output = fim_command(&temp_dir)
        .arg("check")
        .arg(&root)
        .arg("--with")
        .arg(&baseline)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+ c.txt"), "stdout: {}", stdout);
    assert!(stdout.contains("- b.txt"), "stdout: {}", stdout);
    assert!(stdout.contains("! a.txt"), "stdout: {}", stdout);
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_check_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello")]);
    let baseline = temp_dir.path().join("baseline.json");

    fim_command(&temp_dir)
        .arg("baseline")
        .arg(&root)
        .arg("-o")
        .arg(&baseline)
        .status()
        .unwrap();
    write_file(&root, "d.txt", "added");

    let output = fim_command(&temp_dir)
        .arg("check")
        .arg(&root)
        .arg("-w")
        .arg(&baseline)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["new"], serde_json::json!(["d.txt"]));
    assert_eq!(value["unchanged"], 1);
}

#[test]
fn test_missing_root_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");

    let output = fim_command(&temp_dir)
        .arg("baseline")
        .arg(temp_dir.path().join("nope"))
        .arg("-o")
        .arg(&baseline)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!baseline.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
}

#[test]
fn test_missing_baseline_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello")]);

    let output = fim_command(&temp_dir)
        .arg("check")
        .arg(&root)
        .arg("-w")
        .arg(temp_dir.path().join("missing.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_arguments_exit_two() {
    let temp_dir = TempDir::new().unwrap();

    let no_output = fim_command(&temp_dir).args(["baseline", "."]).output().unwrap();
    let no_baseline = fim_command(&temp_dir).args(["check", "."]).output().unwrap();
    let no_mode = fim_command(&temp_dir).output().unwrap();

    assert_eq!(no_output.status.code(), Some(2));
    assert_eq!(no_baseline.status.code(), Some(2));
    assert_eq!(no_mode.status.code(), Some(2));
}

#[test]
fn test_invalid_config_file_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello")]);
    let config = write_file(temp_dir.path(), "fim.toml", "[scan]\nchunk_size = 0\n");

    let output = fim_command(&temp_dir)
        .arg("--config")
        .arg(&config)
        .arg("baseline")
        .arg(&root)
        .arg("-o")
        .arg(temp_dir.path().join("baseline.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
