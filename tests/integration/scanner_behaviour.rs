//! Scanner behaviour on real directory trees

use super::test_utils::{make_tree, write_file};
use fim::config::ScanConfig;
use fim::diff::diff;
use fim::error::ScanError;
use fim::tree::scanner::Scanner;
use fim::tree::walker::WalkerConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_keys_are_relative_and_slash_separated() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(
        &temp_dir,
        &[("top.txt", "1"), ("a/b/c/deep.txt", "2"), ("a/side.txt", "3")],
    );

    let mapping = Scanner::new(&root).scan().unwrap();
    let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["a/b/c/deep.txt", "a/side.txt", "top.txt"]);
    for key in keys {
        assert!(!key.starts_with('/'));
        assert!(!key.contains('\\'));
    }
}

#[test]
fn test_directories_are_not_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("sub/file.txt", "x")]);
    fs::create_dir_all(root.join("empty/nested")).unwrap();

    let mapping = Scanner::new(&root).scan().unwrap();

    assert_eq!(mapping.len(), 1);
    assert!(!mapping.contains_key("sub"));
    assert!(!mapping.contains_key("empty"));
}

#[test]
fn test_root_spelling_does_not_change_keys() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello"), ("sub/b.txt", "world")]);

    let plain = Scanner::new(&root).scan().unwrap();
    let trailing = Scanner::new(PathBuf::from(format!("{}/", root.display())))
        .scan()
        .unwrap();
    let dotted = Scanner::new(root.join(".")).scan().unwrap();
    let roundabout = Scanner::new(root.join("sub").join("..")).scan().unwrap();

    assert_eq!(plain, trailing);
    assert_eq!(plain, dotted);
    assert_eq!(plain, roundabout);
}

#[test]
fn test_repeated_scans_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(
        &temp_dir,
        &[("a.txt", "hello"), ("b/c.txt", "world"), ("b/d/e.bin", "\0\x01")],
    );
    let scanner = Scanner::new(&root);

    assert_eq!(scanner.scan().unwrap(), scanner.scan().unwrap());
}

#[test]
fn test_parallel_scan_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[]);
    for i in 0..64 {
        write_file(&root, &format!("dir{}/file{}.txt", i % 5, i), &format!("content {}", i));
    }

    let sequential = Scanner::new(&root).scan().unwrap();
    let pooled = Scanner::new(&root).with_jobs(4).scan().unwrap();
    let global = Scanner::new(&root).with_jobs(0).scan().unwrap();

    assert_eq!(sequential.len(), 64);
    assert_eq!(sequential, pooled);
    assert_eq!(sequential, global);
}

#[test]
fn test_unicode_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("café/naïve.txt", "unicode"), ("日本語.md", "jp")]);

    let mapping = Scanner::new(&root).scan().unwrap();

    assert!(mapping.contains_key("café/naïve.txt"));
    assert!(mapping.contains_key("日本語.md"));
}

#[test]
fn test_ignore_patterns_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(
        &temp_dir,
        &[("src/main.rs", "fn main() {}"), (".git/HEAD", "ref"), ("target/debug/out", "bin")],
    );
    let config = ScanConfig {
        ignore: vec![".git".to_string(), "target".to_string()],
        ..ScanConfig::default()
    };

    let mapping = Scanner::from_config(&root, &config).scan().unwrap();

    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["src/main.rs"]);
}

#[test]
fn test_max_depth_limits_descent() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("top.txt", "1"), ("a/mid.txt", "2"), ("a/b/low.txt", "3")]);

    let mapping = Scanner::new(&root)
        .with_walker_config(WalkerConfig {
            max_depth: Some(2),
            ..WalkerConfig::default()
        })
        .scan()
        .unwrap();

    assert!(mapping.contains_key("top.txt"));
    assert!(mapping.contains_key("a/mid.txt"));
    assert!(!mapping.contains_key("a/b/low.txt"));
}

#[test]
fn test_excluded_file_is_left_out() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a.txt", "hello"), ("baseline.json", "{}")]);

    let mapping = Scanner::new(&root)
        .exclude_file(&root.join("baseline.json"))
        .scan()
        .unwrap();

    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["a.txt"]);
}

#[test]
fn test_root_that_is_a_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "plain.txt", "not a dir");

    assert!(Scanner::new(&file).scan().is_err());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    let outside = make_tree(&temp_dir, &[("real.txt", "target")]);
    let root = temp_dir.path().join("watched");
    fs::create_dir(&root).unwrap();
    write_file(&root, "own.txt", "own");
    symlink(outside.join("real.txt"), root.join("link.txt")).unwrap();
    symlink(&outside, root.join("linked_dir")).unwrap();

    let mapping = Scanner::new(&root).scan().unwrap();

    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["own.txt"]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("ok.txt", "fine"), ("locked.txt", "secret")]);
    let locked = root.join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still read the file; nothing to assert then
    if fs::read(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let report = Scanner::new(&root).scan_report().unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(report.fingerprints.contains_key("ok.txt"));
    assert!(!report.fingerprints.contains_key("locked.txt"));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key, "locked.txt");
}

/// A file whose name differs from a monitored one only in Unicode
/// normalization still shows up as new
#[test]
fn test_equivalent_name_twin_is_detected() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("caf\u{e9}.txt", "monitored")]);
    let scanner = Scanner::new(&root);
    let baseline = scanner.scan().unwrap();

    write_file(&root, "cafe\u{301}.txt", "planted");
    // Normalizing filesystems store both spellings as one file
    if fs::read_dir(&root).unwrap().count() != 2 {
        return;
    }

    let current = scanner.scan().unwrap();
    let result = diff(&current, &baseline);

    assert_eq!(current.len(), 2);
    assert_eq!(
        result.new.iter().collect::<Vec<_>>(),
        vec!["cafe\u{301}.txt"]
    );
    assert!(result.modified.is_empty());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_names_are_reported_not_merged() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("a\u{fffd}", "literal replacement char")]);
    if fs::write(root.join(OsStr::from_bytes(b"a\xff")), "one").is_err() {
        return;
    }
    fs::write(root.join(OsStr::from_bytes(b"a\xfe")), "two").unwrap();

    let report = Scanner::new(&root).scan_report().unwrap();

    assert_eq!(report.fingerprints.keys().collect::<Vec<_>>(), vec!["a\u{fffd}"]);
    assert_eq!(
        report.fingerprints["a\u{fffd}"].size,
        "literal replacement char".len() as u64
    );
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|s| s.reason.contains("UTF-8")));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_aborts_scan() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = make_tree(&temp_dir, &[("ok.txt", "fine"), ("private/secret.txt", "x")]);
    let private = root.join("private");
    fs::set_permissions(&private, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory; nothing to assert then
    if fs::read_dir(&private).is_ok() {
        fs::set_permissions(&private, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = Scanner::new(&root).scan();
    fs::set_permissions(&private, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(ScanError::Walk { .. })));
}
