// Rust guideline compliant 2026-10-19

//! Integration tests for `assert_dir_equal` and path comparison.
//!
//! These tests validate specific scenarios: flat and nested trees, single
//! files, binary files, empty directories and multi-file mismatches.

use direq_core::{
    assert_dir_equal, compare_paths, ColorMode, Config, Error, Options, PathDiff, Renderer,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("File has a parent")).expect("Failed to create dirs");
    fs::write(path, content).expect("Failed to write file");
}

fn mismatch_lines(received: &Path, expected: &Path) -> Vec<String> {
    match assert_dir_equal(received, expected) {
        Err(Error::Mismatch(mismatch)) => mismatch.lines,
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(()) => panic!("Expected a mismatch"),
    }
}

#[test]
fn test_flat_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    write(&received, "file", "content\n");
    write(&expected, "file", "content\n");

    direq_core::assert_dir_equal!(&received, &expected);
}

#[test]
fn test_nested_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    for root in [&received, &expected] {
        write(root, "file", "content\n");
        write(root, "sub/file", "sub directory file\n");
        write(root, "sub/nested/file", "nested directory file\n");
    }

    assert!(assert_dir_equal(&received, &expected).is_ok());
}

#[test]
fn test_single_text_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "r/file", "content\n");
    write(temp_dir.path(), "e/file", "content\n");

    let diff = compare_paths(
        &temp_dir.path().join("r/file"),
        &temp_dir.path().join("e/file"),
        &Options::default(),
    )
    .expect("Failed to compare");
    assert!(matches!(diff, PathDiff::File(_)));
    assert!(!diff.is_different().expect("Failed to read files"));
}

#[test]
fn test_empty_directories_are_equal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    fs::create_dir_all(&received).expect("Failed to create dir");
    write(&expected, direq_core::GITKEEPER, "");

    assert!(assert_dir_equal(&received, &expected).is_ok());
}

#[test]
fn test_empty_received_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    fs::create_dir_all(&received).expect("Failed to create dir");
    write(&expected, "file", "content\n");

    assert_eq!(
        mismatch_lines(&received, &expected),
        vec!["+++ N/A", "--- missing: <snapshot>/file"]
    );
}

#[test]
fn test_binary_file_size_differs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "r/file.bin", [0x00, 0x00]);
    write(temp_dir.path(), "e/file.bin", [0x00]);

    assert_eq!(
        mismatch_lines(
            &temp_dir.path().join("r/file.bin"),
            &temp_dir.path().join("e/file.bin")
        ),
        vec!["🚫 file.bin: binary files sizes differs"]
    );
}

#[test]
fn test_file_formats() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    write(&received, "test.json", "{\n}");
    write(&expected, "test.json", "{}\n");
    write(
        &received,
        "test.yaml",
        "key: value\nother: changed value\nlast: new value\nnew: key\n",
    );
    write(&expected, "test.yaml", "key: value\nother: value\nlast: value\n");
    write(&received, "file.added", "I am not in the snapshot");

    let lines = mismatch_lines(&received, &expected);
    assert_eq!(
        lines,
        vec![
            "--- <snapshot>/test.json",
            "+++ <received>/test.json",
            "@@ -1 +1,2 @@",
            "- {[-}-]",
            "+ {",
            "+ }",
            "--- <snapshot>/test.yaml",
            "+++ <received>/test.yaml",
            "@@ -1,3 +1,4 @@",
            " key: value",
            "- other: value",
            "- last: value",
            "+ other: {+changed +}value",
            "+ last:{+ new+} value",
            "+ new: key",
            "+++ added: <received>/file.added",
            "--- N/A",
        ]
    );
}

#[test]
fn test_mismatch_message_includes_paths() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    write(&received, "extra", "extra\n");
    fs::create_dir_all(&expected).expect("Failed to create dir");

    let err = assert_dir_equal(&received, &expected).expect_err("Trees should differ");
    let message = err.to_string();
    assert!(message.contains("does not match"));
    assert!(message.contains("+++ added: <received>/extra"));
}

#[test]
#[should_panic(expected = "missing: <snapshot>/file")]
fn test_macro_panics_on_mismatch() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    fs::create_dir_all(&received).expect("Failed to create dir");
    write(&expected, "file", "content\n");

    direq_core::assert_dir_equal!(&received, &expected);
}

#[test]
fn test_options_from_config() {
    let config = Config {
        color: ColorMode::Always,
        context_lines: 1,
        ignore: vec!["*.log".to_string()],
        ..Config::default()
    };
    let options = Options::from_config(&config, false).expect("Failed to build options");
    assert!(options.renderer.is_colored());
    assert_eq!(options.context, 1);
    assert!(options.filter.is_ignored_name("debug.log"));
    assert_ne!(options.renderer, Renderer::plain());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (received, expected) = (temp_dir.path().join("r"), temp_dir.path().join("e"));
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    for root in [&received, &expected] {
        fs::create_dir_all(root.join("sub")).expect("Failed to create dirs");
        fs::write(root.join("sub").join(name), "same\n").expect("Failed to write file");
    }

    assert_dir_equal(&received, &expected).expect("Identical trees should match");

    fs::write(received.join("sub").join(name), "other\n").expect("Failed to write file");
    let lines = mismatch_lines(&received, &expected);
    assert_eq!(lines[0], "--- <snapshot>/sub/caf\u{FFFD}.txt");
    assert_eq!(lines[1], "+++ <received>/sub/caf\u{FFFD}.txt");
}
