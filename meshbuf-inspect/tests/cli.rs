//! Integration tests for meshbuf-inspect
//!
//! Writes small geometry files, runs the built binary, checks its output

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

fn inspect(args: &[&str], input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_meshbuf-inspect"))
        .arg(input)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run meshbuf-inspect")
}

#[test]
fn test_text_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("triangle.obj");
    std::fs::write(&path, TRIANGLE).expect("Failed to write OBJ");

    let output = inspect(&[], &path);
    assert!(output.status.success(), "meshbuf-inspect failed");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("stride=8 color_offset=0 texture_offset=3 normal_offset=5"));
    assert!(stdout.contains("records: 3"));
}

#[test]
fn test_json_dump() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("triangle.obj");
    std::fs::write(&path, TRIANGLE).expect("Failed to write OBJ");

    let output = inspect(&["--json"], &path);
    assert!(output.status.success(), "meshbuf-inspect --json failed");
    let dump: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(dump["summary"]["layout"]["stride"], 8);
    assert_eq!(dump["indices"].as_array().map(Vec::len), Some(3));
    assert_eq!(dump["vertices"].as_array().map(Vec::len), Some(24));
}

#[test]
fn test_quad_rejected_unless_triangulated() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quad.obj");
    std::fs::write(&path, QUAD).expect("Failed to write OBJ");

    let rejected = inspect(&[], &path);
    assert!(!rejected.status.success());

    let triangulated = inspect(&["--faces", "triangulate"], &path);
    assert!(triangulated.status.success());
    let stdout = String::from_utf8(triangulated.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("records: 6"));
}

#[test]
fn test_config_file_sets_loader_options() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quad.obj");
    let config = dir.path().join("meshbuf.toml");
    std::fs::write(&path, QUAD).expect("Failed to write OBJ");
    std::fs::write(&config, "[loader]\nface-arity = \"flatten\"\n").expect("Failed to write config");

    let output = inspect(&["--config", config.to_str().unwrap()], &path);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("records: 4"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = inspect(&[], &dir.path().join("missing.obj"));
    assert!(!output.status.success());
}
