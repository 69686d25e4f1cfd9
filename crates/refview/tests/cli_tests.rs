//! Integration tests for the refview CLI.
//!
//! These run the real binary through `cargo run` against a snapshot written
//! to a temporary directory.

use std::fs;

use tempfile::TempDir;

mod common;
use common::{HERO_SNAPSHOT_JSON, run_refview, run_refview_with_snapshot};

fn snapshot_dir() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("registry.json");
    fs::write(&path, HERO_SNAPSHOT_JSON).expect("write snapshot");
    (dir, path)
}

#[test]
fn cli_help_shows_usage() {
    let output = run_refview(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("refview"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("graph"));
}

#[test]
fn graph_command_prints_both_directions() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(&snapshot, &["graph", "/Game/Hero"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hero"));
    assert!(stdout.contains("Referencers"));
    assert!(stdout.contains("Dependencies"));
    assert!(stdout.contains("Level_01"));
    assert!(stdout.contains("Hero_Mesh"));
    assert!(stdout.contains("Hero_Portrait"));
    assert!(
        !stdout.contains("/Script/Engine"),
        "native packages are hidden by default"
    );
}

#[test]
fn graph_command_honors_hard_only() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(&snapshot, &["graph", "/Game/Hero", "--hard-only"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hero_Mesh"));
    assert!(!stdout.contains("Hero_Portrait"), "soft edge is hidden");
}

#[test]
fn graph_command_shows_natives_on_request() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(
        &snapshot,
        &["graph", "/Game/Hero", "--show-natives"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Engine"));
}

#[test]
fn referencers_command_lists_one_hop() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(&snapshot, &["referencers", "/Game/Hero"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/Game/Level_01"));
    assert!(!stdout.contains("Hero_Mesh"));
}

#[test]
fn dependencies_command_lists_one_hop() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(&snapshot, &["dependencies", "/Game/Hero"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/Game/Hero_Mesh"));
    assert!(stdout.contains("/Game/Hero_Portrait"));
}

#[test]
fn missing_snapshot_flag_fails_with_message() {
    let output = run_refview(&["graph", "/Game/Hero"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--snapshot"));
}

#[test]
fn unreadable_snapshot_reports_error_chain() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write snapshot");

    let output = run_refview_with_snapshot(&path, &["graph", "/Game/Hero"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
    assert!(stderr.contains("broken.json"));
}

#[test]
fn invalid_root_identifier_is_rejected() {
    let (_dir, snapshot) = snapshot_dir();
    let output = run_refview_with_snapshot(&snapshot, &["graph", "NoLeadingSlash"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid asset identifier"));
}
