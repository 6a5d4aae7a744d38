//! CLI integration tests for the `particles` binary
//!
//! These tests run the built binary and check its output.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn particles_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_particles"))
}

/// Run from an empty temp dir so no stray particles.toml is picked up
fn isolated_command(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(particles_binary());
    cmd.current_dir(dir.path()).env("XDG_CONFIG_HOME", dir.path().join("xdg"));
    cmd
}

#[test]
fn test_spawn_html_default() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&dir)
        .args(["spawn", "--seed", "1"])
        .output()
        .expect("Failed to execute particles");

    assert!(output.status.success(), "spawn failed: {}", String::from_utf8_lossy(&output.stderr));
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.starts_with("<div id=\"particles\">"));
    assert_eq!(html.matches("class=\"particle\"").count(), 250);
    assert_eq!(html.matches("animation-delay:").count(), 250);
}

#[test]
fn test_spawn_json_count() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&dir)
        .args(["spawn", "-n", "12", "--format", "json"])
        .output()
        .expect("Failed to execute particles");

    assert!(output.status.success());
    let particles: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(particles.len(), 12);
    for p in &particles {
        let size = p["size_px"].as_f64().unwrap();
        assert!((2.0..6.0).contains(&size));
    }
}

#[test]
fn test_spawn_seed_is_reproducible() {
    let dir = tempfile::TempDir::new().unwrap();
    let run = || {
        isolated_command(&dir)
            .args(["spawn", "--seed", "99", "--format", "json"])
            .output()
            .expect("Failed to execute particles")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_spawn_writes_output_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("field.html");
    let output = isolated_command(&dir)
        .args(["spawn", "--container", "stars", "--class", "star", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute particles");

    assert!(output.status.success());
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<div id=\"stars\">"));
    assert_eq!(html.matches("class=\"star\"").count(), 250);
}

#[test]
fn test_spawn_uses_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("particles.toml"), "[spawner]\ncount = 3\n").unwrap();
    let output = isolated_command(&dir)
        .args(["spawn", "--format", "json"])
        .output()
        .expect("Failed to execute particles");

    assert!(output.status.success());
    let particles: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(particles.len(), 3);
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("particles.toml"), "[ranges]\nsize = [6.0, 2.0]\n").unwrap();
    let output = isolated_command(&dir).arg("spawn").output().expect("Failed to execute particles");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ranges.size"));
}

#[test]
fn test_config_command_prints_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&dir).arg("config").output().expect("Failed to execute particles");

    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("count = 250"));
    assert!(text.contains("container_id = \"particles\""));
    assert!(text.contains("duration = [5.0, 10.0]"));
}

#[test]
fn test_spawn_huge_count_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&dir)
        .args(["spawn", "-n", "18446744073709551615", "--format", "json"])
        .output()
        .expect("Failed to execute particles");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_count_above_limit_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("particles.toml"), "[spawner]\ncount = 1000000\n").unwrap();
    let output = isolated_command(&dir).arg("spawn").output().expect("Failed to execute particles");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("spawner.count"));
}
