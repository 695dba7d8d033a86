//! Binary-level tests. None of these start a browser.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn chroma(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chroma").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    chroma(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_blank_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    chroma(&dir)
        .args(["analyze", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL cannot be empty"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    chroma(&dir)
        .args(["--config", "missing.json", "analyze", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_config_prints_merged_values() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("chroma.config.json"),
        r#"{ "analyzer": { "maxChildren": 10 } }"#,
    )
    .unwrap();

    chroma(&dir)
        .arg("config")
        .env("CHROMA_SERVER__PORT", "9100")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""maxChildren": 10"#))
        .stdout(predicate::str::contains(r#""port": 9100"#));
}

#[test]
fn test_config_check_rejects_invalid_analyzer_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("chroma.config.json"),
        r#"{ "analyzer": { "contentTags": [] } }"#,
    )
    .unwrap();

    chroma(&dir)
        .args(["config", "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contentTags"));
}
