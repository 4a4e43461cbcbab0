// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Binary tests for `tasktap replay` and `tasktap sites`.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const WAITING: &str = r#"{"url":"https://freeaiimage.net/api/services/aigc/task?taskId=abc123","response_status":200,"response_body":{"task_type":"qwen_image","status":"waiting","params":{"prompt":"a cat, sitting","width":512,"height":512}},"started_at_ms":1700000000000,"elapsed_ms":120,"source":"xhr"}"#;
const COMPLETED: &str = r#"{"url":"https://freeaiimage.net/api/services/aigc/task?taskId=abc123","response_status":200,"response_body":{"status":"completed","data":["http://x/1.png","http://x/2.png"]},"started_at_ms":1700000004000,"elapsed_ms":90,"source":"fetch"}"#;
const EMPTY_COMPLETION: &str = r#"{"url":"https://freeaiimage.net/api/services/aigc/task?taskId=ffff0000","response_status":200,"response_body":{"status":"completed","data":[]},"started_at_ms":1700000005000,"source":"fetch"}"#;

fn write_calls(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn tasktap() -> Command {
    let mut cmd = Command::cargo_bin("tasktap").unwrap();
    cmd.env_remove("TASKTAP_SITE")
        .env_remove("TASKTAP_CONFIG")
        .env_remove("TASKTAP_LOG");
    cmd
}

#[test]
fn test_replay_json_to_stdout() {
    let calls = write_calls(&[WAITING, COMPLETED, EMPTY_COMPLETION]);

    let output = tasktap()
        .args(["replay", calls.path().to_str().unwrap(), "--site", "freeaiimage"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["task_id"], "abc123");
    assert_eq!(records[0]["status"], "completed");
    assert_eq!(records[0]["parameters"]["prompt"], "a cat, sitting");
}

#[test]
fn test_replay_csv_to_file() {
    let calls = write_calls(&[COMPLETED, WAITING]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.csv");

    tasktap()
        .args([
            "replay",
            calls.path().to_str().unwrap(),
            "--site",
            "freeaiimage",
            "--format",
            "csv",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported to"));

    let csv = std::fs::read_to_string(out).unwrap();
    assert!(csv.starts_with("timestamp,task_id,task_type,prompt,dimensions"));
    assert!(csv.contains(",abc123,qwen_image,\"a cat, sitting\",512x512,,,http://x/1.png|http://x/2.png"));
}

#[test]
fn test_replay_nothing_to_export() {
    let calls = write_calls(&[WAITING, EMPTY_COMPLETION]);

    tasktap()
        .args(["replay", calls.path().to_str().unwrap(), "--site", "freeaiimage"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No completed sessions to export"));
}

#[test]
fn test_replay_site_from_env() {
    let calls = write_calls(&[WAITING, COMPLETED]);

    tasktap()
        .env("TASKTAP_SITE", "freeaiimage")
        .args(["replay", calls.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"));
}

#[test]
fn test_replay_with_config_file() {
    let calls = write_calls(&[WAITING, COMPLETED]);
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        config,
        r#"
name = "custom"
task_url_matchers = [{{ type = "glob", pattern = "*/aigc/task*" }}]
task_id_param_names = ["taskId"]
"#
    )
    .unwrap();
    config.flush().unwrap();

    tasktap()
        .args([
            "replay",
            calls.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://x/2.png"));
}

#[test]
fn test_unknown_config_field_rejected() {
    let calls = write_calls(&[COMPLETED]);
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "task_url_matchers = [\"/task\"]\ntask_id_params = [\"id\"]").unwrap();
    config.flush().unwrap();

    tasktap()
        .args([
            "replay",
            calls.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("task_id_params"));
}

#[test]
fn test_replay_missing_file() {
    tasktap()
        .args(["replay", "/nonexistent/calls.jsonl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/calls.jsonl"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let calls = write_calls(&[WAITING, COMPLETED]);

    tasktap()
        .args(["replay", calls.path().to_str().unwrap(), "--site", "freeaiimage", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("task completed"));
}

#[test]
fn test_sites_lists_presets() {
    tasktap()
        .arg("sites")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("freeaiimage")
                .and(predicate::str::contains("digen"))
                .and(predicate::str::contains("duckduckgo"))
                .and(predicate::str::contains("sora"))
                .and(predicate::str::contains("generic")),
        );
}
