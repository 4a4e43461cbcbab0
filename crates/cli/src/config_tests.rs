// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::io::Write;

#[test]
fn test_parse_minimal_toml() {
    let toml_str = r#"
task_url_matchers = ["/api/services/aigc/task"]
"#;
    let config: MonitorConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(
        config.task_url_matchers,
        vec![UrlMatcherSpec::Substring(
            "/api/services/aigc/task".to_string()
        )]
    );
    assert_eq!(config.task_id_param_names, vec!["task_id", "taskId", "taskid"]);
    assert_eq!(config.completion_status, "completed");
    assert!(config.hex_fallback);
    assert_eq!(config.hex_token_len, 32);
    config.validate().unwrap();
}

#[test]
fn test_parse_tagged_matchers() {
    let toml_str = r#"
name = "digen"
task_id_param_names = ["taskld", "taskId"]
completion_status = "success"
hex_fallback = false
task_url_matchers = [
    { type = "regex", pattern = "/api/.*task" },
    { type = "glob", pattern = "*/video/*" },
    { type = "contains", text = "generate" },
    { type = "any" },
]
"#;
    let config: MonitorConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.name, "digen");
    assert_eq!(config.task_url_matchers.len(), 4);
    assert!(matches!(
        config.task_url_matchers[0],
        UrlMatcherSpec::Pattern(UrlPattern::Regex { .. })
    ));
    assert_eq!(
        config.task_url_matchers[3],
        UrlMatcherSpec::Pattern(UrlPattern::Any)
    );
    assert_eq!(config.completion_status, "success");
    assert!(!config.hex_fallback);
}

#[test]
fn test_unknown_fields_rejected() {
    let toml_str = r#"
task_url_matchers = ["/task"]
polling_interval = 5
"#;
    assert!(toml::from_str::<MonitorConfig>(toml_str).is_err());
}

#[test]
fn test_validate_requires_matcher() {
    let config = MonitorConfig::for_urls(Vec::<String>::new());
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_validate_requires_id_source() {
    let mut config = MonitorConfig::for_urls(["/task"]);
    config.task_id_param_names.clear();
    config.validate().unwrap();

    config.hex_fallback = false;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_alias() {
    let mut config = MonitorConfig::for_urls(["/task"]);
    config.task_id_param_names.push("  ".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_hex_len() {
    let mut config = MonitorConfig::for_urls(["/task"]);
    config.hex_token_len = 0;
    assert!(config.validate().is_err());

    config.hex_fallback = false;
    config.validate().unwrap();
}

#[test]
fn test_load_json_by_extension() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"task_url_matchers": ["/task", {{"type": "any"}}], "task_id_param_names": ["id"]}}"#
    )
    .unwrap();

    let config = MonitorConfig::load(file.path()).unwrap();
    assert_eq!(config.task_url_matchers.len(), 2);
    assert_eq!(config.task_id_param_names, vec!["id"]);
}

#[test]
fn test_load_toml_validates() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "task_url_matchers = []").unwrap();

    assert!(matches!(
        MonitorConfig::load(file.path()),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let result = MonitorConfig::load(std::path::Path::new("/nonexistent/tasktap.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_matcher_display() {
    assert_eq!(
        UrlMatcherSpec::Substring("/task".to_string()).to_string(),
        "contains \"/task\""
    );
    assert_eq!(
        UrlMatcherSpec::Pattern(UrlPattern::Any).to_string(),
        "any url"
    );
}
