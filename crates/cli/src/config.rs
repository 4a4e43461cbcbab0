// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor configuration loaded from TOML/JSON files or site presets.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Status string that marks a finished task unless a site overrides it
pub const DEFAULT_COMPLETION_STATUS: &str = "completed";
/// Length of the bare hex task id scanned for when no alias matches
pub const DEFAULT_HEX_TOKEN_LEN: usize = 32;
/// Query parameter names tried when a config does not list its own
pub const DEFAULT_TASK_ID_PARAMS: &[&str] = &["task_id", "taskId", "taskid"];

fn default_task_id_params() -> Vec<String> {
    DEFAULT_TASK_ID_PARAMS.iter().map(|s| s.to_string()).collect()
}

fn default_completion_status() -> String {
    DEFAULT_COMPLETION_STATUS.to_string()
}

fn default_hex_fallback() -> bool {
    true
}

fn default_hex_token_len() -> usize {
    DEFAULT_HEX_TOKEN_LEN
}

/// Errors that can occur loading or compiling a monitor config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Which requests count as task polls and how task ids are found in them
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Name for logging/debugging
    #[serde(default)]
    pub name: String,

    /// A URL is a task poll when any matcher accepts it
    pub task_url_matchers: Vec<UrlMatcherSpec>,

    /// Query parameter aliases carrying the task id, tried in order
    #[serde(default = "default_task_id_params")]
    pub task_id_param_names: Vec<String>,

    /// The site's status word for a finished task (default: "completed")
    #[serde(default = "default_completion_status")]
    pub completion_status: String,

    /// Scan the whole URL for a bare hex token when no alias matches
    #[serde(default = "default_hex_fallback")]
    pub hex_fallback: bool,

    /// Exact length of the hex token (default: 32)
    #[serde(default = "default_hex_token_len")]
    pub hex_token_len: usize,
}

impl MonitorConfig {
    /// Config accepting the given URL substrings with default id handling
    pub fn for_urls<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: String::new(),
            task_url_matchers: substrings
                .into_iter()
                .map(|s| UrlMatcherSpec::Substring(s.into()))
                .collect(),
            task_id_param_names: default_task_id_params(),
            completion_status: default_completion_status(),
            hex_fallback: default_hex_fallback(),
            hex_token_len: default_hex_token_len(),
        }
    }

    /// Load a config from a TOML or JSON file (chosen by extension)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: MonitorConfig = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task_url_matchers.is_empty() {
            return Err(ConfigError::Validation(
                "task_url_matchers must list at least one matcher".to_string(),
            ));
        }
        if self.task_id_param_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "task_id_param_names must not contain empty names".to_string(),
            ));
        }
        if self.task_id_param_names.is_empty() && !self.hex_fallback {
            return Err(ConfigError::Validation(
                "no way to find a task id: task_id_param_names is empty and hex_fallback is off"
                    .to_string(),
            ));
        }
        if self.hex_fallback && self.hex_token_len == 0 {
            return Err(ConfigError::Validation(
                "hex_token_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// URL matcher: a bare string is a substring match
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UrlMatcherSpec {
    Substring(String),
    Pattern(UrlPattern),
}

/// Tagged URL matcher
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UrlPattern {
    /// Contains substring
    Contains { text: String },
    /// Regex pattern
    Regex { pattern: String },
    /// Glob pattern (shell-style wildcards over the whole URL)
    Glob { pattern: String },
    /// Match any URL
    Any,
}

impl std::fmt::Display for UrlMatcherSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring(text) | Self::Pattern(UrlPattern::Contains { text }) => {
                write!(f, "contains {:?}", text)
            }
            Self::Pattern(UrlPattern::Regex { pattern }) => write!(f, "regex {}", pattern),
            Self::Pattern(UrlPattern::Glob { pattern }) => write!(f, "glob {}", pattern),
            Self::Pattern(UrlPattern::Any) => f.write_str("any url"),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
