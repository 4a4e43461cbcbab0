// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task id extraction from URLs and response bodies.

use regex::Regex;
use serde_json::Value;

use crate::config::{ConfigError, MonitorConfig};

/// Body fields that carry a task id, in lookup order
const BODY_ID_FIELDS: &[&str] = &["task_id", "taskid", "taskId", "id"];

/// Ordered rules for finding a task id.
///
/// URL query aliases come first, then the bare hex token scan over the whole
/// URL, then id fields in the response body. First hit wins.
#[derive(Debug, Clone)]
pub struct IdentityRules {
    param_names: Vec<String>,
    hex_token: Option<Regex>,
}

impl IdentityRules {
    pub fn new(config: &MonitorConfig) -> Result<Self, ConfigError> {
        let hex_token = if config.hex_fallback {
            let len = config.hex_token_len;
            Some(Regex::new(&format!(
                r"(?:^|[^0-9A-Fa-f])([0-9A-Fa-f]{{{len}}})(?:[^0-9A-Fa-f]|$)"
            ))?)
        } else {
            None
        };
        Ok(Self {
            param_names: config.task_id_param_names.clone(),
            hex_token,
        })
    }

    /// Task id carried by the URL alone
    pub fn from_url(&self, url: &str) -> Option<String> {
        self.param_names
            .iter()
            .find_map(|name| query_param(url, name))
            .or_else(|| self.hex_token(url))
    }

    /// Task id from the URL, falling back to the response body
    pub fn extract(&self, url: &str, body: &Value) -> Option<String> {
        self.from_url(url).or_else(|| body_task_id(body))
    }

    fn hex_token(&self, url: &str) -> Option<String> {
        let re = self.hex_token.as_ref()?;
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Decoded, non-empty value of query parameter `name` (exact, case-sensitive)
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == name && !value.trim().is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Task id named by the response body, if any
pub fn body_task_id(body: &Value) -> Option<String> {
    BODY_ID_FIELDS
        .iter()
        .find_map(|field| id_value(body.get(field)?))
        .or_else(|| id_value(body.get("params")?.get("task_id")?))
}

/// Ids arrive as strings or numbers
fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
