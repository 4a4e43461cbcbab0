// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task classification: decide whether a settled call is a task poll and,
//! if so, turn it into a [`TaskObservation`].

pub mod extract;
pub mod identity;

use std::sync::Arc;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use tasktap_capture::InterceptedCall;
use thiserror::Error;

use crate::config::{ConfigError, MonitorConfig, UrlMatcherSpec, UrlPattern};
use crate::task::{TaskObservation, TaskStatus};
use extract::{extract_images, extract_parameters, extract_status, extract_task_type, is_task_shaped};
use identity::IdentityRules;

/// Why a call did not become a task observation.
///
/// None of these are failures; most traffic ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyMiss {
    #[error("no JSON body")]
    NoBody,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("URL does not match any task matcher")]
    UrlMismatch,

    #[error("response is not task-shaped")]
    NotTaskShaped,

    #[error("no task id found in {url}")]
    MissingIdentity { url: String },

    #[error("observation time is out of range")]
    TimestampOutOfRange,
}

/// Compiled matcher type for URL matching
type Matcher = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Compiled classification rules for one monitor config
pub struct Classifier {
    matchers: Vec<Matcher>,
    identity: IdentityRules,
    completion_status: String,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("matchers", &self.matchers.len())
            .field("identity", &self.identity)
            .field("completion_status", &self.completion_status)
            .finish()
    }
}

impl Classifier {
    pub fn new(config: &MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let matchers = config
            .task_url_matchers
            .iter()
            .map(compile_matcher)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            matchers,
            identity: IdentityRules::new(config)?,
            completion_status: config.completion_status.clone(),
        })
    }

    /// Whether any configured matcher accepts the URL
    pub fn matches_url(&self, url: &str) -> bool {
        self.matchers.iter().any(|m| m(url))
    }

    pub fn identity(&self) -> &IdentityRules {
        &self.identity
    }

    pub fn classify(&self, call: &InterceptedCall) -> Result<TaskObservation, ClassifyMiss> {
        let body = call.response_body.as_ref().ok_or(ClassifyMiss::NoBody)?;
        if !call.is_success() {
            return Err(ClassifyMiss::HttpStatus(call.response_status));
        }
        if !self.matches_url(&call.url) {
            return Err(ClassifyMiss::UrlMismatch);
        }
        if !is_task_shaped(body) {
            return Err(ClassifyMiss::NotTaskShaped);
        }
        let task_id = self
            .identity
            .extract(&call.url, body)
            .ok_or_else(|| ClassifyMiss::MissingIdentity {
                url: call.url.clone(),
            })?;

        let observed_at = observed_at_utc(call).ok_or(ClassifyMiss::TimestampOutOfRange)?;
        let status = extract_status(body)
            .map(|raw| TaskStatus::parse(raw, &self.completion_status))
            .unwrap_or_default();

        let observation = TaskObservation {
            task_id,
            task_type: extract_task_type(body, &call.url),
            status,
            parameters: extract_parameters(body),
            image_urls: extract_images(body),
            source: call.source,
            observed_at,
        };
        Ok(observation.normalized())
    }
}

/// Observation time as a UTC timestamp, if it fits in one
fn observed_at_utc(call: &InterceptedCall) -> Option<DateTime<Utc>> {
    let since_epoch = call.observed_at()?.duration_since(UNIX_EPOCH).ok()?;
    let millis = i64::try_from(since_epoch.as_millis()).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn compile_matcher(spec: &UrlMatcherSpec) -> Result<Matcher, ConfigError> {
    match spec {
        UrlMatcherSpec::Substring(text) | UrlMatcherSpec::Pattern(UrlPattern::Contains { text }) => {
            let text = text.clone();
            Ok(Arc::new(move |url| url.contains(&text)))
        }
        UrlMatcherSpec::Pattern(UrlPattern::Regex { pattern }) => {
            let re = regex::Regex::new(pattern)?;
            Ok(Arc::new(move |url| re.is_match(url)))
        }
        UrlMatcherSpec::Pattern(UrlPattern::Glob { pattern }) => {
            let glob = glob::Pattern::new(pattern)?;
            Ok(Arc::new(move |url| glob.matches(url)))
        }
        UrlMatcherSpec::Pattern(UrlPattern::Any) => Ok(Arc::new(|_| true)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
