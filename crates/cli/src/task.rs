// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized task records and per-call observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use tasktap_capture::CallSource;

/// Task type reported when no response ever named one
pub const UNKNOWN_TASK_TYPE: &str = "unknown";

/// Lifecycle status of a generation task.
///
/// Variants are declared in lifecycle rank order. `Completed` and `Error` are
/// terminal; nothing leaves them.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Unknown,
    Waiting,
    Processing,
    Error,
    Completed,
}

impl TaskStatus {
    /// Position in the lifecycle `unknown < waiting < processing < error < completed`
    pub fn rank(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Waiting => 1,
            Self::Processing => 2,
            Self::Error => 3,
            Self::Completed => 4,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Map a status string from a polling response.
    ///
    /// `completion_status` is the site's own word for "done" and always maps
    /// to [`TaskStatus::Completed`].
    pub fn parse(raw: &str, completion_status: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        if !completion_status.is_empty() && normalized == completion_status.to_ascii_lowercase() {
            return Self::Completed;
        }
        match normalized.as_str() {
            "waiting" | "pending" | "queued" | "queueing" => Self::Waiting,
            "processing" | "running" | "generating" | "in_progress" => Self::Processing,
            "completed" | "success" | "succeeded" | "done" | "finished" => Self::Completed,
            "error" | "failed" | "failure" | "cancelled" => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Waiting => "waiting",
            Self::Processing => "processing",
            Self::Error => "error",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation parameters. An empty `prompt` means "not known yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParameters {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
}

impl TaskParameters {
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty()
            && self.negative_prompt.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.batch_size.is_none()
    }

    /// Fill fields still missing here from `other`.
    pub fn or_fill(mut self, other: TaskParameters) -> Self {
        if self.prompt.is_empty() {
            self.prompt = other.prompt;
        }
        self.negative_prompt = self.negative_prompt.or(other.negative_prompt);
        self.width = self.width.or(other.width);
        self.height = self.height.or(other.height);
        self.batch_size = self.batch_size.or(other.batch_size);
        self
    }

    /// `WxH` when both sides are known
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{}x{}", w, h)),
            _ => None,
        }
    }
}

/// What one classified response said about a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskObservation {
    pub task_id: String,
    pub task_type: Option<String>,
    pub status: TaskStatus,
    pub parameters: TaskParameters,
    pub image_urls: Vec<String>,
    pub source: CallSource,
    pub observed_at: DateTime<Utc>,
}

impl TaskObservation {
    /// A completion without images is downgraded to processing.
    pub fn normalized(mut self) -> Self {
        if self.status == TaskStatus::Completed && self.image_urls.is_empty() {
            self.status = TaskStatus::Processing;
        }
        self
    }
}

/// Latest merged knowledge about one task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub task_type: String,
    pub status: TaskStatus,
    pub parameters: TaskParameters,
    pub image_urls: Vec<String>,
    pub last_source: CallSource,
    pub last_updated_at: DateTime<Utc>,
}

impl TaskRecord {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed && !self.image_urls.is_empty()
    }

    /// Short form of the id for one-line displays
    pub fn short_id(&self) -> &str {
        match self.task_id.char_indices().nth(8) {
            Some((idx, _)) => &self.task_id[..idx],
            None => &self.task_id,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
