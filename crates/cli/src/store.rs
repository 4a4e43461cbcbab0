// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory session store keyed by task id.
//!
//! Every merged field keeps the stamp `(observed_at, value)` of the
//! observation that supplied it and is only replaced by a larger stamp.
//! Taking a maximum is order-independent, so applying the same set of
//! observations in any order (or applying one twice) yields the same record.
//! Status has two slots. Non-terminal statuses merge by lifecycle rank. Once
//! any terminal observation is known, the earliest one decides the status, so
//! a task that finished as `error` stays `error` whatever later polls report.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::task::{
    CallSource, TaskObservation, TaskParameters, TaskRecord, TaskStatus, UNKNOWN_TASK_TYPE,
};

/// Change notification for the UI/export side
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// The record was inserted or changed
    Updated(TaskRecord),
    /// The task reached `completed` with images; fires once per task id
    Completed(TaskRecord),
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Updated(_) => "updated",
            Self::Completed(_) => "completed",
        }
    }

    pub fn record(&self) -> &TaskRecord {
        match self {
            Self::Updated(record) | Self::Completed(record) => record,
        }
    }
}

/// What an upsert did to the store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Inserted,
    Updated,
    Unchanged,
}

/// Result of one upsert
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub change: Change,
    pub completed_now: bool,
    pub events: Vec<StoreEvent>,
}

/// Aggregate counters for display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub completed: usize,
    pub images: usize,
}

#[derive(Clone, Debug)]
struct Stamped<T> {
    at: DateTime<Utc>,
    value: T,
}

/// Keep `slot` at the larger of itself and `(at, value)`
fn merge_slot<T: Ord>(slot: &mut Option<Stamped<T>>, at: DateTime<Utc>, value: Option<T>) {
    let Some(value) = value else {
        return;
    };
    let replace = match slot {
        None => true,
        Some(current) => (at, &value) > (current.at, &current.value),
    };
    if replace {
        *slot = Some(Stamped { at, value });
    }
}

#[derive(Clone, Debug)]
struct Entry {
    progress: TaskStatus,
    terminal: Option<Stamped<TaskStatus>>,
    task_type: Option<Stamped<String>>,
    prompt: Option<Stamped<String>>,
    negative_prompt: Option<Stamped<String>>,
    width: Option<Stamped<u32>>,
    height: Option<Stamped<u32>>,
    batch_size: Option<Stamped<u32>>,
    images: Option<Stamped<Vec<String>>>,
    latest: Stamped<CallSource>,
    completion_fired: bool,
}

impl Entry {
    fn new(obs: &TaskObservation) -> Self {
        Self {
            progress: TaskStatus::Unknown,
            terminal: None,
            task_type: None,
            prompt: None,
            negative_prompt: None,
            width: None,
            height: None,
            batch_size: None,
            images: None,
            latest: Stamped {
                at: obs.observed_at,
                value: obs.source,
            },
            completion_fired: false,
        }
    }

    fn absorb(&mut self, obs: TaskObservation) {
        let at = obs.observed_at;
        if obs.status.is_terminal() {
            let earlier = match &self.terminal {
                None => true,
                Some(current) => (at, obs.status) < (current.at, current.value),
            };
            if earlier {
                self.terminal = Some(Stamped {
                    at,
                    value: obs.status,
                });
            }
        } else if obs.status.rank() > self.progress.rank() {
            self.progress = obs.status;
        }

        let task_type = obs
            .task_type
            .filter(|t| !t.is_empty() && t != UNKNOWN_TASK_TYPE);
        merge_slot(&mut self.task_type, at, task_type);

        let params = obs.parameters;
        merge_slot(
            &mut self.prompt,
            at,
            Some(params.prompt).filter(|p| !p.is_empty()),
        );
        merge_slot(&mut self.negative_prompt, at, params.negative_prompt);
        merge_slot(&mut self.width, at, params.width);
        merge_slot(&mut self.height, at, params.height);
        merge_slot(&mut self.batch_size, at, params.batch_size);

        let images = Some(obs.image_urls).filter(|urls| !urls.is_empty());
        merge_slot(&mut self.images, at, images);

        if (at, obs.source) > (self.latest.at, self.latest.value) {
            self.latest = Stamped {
                at,
                value: obs.source,
            };
        }
    }

    fn status(&self) -> TaskStatus {
        self.terminal
            .as_ref()
            .map_or(self.progress, |stamped| stamped.value)
    }

    fn record(&self, task_id: &str) -> TaskRecord {
        let image_urls = self
            .images
            .as_ref()
            .map(|s| s.value.clone())
            .unwrap_or_default();
        // Observations are normalized, but a store can be fed directly.
        let status = match self.status() {
            TaskStatus::Completed if image_urls.is_empty() => TaskStatus::Processing,
            status => status,
        };
        TaskRecord {
            task_id: task_id.to_string(),
            task_type: self
                .task_type
                .as_ref()
                .map(|s| s.value.clone())
                .unwrap_or_else(|| UNKNOWN_TASK_TYPE.to_string()),
            status,
            parameters: TaskParameters {
                prompt: self
                    .prompt
                    .as_ref()
                    .map(|s| s.value.clone())
                    .unwrap_or_default(),
                negative_prompt: self.negative_prompt.as_ref().map(|s| s.value.clone()),
                width: self.width.as_ref().map(|s| s.value),
                height: self.height.as_ref().map(|s| s.value),
                batch_size: self.batch_size.as_ref().map(|s| s.value),
            },
            image_urls,
            last_source: self.latest.value,
            last_updated_at: self.latest.at,
        }
    }
}

/// Mapping from task id to its merged record, in first-seen order
#[derive(Debug, Default)]
pub struct SessionStore {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or merge an observation
    pub fn upsert(&mut self, obs: TaskObservation) -> UpsertOutcome {
        let obs = obs.normalized();
        let task_id = obs.task_id.clone();

        let before = self.get(&task_id);
        if before.is_none() {
            self.order.push(task_id.clone());
        }
        let entry = self
            .entries
            .entry(task_id.clone())
            .or_insert_with(|| Entry::new(&obs));

        entry.absorb(obs);
        let after = entry.record(&task_id);

        let change = match before {
            None => Change::Inserted,
            Some(ref prev) if *prev != after => Change::Updated,
            Some(_) => Change::Unchanged,
        };

        let mut events = Vec::new();
        if change != Change::Unchanged {
            events.push(StoreEvent::Updated(after.clone()));
        }

        let completed_now = after.is_completed() && !entry.completion_fired;
        if completed_now {
            entry.completion_fired = true;
            events.push(StoreEvent::Completed(after));
        }

        UpsertOutcome {
            change,
            completed_now,
            events,
        }
    }

    pub fn get(&self, task_id: &str) -> Option<TaskRecord> {
        self.entries.get(task_id).map(|entry| entry.record(task_id))
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.entries.contains_key(task_id)
    }

    /// All records in first-seen order
    pub fn all(&self) -> Vec<TaskRecord> {
        self.order
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Completed records in first-seen order
    pub fn completed(&self) -> Vec<TaskRecord> {
        self.all().into_iter().filter(|r| r.is_completed()).collect()
    }

    /// Records handed to the export side; empty when nothing has completed
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.completed()
    }

    /// The `n` most recently first-seen records, newest first
    pub fn recent(&self, n: usize) -> Vec<TaskRecord> {
        self.order
            .iter()
            .rev()
            .take(n)
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn stats(&self) -> StoreStats {
        let completed = self.completed();
        StoreStats {
            total: self.order.len(),
            completed: completed.len(),
            images: completed.iter().map(|r| r.image_urls.len()).sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forget every record. A task seen again afterwards can complete again.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
