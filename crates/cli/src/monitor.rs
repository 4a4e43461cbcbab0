// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The capture pipeline: call log → classifier → session store → listeners.
//!
//! A [`Monitor`] is a cheap-clone handle. Every clone observes into the same
//! store, so the interceptor, replay, and UI side can each hold one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tasktap_capture::{CallLog, InterceptedCall};
use thiserror::Error;

use crate::classify::{ClassifyMiss, Classifier};
use crate::config::{ConfigError, MonitorConfig};
use crate::interceptor::Interceptor;
use crate::store::{SessionStore, StoreEvent, StoreStats, UpsertOutcome};
use crate::task::TaskRecord;
use crate::transport::Transport;

/// Callback invoked for every store event
pub type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor already started")]
    AlreadyStarted,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What happened to one observed call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    Dropped(ClassifyMiss),
    Merged(UpsertOutcome),
}

impl Disposition {
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }
}

struct Inner {
    classifier: Classifier,
    store: Mutex<SessionStore>,
    log: CallLog,
    listeners: RwLock<Vec<Listener>>,
    started: AtomicBool,
}

#[derive(Clone)]
pub struct Monitor {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("classifier", &self.inner.classifier)
            .field("records", &self.inner.store.lock().len())
            .field("calls", &self.inner.log.len())
            .field("started", &self.is_started())
            .finish()
    }
}

impl Monitor {
    pub fn new(config: &MonitorConfig) -> Result<Self, ConfigError> {
        Self::with_call_log(config, CallLog::new())
    }

    /// Build a monitor recording into `log` (e.g. a JSONL-mirrored log)
    pub fn with_call_log(config: &MonitorConfig, log: CallLog) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(Inner {
                classifier: Classifier::new(config)?,
                store: Mutex::new(SessionStore::new()),
                log,
                listeners: RwLock::new(Vec::new()),
                started: AtomicBool::new(false),
            }),
        })
    }

    /// Wrap `transport` so its traffic feeds this monitor.
    ///
    /// Only one interceptor per monitor; a second call fails.
    pub fn start<T: Transport>(&self, transport: T) -> Result<Interceptor<T>, MonitorError> {
        self.inner
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MonitorError::AlreadyStarted)?;
        tracing::debug!("monitor started");
        Ok(Interceptor::new(transport, self.clone()))
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }

    /// Record one settled call and merge it into the store if it is task traffic.
    pub fn observe(&self, call: InterceptedCall) -> Disposition {
        let call = self.inner.log.record(call);

        let observation = match self.inner.classifier.classify(&call) {
            Ok(observation) => observation,
            Err(miss) => {
                match miss {
                    ClassifyMiss::UrlMismatch | ClassifyMiss::NoBody => {
                        tracing::trace!(seq = call.seq, url = %call.url, reason = %miss, "call ignored")
                    }
                    _ => tracing::debug!(seq = call.seq, url = %call.url, reason = %miss, "call dropped"),
                }
                return Disposition::Dropped(miss);
            }
        };

        let task_id = observation.task_id.clone();
        let status = observation.status;
        let outcome = self.inner.store.lock().upsert(observation);

        tracing::debug!(seq = call.seq, task_id = %task_id, %status, change = ?outcome.change, "task observed");
        if outcome.completed_now {
            let images = outcome
                .events
                .last()
                .map(|event| event.record().image_urls.len())
                .unwrap_or_default();
            tracing::info!(task_id = %task_id, images, "task completed");
        }

        self.dispatch(&outcome.events);
        Disposition::Merged(outcome)
    }

    /// Register a listener for store events
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.write().push(Arc::new(listener));
    }

    /// Completed records, ready for export
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.inner.store.lock().snapshot()
    }

    /// Every record in first-seen order
    pub fn records(&self) -> Vec<TaskRecord> {
        self.inner.store.lock().all()
    }

    pub fn record(&self, task_id: &str) -> Option<TaskRecord> {
        self.inner.store.lock().get(task_id)
    }

    pub fn recent(&self, n: usize) -> Vec<TaskRecord> {
        self.inner.store.lock().recent(n)
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.store.lock().stats()
    }

    /// Forget collected records. The call log is kept.
    pub fn clear(&self) {
        self.inner.store.lock().clear();
    }

    pub fn call_log(&self) -> &CallLog {
        &self.inner.log
    }

    pub fn classifier(&self) -> &Classifier {
        &self.inner.classifier
    }

    // Listeners run with no lock held, so they may call back into the monitor.
    fn dispatch(&self, events: &[StoreEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self.inner.listeners.read().clone();
        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
