// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call log implementation.

use crate::call::InterceptedCall;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors reading or writing a call log file
#[derive(Debug, Error)]
pub enum CallLogError {
    #[error("Failed to access call log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid call on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Log of every intercepted call, shared between clones
pub struct CallLog {
    calls: Arc<Mutex<Vec<InterceptedCall>>>,
    next_seq: Arc<Mutex<u64>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CallLog {
    /// Create a new in-memory call log
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            next_seq: Arc::new(Mutex::new(0)),
            file_writer: None,
        }
    }

    /// Create a call log that also writes to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            ..Self::new()
        })
    }

    /// Read calls back from a JSONL file written by [`CallLog::with_file`]
    pub fn load_jsonl(path: &Path) -> Result<Vec<InterceptedCall>, CallLogError> {
        let reader = BufReader::new(File::open(path)?);
        let mut calls = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let call = serde_json::from_str(&line).map_err(|source| CallLogError::Parse {
                line: idx + 1,
                source,
            })?;
            calls.push(call);
        }
        Ok(calls)
    }

    /// Record a settled call, assigning its sequence number
    pub fn record(&self, mut call: InterceptedCall) -> InterceptedCall {
        {
            let mut seq = self.next_seq.lock();
            call.seq = *seq;
            *seq += 1;
        }

        self.calls.lock().push(call.clone());

        if let Some(ref writer) = self.file_writer {
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&call) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }

        call
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<InterceptedCall> {
        self.calls.lock().clone()
    }

    /// Get the last N calls
    pub fn last(&self, n: usize) -> Vec<InterceptedCall> {
        let all = self.calls.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count calls matching a predicate
    pub fn count<F: Fn(&InterceptedCall) -> bool>(&self, pred: F) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Find calls whose URL contains a substring
    pub fn find_by_url(&self, pattern: &str) -> Vec<InterceptedCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.url.contains(pattern))
            .cloned()
            .collect()
    }

    /// Find calls that failed at the transport level
    pub fn find_failures(&self) -> Vec<InterceptedCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.is_failure())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Clear all recorded calls. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CallLog {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            next_seq: Arc::clone(&self.next_seq),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
