// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Intercepted call data types.

use crate::millis_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime};

/// Which request primitive carried the call
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSource {
    /// Callback-style request object (open/send)
    Xhr,
    /// Promise-style fetch
    Fetch,
}

impl CallSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xhr => "xhr",
            Self::Fetch => "fetch",
        }
    }
}

impl std::fmt::Display for CallSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body sent with the request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Keep the body as JSON when it parses, raw bytes otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(bytes.to_vec()),
        }
    }
}

/// A request that has been issued but has not settled yet.
#[derive(Debug)]
pub struct PendingCall {
    source: CallSource,
    method: String,
    url: String,
    request_body: Option<RequestBody>,
    started_at: SystemTime,
    started: Instant,
}

impl PendingCall {
    pub fn new(
        source: CallSource,
        method: impl Into<String>,
        url: impl Into<String>,
        request_body: Option<RequestBody>,
    ) -> Self {
        Self {
            source,
            method: method.into(),
            url: url.into(),
            request_body,
            started_at: SystemTime::now(),
            started: Instant::now(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Complete the call with the response that came back.
    pub fn settle(self, status: u16, body: Option<serde_json::Value>) -> InterceptedCall {
        let elapsed = self.started.elapsed();
        self.finish(status, body, elapsed)
    }

    /// Complete the call after the transport failed (no response at all).
    pub fn fail(self) -> InterceptedCall {
        let elapsed = self.started.elapsed();
        self.finish(0, None, elapsed)
    }

    fn finish(
        self,
        status: u16,
        body: Option<serde_json::Value>,
        elapsed: Duration,
    ) -> InterceptedCall {
        InterceptedCall {
            seq: 0,
            url: self.url,
            method: self.method,
            request_body: self.request_body,
            response_status: status,
            response_body: body,
            started_at: self.started_at,
            elapsed,
            source: self.source,
        }
    }
}

/// One observed request/response pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterceptedCall {
    /// Sequence number assigned by the call log
    #[serde(default)]
    pub seq: u64,

    pub url: String,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    /// HTTP status, 0 when the transport failed
    pub response_status: u16,

    /// Parsed JSON body; absent for failures and non-JSON bodies
    #[serde(default)]
    pub response_body: Option<serde_json::Value>,

    /// Wall-clock time the request was issued
    #[serde(rename = "started_at_ms", with = "millis_serde::system_time")]
    pub started_at: SystemTime,

    /// Time until the response settled
    #[serde(rename = "elapsed_ms", with = "millis_serde::duration", default)]
    pub elapsed: Duration,

    pub source: CallSource,
}

fn default_method() -> String {
    "GET".to_string()
}

impl InterceptedCall {
    /// 2xx response
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.response_status)
    }

    /// Transport-level failure (no response)
    pub fn is_failure(&self) -> bool {
        self.response_status == 0
    }

    /// Time the response was observed; `None` when the sum overflows `SystemTime`
    pub fn observed_at(&self) -> Option<SystemTime> {
        self.started_at.checked_add(self.elapsed)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
