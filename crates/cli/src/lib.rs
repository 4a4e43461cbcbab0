// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Passive observer for AI generation task polling.
//!
//! An [`Interceptor`](interceptor::Interceptor) wraps a request transport and
//! hands every settled call to a [`Monitor`](monitor::Monitor), which keeps
//! the ones that look like task polls, merges them per task id, and exposes
//! completed sessions for export. The caller of the transport sees exactly
//! the responses and errors the inner transport produced.
//!
//! ```no_run
//! use tasktap::interceptor::FetchOptions;
//! use tasktap::monitor::Monitor;
//! use tasktap::site::Site;
//! use tasktap::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let monitor = Monitor::new(&Site::FreeAiImage.config())?;
//! let http = monitor.start(HttpTransport::new()?)?;
//!
//! http.fetch(
//!     "https://freeaiimage.net/api/services/aigc/task?taskId=abc123",
//!     FetchOptions::default(),
//! )
//! .await?;
//!
//! for record in monitor.snapshot() {
//!     println!("{} {:?}", record.task_id, record.image_urls);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod cli;
#[doc(hidden)]
pub mod commands;
pub mod config;
pub mod env;
pub mod export;
pub mod interceptor;
#[doc(hidden)]
pub mod logging;
pub mod monitor;
#[doc(hidden)]
pub mod output;
pub mod site;
pub mod store;
pub mod task;
pub mod time;
pub mod transport;

/// Re-exported capture types from the tasktap-capture crate.
pub mod capture {
    pub use tasktap_capture::{
        CallLog, CallLogError, CallSource, InterceptedCall, PendingCall, RequestBody,
    };
}
