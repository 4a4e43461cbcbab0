// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request/response capture for intercepted network calls.
//!
//! This crate defines the record of a single observed call and a log that
//! collects them, optionally mirroring every call to a JSONL file so a
//! session can be replayed later.

mod call;
mod log;
mod millis_serde;

pub use call::{CallSource, InterceptedCall, PendingCall, RequestBody};
pub use log::{CallLog, CallLogError};
