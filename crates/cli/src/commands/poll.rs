// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tasktap poll`: poll a task endpoint through the interceptor.

use std::time::Duration;

use tasktap_capture::CallLog;

use super::{write_export, CommandError, ExportTarget};
use crate::cli::PollArgs;
use crate::interceptor::{FetchOptions, Interceptor};
use crate::monitor::Monitor;
use crate::output::{format_stats, print_event, print_warning};
use crate::time::Clock;
use crate::transport::{HttpTransport, Transport, TransportError};

/// How a poll loop ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSummary {
    pub polls: u32,
    /// Every tracked task reached a terminal status
    pub finished: bool,
    pub target: ExportTarget,
}

pub async fn run(args: &PollArgs, clock: &dyn Clock) -> Result<PollSummary, CommandError> {
    run_with(args, HttpTransport::new()?, clock).await
}

/// Poll loop over any transport
pub async fn run_with<T: Transport>(
    args: &PollArgs,
    transport: T,
    clock: &dyn Clock,
) -> Result<PollSummary, CommandError> {
    let config = args.monitor.resolve()?;
    let log = match &args.capture {
        Some(path) => CallLog::with_file(path).map_err(|source| CommandError::Capture {
            path: path.clone(),
            source,
        })?,
        None => CallLog::new(),
    };
    let monitor = Monitor::with_call_log(&config, log)?;
    monitor.subscribe(print_event);
    let interceptor = monitor.start(transport)?;

    if !monitor.classifier().matches_url(&args.url) {
        print_warning(format_args!(
            "{} does not match any task URL matcher of {:?}",
            args.url, config.name
        ));
    }

    let interval = Duration::from_millis(args.interval_ms);
    let mut polls = 0;
    let mut finished = false;
    while polls < args.max_polls {
        polls += 1;
        match poll_once(&interceptor, args).await {
            Ok(status) => tracing::debug!(poll = polls, status, "poll returned"),
            Err(TransportError::Network(e)) => {
                print_warning(format_args!("poll {} failed: {}", polls, e));
            }
            Err(e) => return Err(e.into()),
        }

        finished = all_terminal(&monitor);
        if finished {
            break;
        }
        if polls < args.max_polls {
            clock.sleep(interval).await;
        }
    }

    if !finished {
        print_warning(format_args!(
            "task not finished after {} polls ({})",
            polls,
            format_stats(&monitor.stats())
        ));
    }

    let target = write_export(&monitor.snapshot(), &args.export, clock)?;
    Ok(PollSummary {
        polls,
        finished,
        target,
    })
}

/// One request in the configured style; returns the HTTP status
async fn poll_once<T: Transport>(
    interceptor: &Interceptor<T>,
    args: &PollArgs,
) -> Result<u16, TransportError> {
    if args.xhr {
        let mut xhr = interceptor.open(&args.method, &args.url);
        for (name, value) in &args.headers {
            xhr.set_request_header(name, value);
        }
        xhr.send(None).await?;
        Ok(xhr.status())
    } else {
        let options = FetchOptions {
            method: Some(args.method.clone()),
            headers: args.headers.clone(),
            body: None,
        };
        let response = interceptor.fetch(&args.url, options).await?;
        Ok(response.status())
    }
}

fn all_terminal(monitor: &Monitor) -> bool {
    let records = monitor.records();
    !records.is_empty() && records.iter().all(|r| r.status.is_terminal())
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
