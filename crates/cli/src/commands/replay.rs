// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tasktap replay`: feed a captured call log through the pipeline.

use tasktap_capture::CallLog;

use super::{write_export, CommandError, ExportTarget};
use crate::cli::ReplayArgs;
use crate::monitor::{Disposition, Monitor};
use crate::output::{format_stats, print_event};
use crate::time::Clock;

pub fn run(args: &ReplayArgs, clock: &dyn Clock) -> Result<ExportTarget, CommandError> {
    let config = args.monitor.resolve()?;
    let calls = CallLog::load_jsonl(&args.calls).map_err(|source| CommandError::Calls {
        path: args.calls.clone(),
        source,
    })?;

    let monitor = Monitor::new(&config)?;
    monitor.subscribe(print_event);

    let total = calls.len();
    let merged = calls
        .into_iter()
        .map(|call| monitor.observe(call))
        .filter(Disposition::is_merged)
        .count();
    tracing::info!(
        calls = total,
        merged,
        stats = %format_stats(&monitor.stats()),
        "replay finished"
    );

    write_export(&monitor.snapshot(), &args.export, clock)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
