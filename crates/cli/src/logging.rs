// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for the binary. Events go to stderr so exports
//! written to stdout stay clean.

use tracing_subscriber::EnvFilter;

use crate::env;

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let directives = env::resolve_log_filter(env::log_filter(), verbose);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        crate::output::print_warning(format_args!(
            "invalid {} filter {:?}: {}",
            env::TASKTAP_LOG,
            directives,
            e
        ));
        EnvFilter::new(env::DEFAULT_LOG_FILTER)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
