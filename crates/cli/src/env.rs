// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable names.
//!
//! All runtime environment variables read by tasktap are defined here.

/// `TASKTAP_LOG`: tracing filter directives (`EnvFilter` syntax)
pub const TASKTAP_LOG: &str = "TASKTAP_LOG";

/// `TASKTAP_CONFIG`: monitor config file used when `--config` is absent
pub const TASKTAP_CONFIG: &str = "TASKTAP_CONFIG";

/// `TASKTAP_SITE`: site preset used when `--site` is absent
pub const TASKTAP_SITE: &str = "TASKTAP_SITE";

/// Filter used when `TASKTAP_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter used with `--verbose`
pub const VERBOSE_LOG_FILTER: &str = "tasktap=debug,tasktap_capture=debug,warn";

/// `TASKTAP_LOG`, when set and non-empty.
pub fn log_filter() -> Option<String> {
    std::env::var(TASKTAP_LOG).ok().filter(|v| !v.trim().is_empty())
}

/// Pick the tracing filter: an explicit `TASKTAP_LOG` wins over `--verbose`.
pub fn resolve_log_filter(from_env: Option<String>, verbose: bool) -> String {
    match from_env {
        Some(filter) => filter,
        None if verbose => VERBOSE_LOG_FILTER.to_string(),
        None => DEFAULT_LOG_FILTER.to_string(),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
