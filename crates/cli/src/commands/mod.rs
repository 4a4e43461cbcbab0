// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations.

pub mod poll;
pub mod replay;
pub mod sites;

use std::io::Write;
use std::path::{Path, PathBuf};

use tasktap_capture::CallLogError;
use thiserror::Error;

use crate::cli::ExportArgs;
use crate::config::ConfigError;
use crate::export::{self, ExportError};
use crate::monitor::MonitorError;
use crate::task::TaskRecord;
use crate::time::Clock;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid monitor config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Calls {
        path: PathBuf,
        #[source]
        source: CallLogError,
    },

    #[error("failed to open capture file {}: {source}", path.display())]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Process exit code; configuration problems are usage errors
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Where an export ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

/// Render `records` and write them to `--output` or stdout.
///
/// An existing directory as `--output` gets a timestamped file name.
pub fn write_export(
    records: &[TaskRecord],
    args: &ExportArgs,
    clock: &dyn Clock,
) -> Result<ExportTarget, CommandError> {
    let rendered = export::render(records, args.format)?;

    let Some(output) = &args.output else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        if !rendered.ends_with('\n') {
            writeln!(stdout)?;
        }
        return Ok(ExportTarget::Stdout);
    };

    let path = export_path(output, args, clock);
    std::fs::write(&path, rendered).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = records.len(), "export written");
    Ok(ExportTarget::File(path))
}

fn export_path(output: &Path, args: &ExportArgs, clock: &dyn Clock) -> PathBuf {
    if output.is_dir() {
        output.join(export::default_file_name(args.format, clock.now_millis()))
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
