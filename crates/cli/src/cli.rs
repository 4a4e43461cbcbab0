// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, MonitorConfig};
use crate::env;
use crate::export::ExportFormat;
use crate::site::Site;

/// Watch AI generation task polling and export finished sessions
#[derive(Parser, Debug)]
#[command(name = "tasktap", version, about)]
pub struct Cli {
    /// Log pipeline decisions to stderr (overridden by TASKTAP_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a captured call log (JSONL) through the pipeline and export the result
    Replay(ReplayArgs),

    /// Poll a task endpoint until the task finishes, then export it
    Poll(PollArgs),

    /// List the built-in site presets
    Sites,
}

/// Where the monitor config comes from
#[derive(Args, Debug, Clone)]
pub struct MonitorArgs {
    /// Built-in site preset
    #[arg(long, value_enum, env = env::TASKTAP_SITE, default_value = "generic")]
    pub site: Site,

    /// Monitor config file (.toml or .json); takes precedence over --site
    #[arg(long, env = env::TASKTAP_CONFIG, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl MonitorArgs {
    pub fn resolve(&self) -> Result<MonitorConfig, ConfigError> {
        match &self.config {
            Some(path) => MonitorConfig::load(path),
            None => Ok(self.site.config()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Export format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write the export to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Captured calls, one JSON object per line
    #[arg(value_name = "CALLS")]
    pub calls: PathBuf,

    #[command(flatten)]
    pub monitor: MonitorArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Task status URL to poll
    #[arg(value_name = "URL")]
    pub url: String,

    /// HTTP method for each poll
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// Extra request header as `Name: value` (repeatable)
    #[arg(long = "header", short = 'H', value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Delay between polls in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub interval_ms: u64,

    /// Give up after this many polls
    #[arg(long, default_value_t = 30)]
    pub max_polls: u32,

    /// Mirror every observed call to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub capture: Option<PathBuf>,

    /// Use callback-style requests instead of fetch-style
    #[arg(long)]
    pub xhr: bool,

    #[command(flatten)]
    pub monitor: MonitorArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
