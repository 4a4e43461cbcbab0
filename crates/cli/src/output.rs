// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal output: diagnostics on stderr and one-line event summaries.

use std::io::{self, IsTerminal, Write};

use crate::site::Site;
use crate::store::{StoreEvent, StoreStats};
use crate::task::TaskRecord;

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[31mError: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Error: {}", msg);
    }
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[33mWarning: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Warning: {}", msg);
    }
}

/// Longest prompt shown in a summary line, in characters
const PROMPT_PREVIEW_CHARS: usize = 40;

/// One line per store event, e.g.
/// `completed  abc12345  qwen_image  1 image  "a cat"`
pub fn format_event(event: &StoreEvent) -> String {
    let record = event.record();
    let label = match event {
        StoreEvent::Completed(_) => "completed".to_string(),
        StoreEvent::Updated(r) => r.status.to_string(),
    };
    format!("{:<10} {}", label, format_record(record))
}

pub fn format_record(record: &TaskRecord) -> String {
    let images = match record.image_urls.len() {
        1 => "1 image".to_string(),
        n => format!("{} images", n),
    };
    let mut line = format!("{}  {}  {}", record.short_id(), record.task_type, images);
    if !record.parameters.prompt.is_empty() {
        line.push_str(&format!("  \"{}\"", preview(&record.parameters.prompt)));
    }
    line
}

pub fn format_stats(stats: &StoreStats) -> String {
    format!(
        "{} tasks, {} completed, {} images",
        stats.total, stats.completed, stats.images
    )
}

/// Print an event summary to stderr
pub fn print_event(event: &StoreEvent) {
    let _ = writeln!(io::stderr(), "{}", format_event(event));
}

/// Write the preset listing used by `tasktap sites`
pub fn write_sites<W: Write>(writer: &mut W) -> io::Result<()> {
    for site in Site::all() {
        let config = site.config();
        writeln!(writer, "{:<12} {}", site.name(), site.description())?;
        let matchers: Vec<String> = config
            .task_url_matchers
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(writer, "  urls:     {}", matchers.join(", "))?;
        writeln!(writer, "  task ids: {}", config.task_id_param_names.join(", "))?;
    }
    Ok(())
}

fn preview(prompt: &str) -> String {
    let single_line = prompt.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= PROMPT_PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(PROMPT_PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
