// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Export of completed task records as JSON or CSV.

use chrono::SecondsFormat;
use clap::ValueEnum;
use thiserror::Error;

use crate::task::TaskRecord;

/// CSV header row
pub const CSV_COLUMNS: [&str; 8] = [
    "timestamp",
    "task_id",
    "task_type",
    "prompt",
    "dimensions",
    "batch_size",
    "negative_prompt",
    "image_urls",
];

/// Separator between image URLs within one CSV cell
pub const IMAGE_URL_SEPARATOR: &str = "|";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No completed sessions to export")]
    NothingToExport,

    #[error("failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the completed records among `records`.
pub fn render(records: &[TaskRecord], format: ExportFormat) -> Result<String, ExportError> {
    let completed: Vec<&TaskRecord> = records.iter().filter(|r| r.is_completed()).collect();
    if completed.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&completed)?),
        ExportFormat::Csv => Ok(render_csv(&completed)),
    }
}

/// `ai-images-<millis>.<ext>`
pub fn default_file_name(format: ExportFormat, now_millis: u64) -> String {
    format!("ai-images-{}.{}", now_millis, format.extension())
}

fn render_csv(records: &[&TaskRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_COLUMNS.iter().map(|c| c.to_string()));
    for record in records {
        let params = &record.parameters;
        push_row(
            &mut out,
            [
                record
                    .last_updated_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                record.task_id.clone(),
                record.task_type.clone(),
                params.prompt.clone(),
                params.dimensions().unwrap_or_default(),
                params.batch_size.map(|n| n.to_string()).unwrap_or_default(),
                params.negative_prompt.clone().unwrap_or_default(),
                record.image_urls.join(IMAGE_URL_SEPARATOR),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, cells: impl IntoIterator<Item = String>) {
    let row: Vec<String> = cells.into_iter().map(|c| quote(&c)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// RFC 4180 quoting: only fields with a delimiter, quote, or line break
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
