// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::task::{CallSource, TaskParameters, TaskStatus};
use chrono::{TimeZone, Utc};

fn record(prompt: &str, images: usize) -> TaskRecord {
    TaskRecord {
        task_id: "abc123def456".to_string(),
        task_type: "qwen_image".to_string(),
        status: TaskStatus::Completed,
        parameters: TaskParameters {
            prompt: prompt.to_string(),
            ..Default::default()
        },
        image_urls: (0..images).map(|i| format!("http://x/{}.png", i)).collect(),
        last_source: CallSource::Fetch,
        last_updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
    }
}

#[test]
fn error_plain_text_when_not_terminal() {
    let mut buf = Vec::new();
    write_error(&mut buf, "No completed sessions to export", false);
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(output, "Error: No completed sessions to export\n");
}

#[test]
fn error_with_ansi_when_terminal() {
    let mut buf = Vec::new();
    write_error(&mut buf, "bad config", true);
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(output, "\x1b[31mError: bad config\x1b[0m\n");
}

#[test]
fn warning_plain_text_when_not_terminal() {
    let mut buf = Vec::new();
    write_warning(&mut buf, format_args!("poll budget of {} reached", 3), false);
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(output, "Warning: poll budget of 3 reached\n");
}

#[test]
fn completed_event_line() {
    let line = format_event(&StoreEvent::Completed(record("a cat", 1)));
    assert_eq!(line, "completed  abc123de  qwen_image  1 image  \"a cat\"");
}

#[test]
fn updated_event_uses_status() {
    let mut rec = record("", 0);
    rec.status = TaskStatus::Waiting;
    let line = format_event(&StoreEvent::Updated(rec));
    assert_eq!(line, "waiting    abc123de  qwen_image  0 images");
}

#[test]
fn long_prompts_are_cut() {
    let prompt = "a very long prompt that keeps going well past the preview width";
    let line = format_record(&record(prompt, 2));
    assert!(line.ends_with("…\""));
    assert!(line.contains("2 images"));
}

#[test]
fn stats_line() {
    let stats = StoreStats {
        total: 3,
        completed: 2,
        images: 5,
    };
    assert_eq!(format_stats(&stats), "3 tasks, 2 completed, 5 images");
}

#[test]
fn sites_listing() {
    let mut buf = Vec::new();
    write_sites(&mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();

    assert!(output.contains("freeaiimage"));
    assert!(output.contains("contains \"/api/services/aigc/task\""));
    assert!(output.contains("taskld"));
    assert!(output.contains("any url"));
}
