// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use yare::parameterized;

#[parameterized(
    waiting = { "waiting", TaskStatus::Waiting },
    pending = { "PENDING", TaskStatus::Waiting },
    queued = { "queued", TaskStatus::Waiting },
    processing = { "processing", TaskStatus::Processing },
    running = { " running ", TaskStatus::Processing },
    completed = { "completed", TaskStatus::Completed },
    succeeded = { "succeeded", TaskStatus::Completed },
    failed = { "failed", TaskStatus::Error },
    error = { "Error", TaskStatus::Error },
    empty = { "", TaskStatus::Unknown },
    gibberish = { "???", TaskStatus::Unknown },
)]
fn parse_status(raw: &str, expected: TaskStatus) {
    assert_eq!(TaskStatus::parse(raw, "completed"), expected);
}

#[test]
fn test_custom_completion_status() {
    assert_eq!(TaskStatus::parse("ready", "ready"), TaskStatus::Completed);
    assert_eq!(TaskStatus::parse("READY", "ready"), TaskStatus::Completed);
    assert_eq!(TaskStatus::parse("ready", "completed"), TaskStatus::Unknown);
}

#[test]
fn test_rank_follows_lifecycle() {
    let order = [
        TaskStatus::Unknown,
        TaskStatus::Waiting,
        TaskStatus::Processing,
        TaskStatus::Error,
        TaskStatus::Completed,
    ];
    for pair in order.windows(2) {
        assert!(pair[0].rank() < pair[1].rank());
    }
    assert!(TaskStatus::Completed.is_terminal());
    assert!(TaskStatus::Error.is_terminal());
    assert!(!TaskStatus::Processing.is_terminal());
}

#[test]
fn test_status_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&TaskStatus::Processing).unwrap(),
        "\"processing\""
    );
}

#[test]
fn test_parameters_or_fill_keeps_known_values() {
    let nested = TaskParameters {
        prompt: "a cat".to_string(),
        width: Some(512),
        ..Default::default()
    };
    let flat = TaskParameters {
        prompt: "ignored".to_string(),
        width: Some(1024),
        height: Some(768),
        ..Default::default()
    };

    let merged = nested.or_fill(flat);
    assert_eq!(merged.prompt, "a cat");
    assert_eq!(merged.width, Some(512));
    assert_eq!(merged.height, Some(768));
    assert_eq!(merged.dimensions(), Some("512x768".to_string()));
}

#[test]
fn test_parameters_is_empty() {
    assert!(TaskParameters::default().is_empty());
    let p = TaskParameters {
        batch_size: Some(4),
        ..Default::default()
    };
    assert!(!p.is_empty());
    assert_eq!(p.dimensions(), None);
}

fn observation(status: TaskStatus, images: &[&str]) -> TaskObservation {
    TaskObservation {
        task_id: "abc".to_string(),
        task_type: None,
        status,
        parameters: TaskParameters::default(),
        image_urls: images.iter().map(|s| s.to_string()).collect(),
        source: CallSource::Fetch,
        observed_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[test]
fn test_completed_without_images_is_processing() {
    let obs = observation(TaskStatus::Completed, &[]).normalized();
    assert_eq!(obs.status, TaskStatus::Processing);

    let obs = observation(TaskStatus::Completed, &["http://x/1.png"]).normalized();
    assert_eq!(obs.status, TaskStatus::Completed);
}

#[test]
fn test_short_id() {
    let record = TaskRecord {
        task_id: "0123456789abcdef".to_string(),
        task_type: UNKNOWN_TASK_TYPE.to_string(),
        status: TaskStatus::Waiting,
        parameters: TaskParameters::default(),
        image_urls: vec![],
        last_source: CallSource::Xhr,
        last_updated_at: DateTime::<Utc>::UNIX_EPOCH,
    };
    assert_eq!(record.short_id(), "01234567");
    assert!(!record.is_completed());
}
