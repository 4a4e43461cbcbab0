// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::interceptor::FetchOptions;
use crate::site::Site;
use crate::store::Change;
use crate::task::TaskStatus;
use crate::transport::FakeTransport;
use serde_json::{json, Value};
use std::time::{Duration, UNIX_EPOCH};
use tasktap_capture::CallSource;

const TASK_URL: &str = "https://freeaiimage.net/api/services/aigc/task?taskId=abc123";

fn monitor() -> Monitor {
    Monitor::new(&Site::FreeAiImage.config()).unwrap()
}

fn call(url: &str, secs: u64, body: Value) -> InterceptedCall {
    InterceptedCall {
        seq: 0,
        url: url.to_string(),
        method: "GET".to_string(),
        request_body: None,
        response_status: 200,
        response_body: Some(body),
        started_at: UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs),
        elapsed: Duration::from_millis(10),
        source: CallSource::Xhr,
    }
}

fn events(monitor: &Monitor) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    monitor.subscribe(move |event| {
        sink.lock()
            .push(format!("{}:{}", event.name(), event.record().task_id));
    });
    seen
}

#[test]
fn test_start_twice_fails() {
    let monitor = monitor();
    assert!(!monitor.is_started());

    monitor.start(FakeTransport::new()).unwrap();
    assert!(monitor.is_started());

    let err = monitor.clone().start(FakeTransport::new()).unwrap_err();
    assert!(matches!(err, MonitorError::AlreadyStarted));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = crate::config::MonitorConfig::for_urls(Vec::<String>::new());
    assert!(Monitor::new(&config).is_err());
}

#[test]
fn test_unrelated_traffic_is_logged_not_merged() {
    let monitor = monitor();
    let seen = events(&monitor);

    let disposition = monitor.observe(call("https://x/api/user", 0, json!({"id": "u1"})));

    assert_eq!(disposition, Disposition::Dropped(ClassifyMiss::UrlMismatch));
    assert_eq!(monitor.call_log().len(), 1);
    assert!(monitor.records().is_empty());
    assert!(seen.lock().is_empty());
}

#[test]
fn test_events_follow_lifecycle() {
    let monitor = monitor();
    let seen = events(&monitor);

    monitor.observe(call(TASK_URL, 0, json!({"task_type": "qwen_image", "status": "waiting", "prompt": "a cat"})));
    monitor.observe(call(TASK_URL, 2, json!({"task_type": "qwen_image", "status": "processing", "prompt": "a cat"})));
    monitor.observe(call(TASK_URL, 4, json!({"status": "completed", "data": ["http://x/1.png"]})));
    let last = monitor.observe(call(TASK_URL, 6, json!({"status": "completed", "data": ["http://x/1.png"]})));

    assert_eq!(
        *seen.lock(),
        vec![
            "updated:abc123",
            "updated:abc123",
            "updated:abc123",
            "completed:abc123",
            "updated:abc123",
        ]
    );
    match last {
        Disposition::Merged(outcome) => {
            assert_eq!(outcome.change, Change::Updated);
            assert!(!outcome.completed_now);
        }
        other => panic!("unexpected {:?}", other),
    }

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].parameters.prompt, "a cat");
    assert_eq!(monitor.stats().images, 1);
}

#[test]
fn test_listener_may_read_monitor() {
    let monitor = monitor();
    let reader = monitor.clone();
    let counts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&counts);
    monitor.subscribe(move |_| sink.lock().push(reader.records().len()));

    monitor.observe(call(TASK_URL, 0, json!({"task_type": "qwen_image", "status": "waiting"})));

    assert_eq!(*counts.lock(), vec![1]);
}

#[test]
fn test_clear_keeps_call_log() {
    let monitor = monitor();
    monitor.observe(call(TASK_URL, 0, json!({"status": "completed", "data": ["http://x/1.png"]})));

    monitor.clear();

    assert!(monitor.snapshot().is_empty());
    assert_eq!(monitor.call_log().len(), 1);
}

#[tokio::test]
async fn test_polling_through_interceptor() {
    let monitor = monitor();
    let fake = FakeTransport::new();
    fake.respond_json("/aigc/task", json!({"task_type": "qwen_image", "status": "waiting", "params": {"prompt": "a cat"}}))
        .respond_json("/aigc/task", json!({"task_type": "qwen_image", "status": "processing"}))
        .respond_json("/aigc/task", json!({"status": "completed", "data": [{"url": "http://x/1.png"}]}));
    let interceptor = monitor.start(fake).unwrap();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        interceptor.fetch(TASK_URL, FetchOptions::default()).await.unwrap();
        statuses.push(monitor.record("abc123").unwrap().status);
    }

    assert_eq!(
        statuses,
        vec![TaskStatus::Waiting, TaskStatus::Processing, TaskStatus::Completed]
    );
    let record = &monitor.snapshot()[0];
    assert_eq!(record.parameters.prompt, "a cat");
    assert_eq!(record.image_urls, vec!["http://x/1.png"]);
}
