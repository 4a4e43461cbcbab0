// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use serde_json::json;

#[test]
fn test_request_builder() {
    let req = Request::new("post", "http://x/api")
        .with_header("Content-Type", "application/json")
        .with_body("{}");

    assert_eq!(req.method, "POST");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.body.as_deref(), Some(b"{}".as_slice()));
    assert_eq!(Request::get("http://x").method, "GET");
}

#[test]
fn test_response_body_is_readable_before_consuming() {
    let resp = Response::json(200, &json!({"task_id": "abc"}));

    assert_eq!(resp.header("Content-Type"), Some("application/json"));
    let peeked: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(peeked["task_id"], "abc");

    let owned: serde_json::Value = resp.json_body().unwrap();
    assert_eq!(owned, peeked);
}

#[test]
fn test_response_success_range() {
    assert!(Response::new(200, "").is_success());
    assert!(Response::new(204, "").is_success());
    assert!(!Response::new(304, "").is_success());
    assert!(!Response::new(500, "oops").is_success());
    assert_eq!(Response::new(500, "oops").text(), "oops");
}
