// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field extraction from task polling responses.
//!
//! The same API has been seen returning generation parameters nested under
//! `params` on one poll and flat on the next, so neither shape is treated as
//! authoritative. Each shape is a strategy; strategies run in order and, per
//! field, the first one that supplies a value wins.

use serde_json::{Map, Value};

use super::identity::{body_task_id, query_param};
use crate::task::TaskParameters;

/// Pure extraction strategy over a response body
pub type ParamStrategy = fn(&Value) -> Option<TaskParameters>;

/// Strategies in priority order
pub const PARAM_STRATEGIES: &[(&str, ParamStrategy)] =
    &[("nested", nested_params), ("flat", flat_params)];

/// Parameters under a nested `params` object
pub fn nested_params(body: &Value) -> Option<TaskParameters> {
    body.get("params")?.as_object().and_then(read_params)
}

/// Parameters as top-level fields
pub fn flat_params(body: &Value) -> Option<TaskParameters> {
    body.as_object().and_then(read_params)
}

/// Union of all strategies, earlier strategies winning per field
pub fn extract_parameters(body: &Value) -> TaskParameters {
    PARAM_STRATEGIES
        .iter()
        .filter_map(|(_, strategy)| strategy(body))
        .fold(TaskParameters::default(), TaskParameters::or_fill)
}

fn read_params(map: &Map<String, Value>) -> Option<TaskParameters> {
    let params = TaskParameters {
        prompt: string_field(map, "prompt").unwrap_or_default(),
        negative_prompt: string_field(map, "negative_prompt"),
        width: number_field(map, "width"),
        height: number_field(map, "height"),
        batch_size: number_field(map, "batch_size"),
    };
    (!params.is_empty()).then_some(params)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Numbers sometimes arrive as strings (`"512"`)
fn number_field(map: &Map<String, Value>, key: &str) -> Option<u32> {
    match map.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Image URLs: `data` if it is an array, else `images`, else nothing
pub fn extract_images(body: &Value) -> Vec<String> {
    let list = body
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| body.get("images").and_then(Value::as_array));
    list.map(|items| items.iter().filter_map(image_url).collect())
        .unwrap_or_default()
}

fn image_url(item: &Value) -> Option<String> {
    let url = match item {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("url")?.as_str()?,
        _ => return None,
    };
    (!url.trim().is_empty()).then(|| url.to_string())
}

/// Raw status string, if the body has one
pub fn extract_status(body: &Value) -> Option<&str> {
    body.get("status").and_then(Value::as_str)
}

/// Task type from the body, else from the URL query
pub fn extract_task_type(body: &Value, url: &str) -> Option<String> {
    task_type_field(body)
        .or_else(|| query_param(url, "taskType"))
        .or_else(|| query_param(url, "task_type"))
}

fn task_type_field(body: &Value) -> Option<String> {
    ["task_type", "taskType", "tasktype"]
        .iter()
        .find_map(|key| body.get(key))
        .or_else(|| body.get("params")?.get("task_type"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Whether a body plausibly describes a generation task.
///
/// Any one of: a task id field, a task type together with a status, or a
/// non-empty `data`/`images` array.
pub fn is_task_shaped(body: &Value) -> bool {
    if !body.is_object() {
        return false;
    }
    let has_id = body_task_id(body).is_some();
    let has_type_and_status = task_type_field(body).is_some() && extract_status(body).is_some();
    let has_images = ["data", "images"].iter().any(|key| {
        body.get(key)
            .and_then(Value::as_array)
            .is_some_and(|items| !items.is_empty())
    });
    has_id || has_type_and_status || has_images
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
