// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted transport for tests and offline runs.
//!
//! Routes match on a URL substring and are tried in registration order.
//! Each route serves its responses first-in first-out; the final one keeps
//! repeating so a polling loop never runs dry. Unmatched requests get a 404.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Request, Response, SendFuture, Transport, TransportError};

type Reply = Result<Response, TransportError>;

#[derive(Debug)]
struct Route {
    url_contains: String,
    replies: VecDeque<Reply>,
}

impl Route {
    fn next(&mut self) -> Option<Reply> {
        if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().cloned()
        }
    }
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<Request>,
}

/// Cheap-clone handle; clones share routes and the request record
#[derive(Clone, Debug, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<State>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for URLs containing `url_contains`
    pub fn respond(&self, url_contains: impl Into<String>, response: Response) -> &Self {
        self.push(url_contains.into(), Ok(response));
        self
    }

    /// Queue a JSON 200 response
    pub fn respond_json(&self, url_contains: impl Into<String>, value: serde_json::Value) -> &Self {
        self.respond(url_contains, Response::json(200, &value))
    }

    /// Queue a transport failure
    pub fn fail(&self, url_contains: impl Into<String>, error: TransportError) -> &Self {
        self.push(url_contains.into(), Err(error));
        self
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    fn push(&self, url_contains: String, reply: Reply) {
        let mut state = self.state.lock();
        match state
            .routes
            .iter_mut()
            .find(|route| route.url_contains == url_contains)
        {
            Some(route) => route.replies.push_back(reply),
            None => state.routes.push(Route {
                url_contains,
                replies: VecDeque::from([reply]),
            }),
        }
    }

    fn reply(&self, request: Request) -> Reply {
        let mut state = self.state.lock();
        let reply = state
            .routes
            .iter_mut()
            .find(|route| request.url.contains(&route.url_contains))
            .and_then(Route::next)
            .unwrap_or_else(|| Ok(Response::new(404, "no route")));
        state.requests.push(request);
        reply
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: Request) -> SendFuture<'_> {
        let reply = self.reply(request);
        Box::pin(async move { reply })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
