// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transparent request interception.
//!
//! Both request styles hand the caller exactly what the inner transport
//! produced. The monitor sees a copy of the body taken before the caller gets
//! the one-shot [`Response`], and a transport error is recorded as a failed
//! call before it is returned unchanged.

use tasktap_capture::{CallSource, PendingCall, RequestBody};

use crate::monitor::Monitor;
use crate::transport::{Request, Response, SendFuture, Transport, TransportError};

/// Options for a promise-style request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Defaults to GET
    pub method: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl FetchOptions {
    fn into_request(self, url: &str) -> Request {
        let mut request = Request::new(self.method.as_deref().unwrap_or("GET"), url);
        request.headers = self.headers;
        request.body = self.body;
        request
    }
}

/// A transport whose traffic feeds a [`Monitor`]
#[derive(Debug)]
pub struct Interceptor<T> {
    inner: T,
    monitor: Monitor,
}

impl<T: Transport> Interceptor<T> {
    pub(crate) fn new(inner: T, monitor: Monitor) -> Self {
        Self { inner, monitor }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Promise-style request
    pub async fn fetch(&self, url: &str, options: FetchOptions) -> Result<Response, TransportError> {
        self.forward(CallSource::Fetch, options.into_request(url))
            .await
    }

    /// Callback-style request; nothing is sent until [`XhrRequest::send`]
    pub fn open(&self, method: &str, url: &str) -> XhrRequest<'_, T> {
        XhrRequest {
            interceptor: self,
            request: Request::new(method, url),
            ready_state: ReadyState::Opened,
            status: 0,
            response_text: None,
            listeners: Vec::new(),
        }
    }

    async fn forward(&self, source: CallSource, request: Request) -> Result<Response, TransportError> {
        let pending = pending_call(source, &request);
        match self.inner.send(request).await {
            Ok(response) => {
                let body = parse_body(pending.url(), response.body());
                self.monitor
                    .observe(pending.settle(response.status(), body));
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(url = pending.url(), error = %e, "request failed");
                self.monitor.observe(pending.fail());
                Err(e)
            }
        }
    }
}

impl<T: Transport> Transport for Interceptor<T> {
    fn send(&self, request: Request) -> SendFuture<'_> {
        Box::pin(self.forward(CallSource::Fetch, request))
    }
}

fn pending_call(source: CallSource, request: &Request) -> PendingCall {
    PendingCall::new(
        source,
        request.method.as_str(),
        request.url.as_str(),
        request.body.as_deref().map(RequestBody::from_bytes),
    )
}

/// Parse a response body for observation; non-JSON bodies are not task data.
fn parse_body(url: &str, bytes: &[u8]) -> Option<serde_json::Value> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(url, error = %e, "response body is not JSON");
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Opened,
    Done,
}

/// Passed to ready-state listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XhrEvent {
    pub ready_state: ReadyState,
    pub status: u16,
}

type ReadyStateListener<'a> = Box<dyn FnMut(&XhrEvent) + Send + 'a>;

/// Callback-style request bound to an interceptor
pub struct XhrRequest<'a, T> {
    interceptor: &'a Interceptor<T>,
    request: Request,
    ready_state: ReadyState,
    status: u16,
    response_text: Option<String>,
    listeners: Vec<ReadyStateListener<'a>>,
}

impl<'a, T: Transport> XhrRequest<'a, T> {
    pub fn set_request_header(&mut self, name: &str, value: &str) {
        self.request.headers.push((name.to_string(), value.to_string()));
    }

    /// Listeners fire in registration order after the monitor has seen the call.
    pub fn on_ready_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(&XhrEvent) + Send + 'a,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Perform the request. Callers read the result through
    /// [`status`](Self::status) and [`response_text`](Self::response_text).
    pub async fn send(&mut self, body: Option<Vec<u8>>) -> Result<(), TransportError> {
        if self.ready_state != ReadyState::Opened {
            return Err(TransportError::InvalidRequest(
                "request already sent".to_string(),
            ));
        }

        let mut request = self.request.clone();
        request.body = body;
        let pending = pending_call(CallSource::Xhr, &request);
        let interceptor = self.interceptor;
        let monitor = &interceptor.monitor;

        let result = match interceptor.inner.send(request).await {
            Ok(response) => {
                let status = response.status();
                let text = response.text();
                let body = parse_body(pending.url(), text.as_bytes());
                self.status = status;
                self.response_text = Some(text);
                monitor.observe(pending.settle(status, body));
                Ok(())
            }
            Err(e) => {
                tracing::debug!(url = pending.url(), error = %e, "request failed");
                self.status = 0;
                monitor.observe(pending.fail());
                Err(e)
            }
        };

        self.ready_state = ReadyState::Done;
        let event = XhrEvent {
            ready_state: self.ready_state,
            status: self.status,
        };
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        result
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// 0 until a response arrives, and after a transport failure
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }
}

impl<T> std::fmt::Debug for XhrRequest<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XhrRequest")
            .field("method", &self.request.method)
            .field("url", &self.request.url)
            .field("ready_state", &self.ready_state)
            .field("status", &self.status)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
