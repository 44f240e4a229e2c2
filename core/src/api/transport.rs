//! Transport seam between the Student API client and the wire

use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use url::Url;

/// A single outgoing request, fully assembled by the client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL including the base address
    pub url: Url,
    /// Headers to send
    pub headers: BTreeMap<String, String>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Path component of the target URL
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Look up a header by name, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for anything that can carry an [`ApiRequest`] to the server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send exactly one request and return whatever came back
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Type-erased transport, the form views receive the client in
pub type SharedTransport = Arc<dyn Transport>;

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        (**self).send(request).await
    }
}

/// `reqwest`-backed transport.
///
/// No timeout or retry policy is configured; the connection pool is shared by
/// every clone of the client that owns it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with a fresh connection pool
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(ApiError::Transport)?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method.clone(), request.url.clone());

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::Transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::Transport)?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

type Responder = Box<dyn Fn(&ApiRequest) -> RawResponse + Send + Sync>;

/// In-process transport that records every request and answers from a closure.
///
/// Useful for exercising views and shells without a running backend.
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responder: Responder,
}

impl RecordingTransport {
    /// Create a transport that answers every request with `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ApiRequest) -> RawResponse + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Create a transport that always answers `status` with `body`
    pub fn fixed(status: u16, body: impl Into<String>) -> Self {
        let response = RawResponse::new(status, body);
        Self::new(move |_| response.clone())
    }

    /// Snapshot of all requests seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let response = (self.responder)(&request);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        Ok(response)
    }
}
