//! HTTP capability used by the transport layer.
//!
//! # Design
//! Requests and responses are plain data. `Network` builds `HttpRequest`
//! values and classifies `HttpResponse` values; the only I/O happens inside an
//! `HttpClient` implementation. `ReqwestClient` is the default one, and tests
//! substitute a recording stub, so everything above this seam stays
//! deterministic.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// Executes one HTTP round-trip.
///
/// Implementations return `Err` only when no response was received; any
/// status code, including 4xx and 5xx, comes back as an `HttpResponse`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `HttpClient` backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    http: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, timeouts).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.path);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned results in order and records every request it sees.
    #[derive(Debug, Default)]
    pub(crate) struct StubClient {
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl StubClient {
        pub(crate) fn replying(status: u16, body: &str) -> Self {
            let stub = Self::default();
            stub.push(status, body);
            stub
        }

        pub(crate) fn failing(error: ApiError) -> Self {
            let stub = Self::default();
            stub.replies.lock().unwrap().push_back(Err(error));
            stub
        }

        pub(crate) fn push(&self, status: u16, body: &str) {
            self.replies.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: Bytes::from(body.to_string()),
            }));
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for StubClient {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no canned reply".to_string())))
        }
    }
}
