use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use membit_core::MembitError;
use serde_json::Value;
use tokio::sync::Mutex;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

/// Status and raw body text. Parsing is left to the caller so that a
/// non-JSON body can still be returned as text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one POST request and returns the response. One attempt, no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, MembitError>;
}

/// Production transport using reqwest.
pub struct HttpBackend {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound on the whole request, from connect to the last body byte.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpBackend {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, MembitError> {
        let mut builder = self.client.post(&request.url).timeout(self.timeout);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        builder = builder.json(&request.body);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                MembitError::Transport(format!(
                    "request to {} timed out after {}s",
                    request.url,
                    self.timeout.as_secs_f64()
                ))
            } else {
                MembitError::Transport(format!("request to {} failed: {e}", request.url))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            MembitError::Transport(format!("reading response from {} failed: {e}", request.url))
        })?;

        Ok(TransportResponse { status, body })
    }
}

/// Test transport with queued responses and a log of every request sent.
pub struct FakeBackend {
    responses: Arc<Mutex<VecDeque<Result<TransportResponse, MembitError>>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_response(&self, response: TransportResponse) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Ok(response));
        self
    }

    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        self.push_response(TransportResponse::json(status, &body))
    }

    pub fn push_error(&self, error: MembitError) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, MembitError> {
        self.requests.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        responses
            .pop_front()
            .unwrap_or_else(|| Err(MembitError::Transport("FakeBackend exhausted".to_string())))
    }
}
