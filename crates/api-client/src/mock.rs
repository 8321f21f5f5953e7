use crate::endpoints::Endpoint;
use crate::error::FetchError;
use crate::FetchClient;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

/// An in-memory `FetchClient` with canned responses.
///
/// Endpoints without a response fail with HTTP 503. An optional gate makes
/// every fetch wait for a semaphore permit, which lets callers hold a refresh
/// cycle open while they observe what happens around it.
#[derive(Debug, Default)]
pub struct StaticFetchClient {
    responses: HashMap<Endpoint, Value>,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl StaticFetchClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, endpoint: Endpoint, value: Value) -> Self {
        self.responses.insert(endpoint, value);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Number of fetch/post calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            // Permits are consumed so the caller controls exactly how many calls pass.
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.responses
            .get(&endpoint)
            .cloned()
            .ok_or(FetchError::Status {
                endpoint,
                status: 503,
            })
    }
}

#[async_trait]
impl FetchClient for StaticFetchClient {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        self.respond(endpoint).await
    }

    async fn post(&self, endpoint: Endpoint, _body: &Value) -> Result<Value, FetchError> {
        self.respond(endpoint).await
    }
}
