use crate::error::FetchError;
use async_trait::async_trait;
use configuration::BackendConfig;
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeMap;

pub mod directory;
pub mod endpoints;
pub mod error;
pub mod mock;

// --- Public API ---
pub use directory::DirectoryClient;
pub use endpoints::Endpoint;
pub use mock::StaticFetchClient;

/// The abstract interface to whatever produces the analysis JSON.
///
/// The cache and the web server only talk to this trait, so the HTTP backend,
/// a directory of pipeline output files, or an in-memory stub can be swapped in.
/// Implementations never panic and never retry; every failure comes back as a
/// typed `FetchError` and the caller decides the fallback.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Issues a GET for the endpoint and returns the parsed JSON body.
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError>;

    /// Issues a POST with a JSON body and returns the parsed JSON response.
    async fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value, FetchError>;
}

/// A `FetchClient` backed by the HTTP analysis backend.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn read_json(
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<Value, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        serde_json::from_str::<Value>(&text).map_err(|e| FetchError::Parse {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FetchClient for BackendClient {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let url = self.url_for(endpoint);
        tracing::debug!(%endpoint, %url, "Fetching endpoint.");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        Self::read_json(endpoint, response).await
    }

    async fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value, FetchError> {
        let url = self.url_for(endpoint);
        tracing::debug!(%endpoint, %url, "Posting to endpoint.");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        Self::read_json(endpoint, response).await
    }
}

/// The outcome of one fetch cycle: one result per requested endpoint.
#[derive(Debug, Default)]
pub struct FetchResults {
    results: BTreeMap<Endpoint, Result<Value, FetchError>>,
}

impl FetchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, endpoint: Endpoint, result: Result<Value, FetchError>) {
        self.results.insert(endpoint, result);
    }

    /// Builder-style helper for a successful endpoint.
    pub fn with_ok(mut self, endpoint: Endpoint, value: Value) -> Self {
        self.insert(endpoint, Ok(value));
        self
    }

    /// Builder-style helper for a failed endpoint.
    pub fn with_err(mut self, endpoint: Endpoint, error: FetchError) -> Self {
        self.insert(endpoint, Err(error));
        self
    }

    /// The payload for an endpoint, if it was requested and succeeded.
    pub fn payload(&self, endpoint: Endpoint) -> Option<&Value> {
        self.results.get(&endpoint).and_then(|r| r.as_ref().ok())
    }

    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.is_ok()).count()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when nothing at all can be normalized from this cycle.
    pub fn is_total_failure(&self) -> bool {
        self.succeeded() == 0
    }

    /// Removes and returns the failures, leaving only the successful payloads.
    pub fn take_failures(&mut self) -> Vec<(Endpoint, FetchError)> {
        let failed: Vec<Endpoint> = self
            .results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(endpoint, _)| *endpoint)
            .collect();

        failed
            .into_iter()
            .filter_map(|endpoint| match self.results.remove(&endpoint) {
                Some(Err(e)) => Some((endpoint, e)),
                _ => None,
            })
            .collect()
    }
}

/// Fetches every endpoint concurrently and waits for all of them.
///
/// A failing endpoint only affects its own slot in the returned results.
pub async fn fetch_all(client: &dyn FetchClient, endpoints: &[Endpoint]) -> FetchResults {
    let requests = endpoints
        .iter()
        .map(|&endpoint| async move { (endpoint, client.fetch(endpoint).await) });

    let mut results = FetchResults::new();
    for (endpoint, result) in join_all(requests).await {
        if let Err(e) = &result {
            tracing::warn!(%endpoint, error = %e, "Endpoint fetch failed.");
        }
        results.insert(endpoint, result);
    }

    tracing::debug!(
        succeeded = results.succeeded(),
        requested = results.len(),
        "Fetch cycle complete."
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(base_url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: base_url.to_string(),
        })
    }

    #[test]
    fn test_url_for_strips_trailing_slash() {
        let client = backend("http://localhost:5000/");
        assert_eq!(
            client.url_for(Endpoint::AnalysisSummary),
            "http://localhost:5000/api/analysis/summary"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        let client = backend("http://127.0.0.1:9");
        let err = client.fetch(Endpoint::Commodities).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Network {
                endpoint: Endpoint::Commodities,
                ..
            }
        ));
    }

    /// Starts a throwaway backend on an ephemeral port and returns its base URL.
    async fn serve(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn canned_backend() -> axum::Router {
        use axum::{http::StatusCode, routing::get};

        axum::Router::new()
            .route(
                Endpoint::AnalysisSummary.path(),
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") })
                    .post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
            )
            .route(Endpoint::Commodities.path(), get(|| async { "<html>not json</html>" }))
            .route(
                Endpoint::ImportSources.path(),
                get(|| async { r#"{ "sources": [] }"# }),
            )
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_status_error() {
        let client = backend(&serve(canned_backend()).await);

        let err = client.fetch(Endpoint::AnalysisSummary).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status {
                endpoint: Endpoint::AnalysisSummary,
                status: 500
            }
        ));

        let err = client
            .post(Endpoint::AnalysisSummary, &json!({ "refresh": true }))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));

        let err = client.fetch(Endpoint::RegionalDistribution).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_a_parse_error() {
        let client = backend(&serve(canned_backend()).await);
        let err = client.fetch(Endpoint::Commodities).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Parse {
                endpoint: Endpoint::Commodities,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_success_body_is_parsed() {
        let client = backend(&serve(canned_backend()).await);
        let value = client.fetch(Endpoint::ImportSources).await.unwrap();
        assert_eq!(value, json!({ "sources": [] }));
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let client = StaticFetchClient::new()
            .with_response(Endpoint::AnalysisSummary, json!({ "summary": {} }))
            .with_response(Endpoint::Commodities, json!({ "exports": [] }));

        let mut results = fetch_all(&client, &Endpoint::ALL).await;

        assert_eq!(results.len(), Endpoint::ALL.len());
        assert_eq!(results.succeeded(), 2);
        assert!(!results.is_total_failure());
        assert!(results.payload(Endpoint::AnalysisSummary).is_some());
        assert!(results.payload(Endpoint::ImportSources).is_none());

        let failures = results.take_failures();
        assert_eq!(failures.len(), 5);
        assert_eq!(results.len(), 2);
        assert!(results.payload(Endpoint::Commodities).is_some());
    }

    #[tokio::test]
    async fn test_fetch_all_with_nothing_available_is_total_failure() {
        let client = StaticFetchClient::new();
        let results = fetch_all(&client, &[Endpoint::AnalysisSummary]).await;
        assert!(results.is_total_failure());
    }
}
