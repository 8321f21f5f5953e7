//! # Tradescope Dashboard Cache
//!
//! Holds the single current [`ViewModel`] and is the only place that replaces
//! it. Readers get a cheap `Arc` snapshot; a refresh normalizes the new cycle
//! against the held model and swaps the `Arc` in one write, so a reader sees
//! either the old model or the new one and never a mix.

use api_client::{fetch_all, Endpoint, FetchClient, FetchResults};
use core_types::ViewModel;
use normalizer::{Normalizer, RawAnalysisPayload};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub mod error;

pub use error::RefreshError;

/// One endpoint that failed during a refresh, as shown in the user banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointFailure {
    pub endpoint: Endpoint,
    pub message: String,
}

/// The result of a successful, possibly partial, refresh.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub model: Arc<ViewModel>,
    /// Non-fatal: these endpoints kept their previous (or default) values.
    pub failures: Vec<EndpointFailure>,
}

pub struct DashboardCache {
    normalizer: Normalizer,
    model: RwLock<Option<Arc<ViewModel>>>,
    // Held for a whole refresh cycle; a second refresh is rejected, not queued.
    refresh_guard: Mutex<()>,
}

impl DashboardCache {
    /// An empty cache. `get` returns `None` until the first successful refresh.
    pub fn init(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            model: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> Option<Arc<ViewModel>> {
        self.model.read().await.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_guard.try_lock().is_err()
    }

    /// Normalizes an already-fetched cycle against the held model.
    pub async fn refresh(&self, results: FetchResults) -> Result<RefreshOutcome, RefreshError> {
        let _guard = self
            .refresh_guard
            .try_lock()
            .map_err(|_| RefreshError::InProgress)?;
        self.apply(results).await
    }

    /// Fetches every endpoint and refreshes, holding the guard for the whole cycle.
    pub async fn fetch_and_refresh(
        &self,
        client: &dyn FetchClient,
    ) -> Result<RefreshOutcome, RefreshError> {
        let _guard = self.refresh_guard.try_lock().map_err(|_| {
            tracing::warn!("Refresh requested while another is in flight; rejecting.");
            RefreshError::InProgress
        })?;

        tracing::info!("Fetching {} endpoints for dashboard refresh.", Endpoint::ALL.len());
        let results = fetch_all(client, &Endpoint::ALL).await;
        self.apply(results).await
    }

    async fn apply(&self, mut results: FetchResults) -> Result<RefreshOutcome, RefreshError> {
        let failures: Vec<EndpointFailure> = results
            .take_failures()
            .into_iter()
            .map(|(endpoint, error)| EndpointFailure {
                endpoint,
                message: error.to_string(),
            })
            .collect();

        if results.is_total_failure() {
            tracing::error!(
                failed = failures.len(),
                "No endpoint delivered data; the current dashboard is kept."
            );
            return Err(RefreshError::AllEndpointsFailed { failures });
        }

        let raw = RawAnalysisPayload::from_fetch_results(&results);
        let previous = self.get().await;
        let next = Arc::new(self.normalizer.normalize(&raw, previous.as_deref()));

        *self.model.write().await = Some(Arc::clone(&next));

        if failures.is_empty() {
            tracing::info!("Dashboard refreshed from {} endpoints.", results.succeeded());
        } else {
            tracing::warn!(
                succeeded = results.succeeded(),
                failed = failures.len(),
                "Dashboard refreshed with partial data."
            );
        }

        Ok(RefreshOutcome {
            model: next,
            failures,
        })
    }
}
