use crate::{error::AppError, runner::AnalysisRun, AppState};
use api_client::Endpoint;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use core_types::ViewModel;
use dashboard_cache::{EndpointFailure, RefreshOutcome};
use presentation::{overview_cards, DashboardCharts, ExportReport, OverviewCard};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub model: Arc<ViewModel>,
    /// Endpoints that failed this cycle; their sections show previous values.
    pub warnings: Vec<EndpointFailure>,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            model: outcome.model,
            warnings: outcome.failures,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub cards: Vec<OverviewCard>,
    pub charts: DashboardCharts,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub run: AnalysisRun,
    pub refresh: RefreshResponse,
}

/// # GET /api/dashboard
/// `null` until the first successful refresh.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Option<Arc<ViewModel>>> {
    Json(state.cache.get().await)
}

/// # POST /api/dashboard/refresh
pub async fn refresh_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, AppError> {
    let outcome = state.cache.fetch_and_refresh(state.client.as_ref()).await?;
    Ok(Json(outcome.into()))
}

/// # GET /api/dashboard/charts
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartsResponse> {
    let model = state.cache.get().await.unwrap_or_default();
    Json(ChartsResponse {
        cards: overview_cards(&model),
        charts: DashboardCharts::from_view_model(&model),
    })
}

/// # GET /api/dashboard/export
/// Sent as a file download.
pub async fn export_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let model = state
        .cache
        .get()
        .await
        .ok_or_else(|| AppError::NotFound("No dashboard data to export yet".to_string()))?;

    let report = ExportReport::from_view_model(&model);
    let body = report.to_json_pretty()?;
    let disposition = format!("attachment; filename=\"{}\"", report.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// # GET /api/backend/:endpoint
pub async fn get_backend_endpoint(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let endpoint: Endpoint = name.parse()?;
    Ok(Json(state.client.fetch(endpoint).await?))
}

/// # POST /api/backend/:endpoint
pub async fn post_backend_endpoint(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let endpoint: Endpoint = name.parse()?;
    Ok(Json(state.client.post(endpoint, &body).await?))
}

/// # POST /api/analysis/run
/// Regenerates the backend's data, then refreshes the dashboard from it.
pub async fn run_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let run = state.runner.run().await?;
    let outcome = state.cache.fetch_and_refresh(state.client.as_ref()).await?;
    Ok(Json(AnalysisResponse {
        run,
        refresh: outcome.into(),
    }))
}
