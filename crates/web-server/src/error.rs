use api_client::error::FetchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashboard_cache::RefreshError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis script exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("An analysis run is already in progress.")]
    InProgress,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Refresh error: {0}")]
    Refresh(#[from] RefreshError),
    #[error("Backend error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::Refresh(RefreshError::InProgress) => {
                (StatusCode::CONFLICT, json!({ "error": message }))
            }
            AppError::Refresh(RefreshError::AllEndpointsFailed { failures }) => {
                tracing::error!(
                    failed = failures.len(),
                    "Dashboard refresh failed on every endpoint."
                );
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": message, "failures": failures }),
                )
            }
            AppError::Fetch(FetchError::UnknownEndpoint(name)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("Unknown endpoint '{name}'") }),
            ),
            AppError::Fetch(FetchError::Unsupported { .. }) => {
                (StatusCode::NOT_IMPLEMENTED, json!({ "error": message }))
            }
            AppError::Fetch(fetch_err) => {
                tracing::warn!(error = %fetch_err, "Backend request failed.");
                (StatusCode::BAD_GATEWAY, json!({ "error": message }))
            }
            AppError::Analysis(AnalysisError::InProgress) => {
                (StatusCode::CONFLICT, json!({ "error": message }))
            }
            AppError::Analysis(analysis_err) => {
                tracing::error!(error = ?analysis_err, "Analysis run failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            AppError::Serialization(serde_err) => {
                tracing::error!(error = ?serde_err, "Serialization error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal serialization error occurred" }),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}
