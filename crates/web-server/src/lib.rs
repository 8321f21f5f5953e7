use api_client::{BackendClient, FetchClient};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Config;
use dashboard_cache::DashboardCache;
use normalizer::{Normalizer, NormalizerConfig};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod runner;

pub use runner::AnalysisRunner;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub cache: DashboardCache,
    pub client: Arc<dyn FetchClient>,
    pub runner: AnalysisRunner,
}

impl AppState {
    pub fn new(config: &Config, client: Arc<dyn FetchClient>) -> Self {
        Self {
            cache: DashboardCache::init(Normalizer::new(NormalizerConfig::from(
                &config.dashboard,
            ))),
            client,
            runner: AnalysisRunner::new(config.analysis.clone()),
        }
    }
}

/// Builds the application routes without binding a socket.
pub fn router(state: Arc<AppState>, body_limit_mb: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/refresh", post(handlers::refresh_dashboard))
        .route("/api/dashboard/charts", get(handlers::get_charts))
        .route("/api/dashboard/export", get(handlers::export_dashboard))
        .route(
            "/api/backend/:endpoint",
            get(handlers::get_backend_endpoint).post(handlers::post_backend_endpoint),
        )
        .route("/api/analysis/run", post(handlers::run_analysis))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * body_limit_mb))
}

/// The main function to configure and run the web server.
///
/// Tracing is expected to be initialized by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let client: Arc<dyn FetchClient> = Arc::new(BackendClient::new(&config.backend));
    let state = Arc::new(AppState::new(&config, client));

    // Load-time refresh; the server still starts if the backend is down.
    match state.cache.fetch_and_refresh(state.client.as_ref()).await {
        Ok(outcome) if outcome.failures.is_empty() => {
            tracing::info!("Initial dashboard loaded.");
        }
        Ok(outcome) => {
            tracing::warn!(
                failed = outcome.failures.len(),
                "Initial dashboard loaded with partial data."
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Initial dashboard load failed; serving empty dashboard.");
        }
    }

    let app = router(state, config.server.body_limit_mb);

    tracing::info!("Web server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
