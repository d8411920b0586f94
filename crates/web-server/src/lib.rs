use analytics::AnalyticsEngine;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use configuration::Config;
use evaluator::{DisplayClamps, FormulaEvaluator};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Both engines are stateless; the only per-deployment data is the loaded
/// configuration.
#[derive(Debug)]
pub struct AppState {
    pub evaluator: FormulaEvaluator,
    pub analytics: AnalyticsEngine,
    pub clamps: DisplayClamps,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            evaluator: FormulaEvaluator::new(),
            analytics: AnalyticsEngine::new(),
            clamps: DisplayClamps::new(&config.display.clamps),
            config,
        }
    }
}

/// Builds the router with every route and middleware layer attached.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/concepts", get(handlers::list_concepts))
        .route("/api/concepts/:concept/defaults", get(handlers::concept_defaults))
        .route("/api/evaluate", post(handlers::evaluate))
        .route("/api/policies", get(handlers::list_policies))
        .route("/api/analyze/trend", post(handlers::analyze_trend))
        .route("/api/analyze/correlation", post(handlers::analyze_correlation))
        .route("/api/analyze/csv", post(handlers::analyze_csv))
        .route("/api/samples/france", get(handlers::france_sample))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 5))
}

/// The main function to configure and run the web server.
///
/// Tracing is initialized by the caller.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    let app = app(Arc::new(AppState::new(config)));

    tracing::info!("Web server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
