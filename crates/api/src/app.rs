use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::Any, cors::CorsLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{require_agent_auth, security_headers_middleware, trace_id};
use crate::routes::{health, reports};
use domain::store::WorkEntryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorkEntryStore>,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, store: Arc<dyn WorkEntryStore>) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        store,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Report routes (require JWT agent authentication)
    let report_routes = Router::new()
        .route(
            "/api/v1/reports/work-entries",
            get(reports::list_work_entries),
        )
        .route("/api/v1/reports/work-summary", get(reports::work_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_agent_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(report_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
