pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use opsdesk_core::ops::OpsdeskEngine;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Construct the full Axum router for the Opsdesk API.
///
/// The router carries `Arc<OpsdeskEngine>` as shared state.
///
/// CORS is restrictive by default (localhost only). Set the
/// `OPSDESK_CORS_ORIGINS` environment variable to a comma-separated list of
/// allowed origins to override (e.g. `https://app.example.com`). Set it to
/// `*` to allow all origins (not recommended for production).
pub fn router(engine: Arc<OpsdeskEngine>) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/agents", get(handlers::agents_handler))
        .route("/financial/process", post(handlers::financial_handler))
        .route("/hr/process", post(handlers::hr_handler))
        .route("/support/ticket", post(handlers::support_ticket_handler))
        .route(
            "/integrations/api",
            post(handlers::integration_setup_handler),
        )
        .route("/integrations", get(handlers::integrations_handler))
        .route("/analytics/operations", get(handlers::analytics_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(engine)
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{HeaderName, Method};

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("content-type")])
        .max_age(std::time::Duration::from_secs(3600));

    match std::env::var("OPSDESK_CORS_ORIGINS") {
        Ok(val) if val == "*" => base.allow_origin(AllowOrigin::any()),
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        Err(_) => {
            // Default: localhost only
            let origins: Vec<_> = [
                "http://localhost:3000",
                "http://localhost:8003",
                "http://127.0.0.1:3000",
                "http://127.0.0.1:8003",
            ]
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
            base.allow_origin(origins)
        }
    }
}
