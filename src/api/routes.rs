use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, not_found, AppState};
use super::middleware::logging_middleware;
use super::openapi::ApiDoc;
use super::versions;
use crate::metrics;

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Version discovery
        .route("/", get(versions::index))
        .route("/versions", get(versions::index))
        // Health check
        .route("/health", get(health))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Add middleware (order matters: logging -> metrics -> cors -> trace)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
