use axum::{
    extract::{Extension, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

use super::middleware::RequestId;
use crate::config::ApiConfig;
use crate::errors::{ErrorKind, ErrorResponse, MosaicError};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub api: ApiConfig,
    pub instance_id: String,
    /// `host:port` the server listens on, used when a request names no host
    pub bind_address: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "mosaic-api",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "v1_enabled": state.api.enable_v1_api,
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Any route the router does not know
pub async fn not_found(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    uri: Uri,
) -> ErrorResponse {
    let respond = |status: StatusCode, err: &MosaicError| match &request_id {
        Some(Extension(RequestId(id))) => ErrorResponse::with_request_id(status, err, id.as_str()),
        None => ErrorResponse::new(status, err),
    };

    let built = MosaicError::builder(ErrorKind::NotFound)
        .field("path", uri.path())
        .build_with(state.api.format_policy);

    match built {
        Ok(err) => respond(StatusCode::NOT_FOUND, &err),
        Err(e) => {
            error!(error = %e, "Failed to render not-found message");
            let err = MosaicError::builder(ErrorKind::ServerError).source(e).build();
            respond(StatusCode::INTERNAL_SERVER_ERROR, &err)
        }
    }
}
