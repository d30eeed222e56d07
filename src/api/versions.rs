//! Version discovery
//!
//! `GET /` answers with every API version this deployment serves. The
//! response is always `300 Multiple Choices`, even when the list is empty,
//! because clients branch on that status to start version negotiation.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use super::handlers::AppState;
use super::host::RequestOrigin;
use crate::config::ApiConfig;
use crate::errors::{ErrorKind, ErrorResponse, MosaicError};
use crate::metrics::VERSION_LISTINGS_TOTAL;

/// Path segment the v1 API is mounted under
pub const V1_PATH: &str = "v1";

/// Lifecycle state of an advertised version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum VersionStatus {
    Current,
    Supported,
    Deprecated,
}

/// Hypermedia link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Link relation, e.g. "self"
    pub rel: String,
    /// Absolute URL
    pub href: String,
}

/// One advertised API version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionDescriptor {
    /// Version identifier, e.g. "v1.1"
    pub id: String,
    pub status: VersionStatus,
    pub links: Vec<Link>,
}

impl VersionDescriptor {
    fn new(version: &str, path: &str, status: VersionStatus, host_url: &str) -> Self {
        Self {
            id: format!("v{}", version),
            status,
            links: vec![Link {
                rel: "self".to_string(),
                href: format!("{}/{}/", host_url, path),
            }],
        }
    }
}

/// Body of the version discovery response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionList {
    pub versions: Vec<VersionDescriptor>,
}

/// Versions served under `/v1/`, newest first
const V1_VERSIONS: [(&str, VersionStatus); 2] = [
    ("1.1", VersionStatus::Current),
    ("1.0", VersionStatus::Supported),
];

/// Versions enabled by `api`, with self-links rooted at `host_url`
pub fn build_versions(host_url: &str, api: &ApiConfig) -> VersionList {
    let host_url = host_url.trim_end_matches('/');
    let mut versions = Vec::new();

    if api.enable_v1_api {
        versions.extend(
            V1_VERSIONS
                .iter()
                .map(|(version, status)| VersionDescriptor::new(version, V1_PATH, *status, host_url)),
        );
    }

    VersionList { versions }
}

/// Render the version list as a `300 Multiple Choices` JSON response
pub fn list_versions(host_url: &str, api: &ApiConfig) -> Response {
    let list = build_versions(host_url, api);

    VERSION_LISTINGS_TOTAL
        .with_label_values(&[if api.enable_v1_api { "true" } else { "false" }])
        .inc();

    match serde_json::to_vec(&list) {
        Ok(body) => {
            debug!(count = list.versions.len(), host_url = %host_url, "Listing API versions");
            (
                StatusCode::MULTIPLE_CHOICES,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize version list");
            let err = MosaicError::builder(ErrorKind::ServerError).source(e).build();
            ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, &err).into_response()
        }
    }
}

/// List supported API versions
#[utoipa::path(
    get,
    path = "/",
    tag = "versions",
    responses(
        (status = 300, description = "Supported API versions", body = VersionList)
    )
)]
pub async fn index(State(state): State<AppState>, origin: RequestOrigin) -> Response {
    let host_url = match state.api.public_endpoint.as_deref() {
        Some(endpoint) => endpoint.to_string(),
        None => origin.host_url(&state.bind_address),
    };
    list_versions(&host_url, &state.api)
}
