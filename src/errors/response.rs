use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::codes::ErrorKind;
use super::exception::MosaicError;

/// Structured error response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status chosen by the caller
    #[serde(skip)]
    pub status: StatusCode,
    /// Always false for errors
    pub success: bool,
    /// Error details
    pub error: ErrorDetail,
}

/// Error details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Error kind for programmatic handling
    pub code: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracing
    pub request_id: String,
    /// Seconds the client should wait before retrying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<i64>,
}

impl ErrorResponse {
    /// Wrap an error in the envelope, sent with `status`
    pub fn new(status: StatusCode, err: &MosaicError) -> Self {
        Self::with_request_id(status, err, Uuid::new_v4().to_string())
    }

    /// Create error with custom request ID
    pub fn with_request_id(
        status: StatusCode,
        err: &MosaicError,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            status,
            success: false,
            error: ErrorDetail {
                code: err.kind(),
                message: err.message().to_string(),
                request_id: request_id.into(),
                retry_after: err.retry_after(),
            },
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        let retry_after = self.error.retry_after;

        let mut response = (status, Json(self)).into_response();
        // Retry-After is delta-seconds on the wire, so negative hints go out as 0
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds.max(0)));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let err = MosaicError::not_found();
        let json = serde_json::to_value(ErrorResponse::new(StatusCode::NOT_FOUND, &err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(
            json["error"]["message"],
            "An object with the specified identifier was not found."
        );
        assert!(json["error"]["request_id"].is_string());
        assert!(json["error"].get("retry_after").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_error_code_follows_kind() {
        let err = MosaicError::new(ErrorKind::InvalidSortKey);
        let response = ErrorResponse::new(StatusCode::BAD_REQUEST, &err);
        assert_eq!(response.error.code, ErrorKind::InvalidSortKey);
        assert_eq!(response.error.message, "Sort key supplied was not valid.");
    }

    #[test]
    fn test_custom_request_id() {
        let err = MosaicError::forbidden();
        let response = ErrorResponse::with_request_id(StatusCode::FORBIDDEN, &err, "req-1");
        assert_eq!(response.error.request_id, "req-1");
    }

    #[test]
    fn test_into_response_uses_given_status() {
        let err = MosaicError::not_found();
        let response = ErrorResponse::new(StatusCode::NOT_FOUND, &err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_retry_after_header() {
        let err = MosaicError::service_unavailable(Some("120"));
        let response = ErrorResponse::new(StatusCode::SERVICE_UNAVAILABLE, &err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "120"
        );
    }

    #[test]
    fn test_negative_retry_after_clamped_on_wire() {
        let err = MosaicError::limit_exceeded("quota", Some("-5"));
        let response = ErrorResponse::new(StatusCode::PAYLOAD_TOO_LARGE, &err);
        assert_eq!(response.error.retry_after, Some(-5));

        let response = response.into_response();
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "0");
    }
}
