use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Header carrying the request correlation id
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of the current request, available to handlers as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Longest client-supplied request id that is echoed back
const MAX_REQUEST_ID_LEN: usize = 128;

/// Log every request and tag the response with an `x-request-id`
///
/// A well-formed id sent by the client is reused, otherwise a new UUID is
/// generated. Handlers see the same id through the [`RequestId`] extension.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_request_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    info!(request_id = %request_id, method = %method, path = %path, "Incoming request");

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    if status.is_client_error() || status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration_ms,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration_ms,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}

fn accept_request_id(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    let well_formed = !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    well_formed.then(|| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_request_id() {
        assert_eq!(accept_request_id("abc-123"), Some("abc-123".to_string()));
        assert_eq!(accept_request_id("  req_1.2 "), Some("req_1.2".to_string()));
        assert_eq!(accept_request_id(""), None);
        assert_eq!(accept_request_id("has space"), None);
        assert_eq!(accept_request_id(&"x".repeat(MAX_REQUEST_ID_LEN + 1)), None);
    }
}
