use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

/// Scheme and host the client used to reach us, as far as the request tells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    /// `host[:port]` from the `Host` header or the URI authority
    pub host: Option<String>,
}

impl RequestOrigin {
    /// `scheme://host`, using `fallback_host` when the request named none
    pub fn host_url(&self, fallback_host: &str) -> String {
        let host = self.host.as_deref().unwrap_or(fallback_host);
        format!("{}://{}", self.scheme, host)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .filter(|h| !h.is_empty());

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| parts.uri.scheme_str())
            .unwrap_or("http")
            .to_string();

        Ok(Self { scheme, host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> RequestOrigin {
        let (mut parts, _) = request.into_parts();
        match RequestOrigin::from_request_parts(&mut parts, &()).await {
            Ok(origin) => origin,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn test_host_header() {
        let request = Request::builder()
            .uri("/")
            .header("host", "api.example.com")
            .body(())
            .unwrap();
        let origin = extract(request).await;
        assert_eq!(origin.host_url("0.0.0.0:9292"), "http://api.example.com");
    }

    #[tokio::test]
    async fn test_forwarded_proto_wins() {
        let request = Request::builder()
            .uri("/")
            .header("host", "api.example.com:8443")
            .header("x-forwarded-proto", "https, http")
            .body(())
            .unwrap();
        let origin = extract(request).await;
        assert_eq!(origin.host_url("0.0.0.0:9292"), "https://api.example.com:8443");
    }

    #[tokio::test]
    async fn test_absolute_uri_without_host_header() {
        let request = Request::builder()
            .uri("https://images.example.org/versions")
            .body(())
            .unwrap();
        let origin = extract(request).await;
        assert_eq!(origin.host_url("0.0.0.0:9292"), "https://images.example.org");
    }

    #[tokio::test]
    async fn test_missing_host_uses_fallback() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let origin = extract(request).await;
        assert_eq!(origin.host, None);
        assert_eq!(origin.host_url("127.0.0.1:9292"), "http://127.0.0.1:9292");
    }
}
