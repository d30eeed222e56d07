use thiserror::Error;
use url::Url;

/// A request to redirect the client to another URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("redirect to {url}")]
pub struct RedirectRequest {
    url: Url,
}

impl RedirectRequest {
    /// Parse an absolute URL; malformed input is returned to the caller as-is
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let redirect =
            RedirectRequest::parse("https://images.example.com:9292/v1/images?limit=10").unwrap();
        assert_eq!(redirect.scheme(), "https");
        assert_eq!(redirect.host(), Some("images.example.com"));
        assert_eq!(redirect.path(), "/v1/images");
        assert_eq!(redirect.query(), Some("limit=10"));
        assert_eq!(redirect.url().port(), Some(9292));
    }

    #[test]
    fn test_parse_without_query() {
        let redirect = RedirectRequest::parse("http://localhost/").unwrap();
        assert_eq!(redirect.path(), "/");
        assert_eq!(redirect.query(), None);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert_eq!(
            RedirectRequest::parse("/relative/only"),
            Err(url::ParseError::RelativeUrlWithoutBase)
        );
        assert!(RedirectRequest::parse("http://").is_err());
    }

    #[test]
    fn test_display() {
        let redirect = RedirectRequest::parse("http://example.com/login").unwrap();
        assert_eq!(redirect.to_string(), "redirect to http://example.com/login");
    }
}
