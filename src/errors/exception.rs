use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use super::codes::ErrorKind;
use super::template::{interpolate, Fields, FormatPolicy, TemplateError};
use crate::metrics::ERROR_MESSAGE_FALLBACKS_TOTAL;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error of one [`ErrorKind`] with its rendered message
///
/// Construction never fails under [`FormatPolicy::Lenient`]: when the
/// template cannot be rendered the message is the template itself and
/// [`MosaicError::is_fallback`] reports it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MosaicError {
    kind: ErrorKind,
    message: String,
    fields: Fields,
    retry_after: Option<i64>,
    fallback: bool,
    #[source]
    source: Option<BoxError>,
}

impl MosaicError {
    /// Error with the kind's default message and no fields
    pub fn new(kind: ErrorKind) -> Self {
        Self::builder(kind).build()
    }

    /// Error rendered from keyword fields
    pub fn with_fields<I, K, V>(kind: ErrorKind, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        fields
            .into_iter()
            .fold(Self::builder(kind), |builder, (k, v)| builder.field(k, v))
            .build()
    }

    pub fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder {
            kind,
            template: None,
            fields: Fields::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Seconds to wait before retrying, for kinds that carry it
    pub fn retry_after(&self) -> Option<i64> {
        self.retry_after
    }

    /// True when the template could not be rendered and the literal was kept
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Whether this error is `category` or a narrower variant of it
    pub fn is(&self, category: ErrorKind) -> bool {
        self.kind.is_a(category)
    }
}

/// Collects fields for a [`MosaicError`]
#[derive(Debug)]
pub struct ErrorBuilder {
    kind: ErrorKind,
    template: Option<String>,
    fields: Fields,
    source: Option<BoxError>,
}

impl ErrorBuilder {
    pub fn field(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.insert(name.into(), value.to_string());
        self
    }

    /// Shorthand for the `retry` field
    pub fn retry(self, seconds: impl fmt::Display) -> Self {
        self.field("retry", seconds)
    }

    /// Replace the kind's default template; an empty override is ignored
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Build with [`FormatPolicy::Lenient`]
    pub fn build(self) -> MosaicError {
        let kind = self.kind;
        let template = self.template_or_default().to_string();
        let (message, fallback) = match interpolate(&template, &self.fields) {
            Ok(message) => (message, false),
            Err(e) => {
                warn!(kind = %kind, error = %e, "Falling back to unrendered message template");
                ERROR_MESSAGE_FALLBACKS_TOTAL
                    .with_label_values(&[kind.code()])
                    .inc();
                (template, true)
            }
        };
        self.finish(message, fallback)
    }

    /// Build with [`FormatPolicy::Strict`]
    pub fn try_build(self) -> Result<MosaicError, TemplateError> {
        let message = interpolate(self.template_or_default(), &self.fields)?;
        Ok(self.finish(message, false))
    }

    pub fn build_with(self, policy: FormatPolicy) -> Result<MosaicError, TemplateError> {
        match policy {
            FormatPolicy::Lenient => Ok(self.build()),
            FormatPolicy::Strict => self.try_build(),
        }
    }

    fn template_or_default(&self) -> &str {
        match self.template.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => self.kind.template(),
        }
    }

    fn finish(self, message: String, fallback: bool) -> MosaicError {
        let retry_after = if self.kind.carries_retry_after() {
            parse_retry(self.fields.get("retry").map(String::as_str))
        } else {
            None
        };

        MosaicError {
            kind: self.kind,
            message,
            fields: self.fields,
            retry_after,
            fallback,
            source: self.source,
        }
    }
}

/// Parse a `retry` value, treating anything but an integer as absent
pub fn parse_retry(value: Option<&str>) -> Option<i64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// Helper for creating common errors
impl MosaicError {
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    pub fn protected_image_delete(image_id: impl fmt::Display) -> Self {
        Self::builder(ErrorKind::ProtectedImageDelete)
            .field("image_id", image_id)
            .build()
    }

    pub fn invalid_content_type(content_type: impl fmt::Display) -> Self {
        Self::builder(ErrorKind::InvalidContentType)
            .field("content_type", content_type)
            .build()
    }

    pub fn limit_exceeded(body: impl fmt::Display, retry: Option<&str>) -> Self {
        let builder = Self::builder(ErrorKind::LimitExceeded).field("body", body);
        match retry {
            Some(retry) => builder.retry(retry).build(),
            None => builder.build(),
        }
    }

    pub fn service_unavailable(retry: Option<&str>) -> Self {
        let builder = Self::builder(ErrorKind::ServiceUnavailable);
        match retry {
            Some(retry) => builder.retry(retry).build(),
            None => builder.build(),
        }
    }

    pub fn unexpected_status(status: u16, body: impl fmt::Display) -> Self {
        Self::builder(ErrorKind::UnexpectedStatus)
            .field("status", status)
            .field("body", body)
            .build()
    }

    pub fn server_error() -> Self {
        Self::new(ErrorKind::ServerError)
    }
}
