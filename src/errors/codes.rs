use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Named error kinds shared across the image service
///
/// Each kind carries a default message template with `%(name)s` placeholders.
/// Narrower kinds point at their category through [`ErrorKind::parent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Generic base kind
    Unknown,
    MissingArgumentError,
    MissingCredentialError,
    BadAuthStrategy,
    NotFound,
    UnknownScheme,
    BadStoreUri,
    Duplicate,
    StorageFull,
    StorageWriteDenied,
    AuthBadRequest,
    AuthUrlNotFound,
    AuthorizationFailure,
    NotAuthenticated,
    /// Category for every "not allowed" kind
    Forbidden,
    ForbiddenPublicImage,
    ProtectedImageDelete,
    /// Legacy alias of `Forbidden`, kept for older callers
    NotAuthorized,
    /// Category for rejected input
    Invalid,
    InvalidSortKey,
    InvalidFilterRangeValue,
    ReadonlyProperty,
    ReservedProperty,
    AuthorizationRedirect,
    DatabaseMigrationError,
    ClientConnectionError,
    ClientConfigurationError,
    MultipleChoices,
    /// Carries `retry_after`
    LimitExceeded,
    /// Carries `retry_after`
    ServiceUnavailable,
    ServerError,
    UnexpectedStatus,
    InvalidContentType,
    BadRegistryConfiguration,
    BadStoreConfiguration,
    BadDriverConfiguration,
    StoreDeleteNotSupported,
    StoreAddDisabled,
    InvalidNotifierStrategy,
    MaxRedirectsExceeded,
    InvalidRedirect,
    NoServiceEndpoint,
    RegionAmbiguity,
    WorkerCreationFailure,
    SchemaLoadError,
    InvalidObject,
    UnsupportedHeaderFeature,
    InUseByStore,
    ImageSizeLimitExceeded,
    RpcError,
    ConfigNotFound,
    PolicyNotAuthorized,
}

impl ErrorKind {
    /// Every kind, in declaration order
    pub const ALL: [ErrorKind; 52] = [
        Self::Unknown,
        Self::MissingArgumentError,
        Self::MissingCredentialError,
        Self::BadAuthStrategy,
        Self::NotFound,
        Self::UnknownScheme,
        Self::BadStoreUri,
        Self::Duplicate,
        Self::StorageFull,
        Self::StorageWriteDenied,
        Self::AuthBadRequest,
        Self::AuthUrlNotFound,
        Self::AuthorizationFailure,
        Self::NotAuthenticated,
        Self::Forbidden,
        Self::ForbiddenPublicImage,
        Self::ProtectedImageDelete,
        Self::NotAuthorized,
        Self::Invalid,
        Self::InvalidSortKey,
        Self::InvalidFilterRangeValue,
        Self::ReadonlyProperty,
        Self::ReservedProperty,
        Self::AuthorizationRedirect,
        Self::DatabaseMigrationError,
        Self::ClientConnectionError,
        Self::ClientConfigurationError,
        Self::MultipleChoices,
        Self::LimitExceeded,
        Self::ServiceUnavailable,
        Self::ServerError,
        Self::UnexpectedStatus,
        Self::InvalidContentType,
        Self::BadRegistryConfiguration,
        Self::BadStoreConfiguration,
        Self::BadDriverConfiguration,
        Self::StoreDeleteNotSupported,
        Self::StoreAddDisabled,
        Self::InvalidNotifierStrategy,
        Self::MaxRedirectsExceeded,
        Self::InvalidRedirect,
        Self::NoServiceEndpoint,
        Self::RegionAmbiguity,
        Self::WorkerCreationFailure,
        Self::SchemaLoadError,
        Self::InvalidObject,
        Self::UnsupportedHeaderFeature,
        Self::InUseByStore,
        Self::ImageSizeLimitExceeded,
        Self::RpcError,
        Self::ConfigNotFound,
        Self::PolicyNotAuthorized,
    ];

    /// Stable identifier, identical to the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::MissingArgumentError => "MISSING_ARGUMENT_ERROR",
            Self::MissingCredentialError => "MISSING_CREDENTIAL_ERROR",
            Self::BadAuthStrategy => "BAD_AUTH_STRATEGY",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownScheme => "UNKNOWN_SCHEME",
            Self::BadStoreUri => "BAD_STORE_URI",
            Self::Duplicate => "DUPLICATE",
            Self::StorageFull => "STORAGE_FULL",
            Self::StorageWriteDenied => "STORAGE_WRITE_DENIED",
            Self::AuthBadRequest => "AUTH_BAD_REQUEST",
            Self::AuthUrlNotFound => "AUTH_URL_NOT_FOUND",
            Self::AuthorizationFailure => "AUTHORIZATION_FAILURE",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenPublicImage => "FORBIDDEN_PUBLIC_IMAGE",
            Self::ProtectedImageDelete => "PROTECTED_IMAGE_DELETE",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::Invalid => "INVALID",
            Self::InvalidSortKey => "INVALID_SORT_KEY",
            Self::InvalidFilterRangeValue => "INVALID_FILTER_RANGE_VALUE",
            Self::ReadonlyProperty => "READONLY_PROPERTY",
            Self::ReservedProperty => "RESERVED_PROPERTY",
            Self::AuthorizationRedirect => "AUTHORIZATION_REDIRECT",
            Self::DatabaseMigrationError => "DATABASE_MIGRATION_ERROR",
            Self::ClientConnectionError => "CLIENT_CONNECTION_ERROR",
            Self::ClientConfigurationError => "CLIENT_CONFIGURATION_ERROR",
            Self::MultipleChoices => "MULTIPLE_CHOICES",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::ServerError => "SERVER_ERROR",
            Self::UnexpectedStatus => "UNEXPECTED_STATUS",
            Self::InvalidContentType => "INVALID_CONTENT_TYPE",
            Self::BadRegistryConfiguration => "BAD_REGISTRY_CONFIGURATION",
            Self::BadStoreConfiguration => "BAD_STORE_CONFIGURATION",
            Self::BadDriverConfiguration => "BAD_DRIVER_CONFIGURATION",
            Self::StoreDeleteNotSupported => "STORE_DELETE_NOT_SUPPORTED",
            Self::StoreAddDisabled => "STORE_ADD_DISABLED",
            Self::InvalidNotifierStrategy => "INVALID_NOTIFIER_STRATEGY",
            Self::MaxRedirectsExceeded => "MAX_REDIRECTS_EXCEEDED",
            Self::InvalidRedirect => "INVALID_REDIRECT",
            Self::NoServiceEndpoint => "NO_SERVICE_ENDPOINT",
            Self::RegionAmbiguity => "REGION_AMBIGUITY",
            Self::WorkerCreationFailure => "WORKER_CREATION_FAILURE",
            Self::SchemaLoadError => "SCHEMA_LOAD_ERROR",
            Self::InvalidObject => "INVALID_OBJECT",
            Self::UnsupportedHeaderFeature => "UNSUPPORTED_HEADER_FEATURE",
            Self::InUseByStore => "IN_USE_BY_STORE",
            Self::ImageSizeLimitExceeded => "IMAGE_SIZE_LIMIT_EXCEEDED",
            Self::RpcError => "RPC_ERROR",
            Self::ConfigNotFound => "CONFIG_NOT_FOUND",
            Self::PolicyNotAuthorized => "POLICY_NOT_AUTHORIZED",
        }
    }

    /// Default message template for this kind
    pub fn template(&self) -> &'static str {
        match self {
            Self::Unknown => "An unknown exception occurred",
            Self::MissingArgumentError => "Missing required argument.",
            Self::MissingCredentialError => "Missing required credential: %(required)s",
            Self::BadAuthStrategy => {
                "Incorrect auth strategy, expected \"%(expected)s\" but received \"%(received)s\""
            }
            Self::NotFound => "An object with the specified identifier was not found.",
            Self::UnknownScheme => "Unknown scheme '%(scheme)s' found in URI",
            Self::BadStoreUri => "The Store URI was malformed.",
            Self::Duplicate => "An object with the same identifier already exists.",
            Self::StorageFull => "There is not enough disk space on the image storage media.",
            Self::StorageWriteDenied => "Permission to write image storage media denied.",
            Self::AuthBadRequest => "Connect error/bad request to Auth service at URL %(url)s.",
            Self::AuthUrlNotFound => "Auth service at URL %(url)s not found.",
            Self::AuthorizationFailure => "Authorization failed.",
            Self::NotAuthenticated => "You are not authenticated.",
            Self::Forbidden | Self::ForbiddenPublicImage | Self::NotAuthorized => {
                "You are not authorized to complete this action."
            }
            Self::ProtectedImageDelete => "Image %(image_id)s is protected and cannot be deleted.",
            Self::Invalid => "Data supplied was not valid.",
            Self::InvalidSortKey => "Sort key supplied was not valid.",
            Self::InvalidFilterRangeValue => "Unable to filter using the specified range.",
            Self::ReadonlyProperty => "Attribute '%(property)s' is read-only.",
            Self::ReservedProperty => "Attribute '%(property)s' is reserved.",
            Self::AuthorizationRedirect => "Redirecting to %(uri)s for authorization.",
            Self::DatabaseMigrationError => "There was an error migrating the database.",
            Self::ClientConnectionError => "There was an error connecting to a server",
            Self::ClientConfigurationError => "There was an error configuring the client.",
            Self::MultipleChoices => {
                "The request returned a 302 Multiple Choices. This generally means that you \
                 have not included a version indicator in a request URI.\n\nThe body of \
                 response returned:\n%(body)s"
            }
            Self::LimitExceeded => {
                "The request returned a 413 Request Entity Too Large. This generally means \
                 that rate limiting or a quota threshold was breached.\n\nThe response \
                 body:\n%(body)s"
            }
            Self::ServiceUnavailable => {
                "The request returned 503 Service Unavailable. This generally occurs on \
                 service overload or other transient outage."
            }
            Self::ServerError => "The request returned 500 Internal Server Error.",
            Self::UnexpectedStatus => {
                "The request returned an unexpected status: %(status)s.\n\nThe response \
                 body:\n%(body)s"
            }
            Self::InvalidContentType => "Invalid content type %(content_type)s",
            Self::BadRegistryConfiguration => {
                "Registry was not configured correctly on API server. Reason: %(reason)s"
            }
            Self::BadStoreConfiguration => {
                "Store %(store_name)s could not be configured correctly. Reason: %(reason)s"
            }
            Self::BadDriverConfiguration => {
                "Driver %(driver_name)s could not be configured correctly. Reason: %(reason)s"
            }
            Self::StoreDeleteNotSupported => "Deleting images from this store is not supported.",
            Self::StoreAddDisabled => {
                "Configuration for store failed. Adding images to this store is disabled."
            }
            Self::InvalidNotifierStrategy => "'%(strategy)s' is not an available notifier strategy.",
            Self::MaxRedirectsExceeded => "Maximum redirects (%(redirects)s) was exceeded.",
            Self::InvalidRedirect => "Received invalid HTTP redirect.",
            Self::NoServiceEndpoint => "Response from Keystone does not contain a Mosaic endpoint.",
            Self::RegionAmbiguity => {
                "Multiple 'image' service matches for region %(region)s. This generally means \
                 that a region is required and you have not supplied one."
            }
            Self::WorkerCreationFailure => "Server worker creation failed: %(reason)s.",
            Self::SchemaLoadError => "Unable to load schema: %(reason)s",
            Self::InvalidObject => "Provided object does not match schema '%(schema)s': %(reason)s",
            Self::UnsupportedHeaderFeature => "Provided header feature is unsupported: %(feature)s",
            Self::InUseByStore => {
                "The image cannot be deleted because it is in use through the backend store \
                 outside of Mosaic."
            }
            Self::ImageSizeLimitExceeded => "The provided image is too large.",
            Self::RpcError => "%(cls)s exception was raised in the last rpc call: %(val)s",
            Self::ConfigNotFound => "Configuration file not found",
            Self::PolicyNotAuthorized => "Policy Not Authorized",
        }
    }

    /// The next broader kind, `None` only for [`ErrorKind::Unknown`]
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            Self::Unknown => None,
            Self::ForbiddenPublicImage
            | Self::ProtectedImageDelete
            | Self::NotAuthorized
            | Self::ReadonlyProperty
            | Self::ReservedProperty => Some(Self::Forbidden),
            Self::InvalidSortKey | Self::InvalidFilterRangeValue => Some(Self::Invalid),
            _ => Some(Self::Unknown),
        }
    }

    /// Whether this kind is `category` or a narrower variant of it
    pub fn is_a(&self, category: ErrorKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == category {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Kinds that parse a `retry` field into `retry_after`
    pub fn carries_retry_after(&self) -> bool {
        matches!(self, Self::LimitExceeded | Self::ServiceUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_matches_serde_form() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.code().to_string()));
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_templates_are_never_empty() {
        for kind in ErrorKind::ALL {
            assert!(!kind.template().is_empty(), "{kind} has an empty template");
        }
    }

    #[test]
    fn test_forbidden_family() {
        for kind in [
            ErrorKind::ForbiddenPublicImage,
            ErrorKind::ProtectedImageDelete,
            ErrorKind::NotAuthorized,
            ErrorKind::ReadonlyProperty,
            ErrorKind::ReservedProperty,
        ] {
            assert!(kind.is_a(ErrorKind::Forbidden), "{kind} should be forbidden");
            assert!(!kind.is_a(ErrorKind::Invalid));
        }
        assert!(!ErrorKind::PolicyNotAuthorized.is_a(ErrorKind::Forbidden));
    }

    #[test]
    fn test_invalid_family() {
        assert!(ErrorKind::InvalidSortKey.is_a(ErrorKind::Invalid));
        assert!(ErrorKind::InvalidFilterRangeValue.is_a(ErrorKind::Invalid));
        assert!(!ErrorKind::InvalidContentType.is_a(ErrorKind::Invalid));
    }

    #[test]
    fn test_every_kind_is_unknown() {
        for kind in ErrorKind::ALL {
            assert!(kind.is_a(ErrorKind::Unknown));
        }
        assert!(!ErrorKind::Unknown.is_a(ErrorKind::NotFound));
    }

    #[test]
    fn test_retry_after_kinds() {
        let carriers: Vec<_> = ErrorKind::ALL
            .iter()
            .filter(|k| k.carries_retry_after())
            .collect();
        assert_eq!(
            carriers,
            vec![&ErrorKind::LimitExceeded, &ErrorKind::ServiceUnavailable]
        );
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorKind::RpcError.to_string(), "RPC_ERROR");
    }
}
