use utoipa::OpenApi;

use crate::api::versions::{Link, VersionDescriptor, VersionList, VersionStatus};
use crate::errors::{ErrorDetail, ErrorKind, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mosaic Image Service API",
        version = "0.1.0",
        description = "Version discovery for the Mosaic image service, plus the error envelope shared by its endpoints.",
    ),
    paths(
        crate::api::versions::index,
        crate::api::handlers::health,
    ),
    components(
        schemas(
            VersionList,
            VersionDescriptor,
            VersionStatus,
            Link,
            ErrorResponse,
            ErrorDetail,
            ErrorKind,
        )
    ),
    tags(
        (name = "versions", description = "API version discovery"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_discovery_root() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
