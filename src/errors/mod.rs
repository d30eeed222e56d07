//! Error taxonomy shared across the image service

pub mod codes;
pub mod exception;
pub mod redirect;
pub mod response;
pub mod template;

pub use codes::ErrorKind;
pub use exception::{parse_retry, ErrorBuilder, MosaicError};
pub use redirect::RedirectRequest;
pub use response::{ErrorDetail, ErrorResponse};
pub use template::{interpolate, Fields, FormatPolicy, TemplateError};
