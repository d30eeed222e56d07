// Library exports for the binary and integration tests
pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
