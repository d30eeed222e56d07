pub mod handlers;
pub mod host;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod versions;
