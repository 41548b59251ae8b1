//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request correlation identifier re-exported for adapters and tests.
pub use domain::TraceId;
/// Trace correlation middleware applied to the HTTP server.
pub use middleware::Trace;
