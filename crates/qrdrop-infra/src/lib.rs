//! qrdrop Infrastructure Library
//!
//! Shared infrastructure used by both the HTTP server and the serverless function:
//! - Telemetry initialization (tracing subscriber)
//! - Middleware (request ID)

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::{init_telemetry, shutdown_telemetry};
