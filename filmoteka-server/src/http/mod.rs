//! HTTP server layer
//!
//! Axum server with:
//! - Explicit method + path route table with JSON 404 fallthrough
//! - Request tracing
//! - Graceful shutdown with a bounded grace period
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod router;
pub mod routes;

pub use server::{build_router, run_server, shutdown_signal, AppState, ServerConfig, ServerError};
pub use error::ApiError;
pub use router::Route;
