//! Health check endpoint

use axum::response::Response;
use serde::Serialize;

use super::json_ok;
use crate::http::error::ApiError;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub(crate) fn health() -> Result<Response, ApiError> {
    json_ok(&HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
