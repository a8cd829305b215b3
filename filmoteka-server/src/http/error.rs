//! API error types with IntoResponse
//!
//! Every failure leaves the service as `{"error": <kind>, "message": <text>}`
//! with the status code of its kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Presence check or id parse failed (400)
    Validation(ValidationError),

    /// Body is not valid JSON for the expected shape (400)
    MalformedBody { message: String },

    /// Body exceeds the request size limit (413)
    PayloadTooLarge { message: String },

    /// Content-Type header missing or unparseable (400)
    InvalidContentType { reason: String },

    /// Content-Type parsed but is not application/json (415)
    UnsupportedMediaType { found: String },

    /// No record with this identifier (404)
    NotFound { resource: &'static str, id: i64 },

    /// No route for this method and path (404)
    RouteNotFound { method: String, path: String },

    /// Store failure (500, logged)
    Database(DbError),

    /// Response encoding failed (500, logged)
    Serialization(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody { .. } | Self::InvalidContentType { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound { .. } | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::MalformedBody { message } => json!({
                "error": "malformed_body",
                "message": message
            }),
            Self::PayloadTooLarge { message } => json!({
                "error": "payload_too_large",
                "message": message
            }),
            Self::InvalidContentType { reason } => json!({
                "error": "invalid_content_type",
                "message": reason
            }),
            Self::UnsupportedMediaType { found } => json!({
                "error": "unsupported_media_type",
                "message": format!("expect application/json Content-Type, got '{}'", found)
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::RouteNotFound { method, path } => json!({
                "error": "route_not_found",
                "message": format!("no route for {} {}", method, path)
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "database error");
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
            Self::Serialization(e) => {
                tracing::error!(error = %e, "response serialization failed");
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::InvalidInput(reason) => Self::Validation(ValidationError::Rejected { reason }),
            _ => Self::Database(e),
        }
    }
}
