//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Check that `Content-Type` is present and is `application/json`.
///
/// Parameters such as `charset` are allowed. A missing or unparseable
/// header is a 400; any other media type is a 415.
pub fn require_json_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let raw = headers
        .get(CONTENT_TYPE)
        .ok_or_else(|| ApiError::InvalidContentType {
            reason: "missing Content-Type header".into(),
        })?
        .to_str()
        .map_err(|_| ApiError::InvalidContentType {
            reason: "Content-Type header is not valid text".into(),
        })?;

    let media: mime::Mime = raw.parse().map_err(|e: mime::FromStrError| {
        ApiError::InvalidContentType {
            reason: format!("malformed Content-Type '{}': {}", raw, e),
        }
    })?;

    if media.type_() == mime::APPLICATION
        && media.subtype() == mime::JSON
        && media.suffix().is_none()
    {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType {
            found: media.essence_str().to_owned(),
        })
    }
}

/// JSON body extractor that checks the content type before reading the body
/// and reports every decode failure (including unknown fields, when the
/// target type denies them) as [`ApiError::MalformedBody`]. A body over the
/// size limit stays a 413.
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        require_json_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                let message = e.body_text();
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::PayloadTooLarge { message }
                } else {
                    ApiError::MalformedBody { message }
                }
            })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedBody {
            message: e.to_string(),
        })?;

        Ok(Self(value))
    }
}
