//! Route handlers organized by resource
//!
//! [`dispatch`] is installed as the router's fallback: it resolves the
//! request against the route table and calls exactly one handler.

pub mod health;
pub mod actors;
pub mod films;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::router::Route;
use crate::http::server::AppState;

/// Resolve and run the handler for one request.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let Some(route) = Route::resolve(req.method(), req.uri().path()) else {
        tracing::debug!(method = %req.method(), path = %req.uri().path(), "no route matched");
        return ApiError::RouteNotFound {
            method: req.method().to_string(),
            path: req.uri().path().to_owned(),
        }
        .into_response();
    };

    tracing::info!(?route, path = %req.uri().path(), "handling request");

    let result = match route {
        Route::CreateActor => actors::create(&state, req).await,
        Route::ListActors => actors::list(&state).await,
        Route::GetActor(id) => actors::get(&state, &id).await,
        Route::UpdateActor(id) => actors::update(&state, &id, req).await,
        Route::DeleteActor(id) => actors::delete(&state, &id).await,
        Route::CreateFilm => films::create(&state, req).await,
        Route::ListFilms => films::list(&state).await,
        Route::GetFilm(id) => films::get(&state, &id).await,
        Route::DeleteFilm(id) => films::delete(&state, &id).await,
        Route::Health => health::health(),
    };

    result.unwrap_or_else(|err| {
        tracing::debug!(status = %err.status(), "request failed");
        err.into_response()
    })
}

/// Serialize `value` once and send it as a 200 `application/json` response.
pub(crate) fn json_ok<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Serialization)?;
    Ok((
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
