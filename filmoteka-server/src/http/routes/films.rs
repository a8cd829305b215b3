//! Film endpoints (create, list, get, delete)

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::json_ok;
use crate::http::error::ApiError;
use crate::http::extractors::StrictJson;
use crate::http::server::AppState;
use crate::models::{CreatedId, FilmRequest, IdToken};

pub(crate) async fn create(state: &AppState, req: Request) -> Result<Response, ApiError> {
    let StrictJson(film) = StrictJson::<FilmRequest>::from_request(req, state).await?;
    film.validate()?;

    let id = state.films.create(&film).await?;
    tracing::info!(film_id = id, "film created");

    json_ok(&CreatedId { id })
}

pub(crate) async fn list(state: &AppState) -> Result<Response, ApiError> {
    let films = state.films.list().await?;
    json_ok(&films)
}

pub(crate) async fn get(state: &AppState, token: &IdToken) -> Result<Response, ApiError> {
    let id = token.parse()?;
    let film = state.films.get(id).await?;
    json_ok(&film)
}

pub(crate) async fn delete(state: &AppState, token: &IdToken) -> Result<Response, ApiError> {
    let id = token.parse()?;
    state.films.delete(id).await?;
    tracing::info!(film_id = id, "film deleted");

    Ok(StatusCode::OK.into_response())
}
