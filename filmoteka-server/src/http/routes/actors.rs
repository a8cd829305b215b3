//! Actor endpoints
//!
//! - POST   /actors/      create, returns `{"id"}`
//! - GET    /actors/      list
//! - GET    /actors/{id}  get one
//! - PUT    /actors/{id}  overwrite, returns `{"id"}`
//! - DELETE /actors/{id}  remove, empty body

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::json_ok;
use crate::http::error::ApiError;
use crate::http::extractors::StrictJson;
use crate::http::server::AppState;
use crate::models::{ActorRequest, CreatedId, IdToken};

pub(crate) async fn create(state: &AppState, req: Request) -> Result<Response, ApiError> {
    let StrictJson(actor) = StrictJson::<ActorRequest>::from_request(req, state).await?;
    actor.validate()?;

    let id = state.actors.create(&actor).await?;
    tracing::info!(actor_id = id, "actor created");

    json_ok(&CreatedId { id })
}

pub(crate) async fn list(state: &AppState) -> Result<Response, ApiError> {
    let actors = state.actors.list().await?;
    json_ok(&actors)
}

pub(crate) async fn get(state: &AppState, token: &IdToken) -> Result<Response, ApiError> {
    let id = token.parse()?;
    let actor = state.actors.get(id).await?;
    json_ok(&actor)
}

/// Responds with the caller's id; the row is not read back.
pub(crate) async fn update(
    state: &AppState,
    token: &IdToken,
    req: Request,
) -> Result<Response, ApiError> {
    let id = token.parse()?;
    let StrictJson(actor) = StrictJson::<ActorRequest>::from_request(req, state).await?;
    actor.validate()?;

    state.actors.update(id, &actor).await?;
    tracing::info!(actor_id = id, "actor updated");

    json_ok(&CreatedId { id })
}

pub(crate) async fn delete(state: &AppState, token: &IdToken) -> Result<Response, ApiError> {
    let id = token.parse()?;
    state.actors.delete(id).await?;
    tracing::info!(actor_id = id, "actor deleted");

    Ok(StatusCode::OK.into_response())
}
