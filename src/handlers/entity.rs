//! The five CRUD handlers, written once and routed per entity as
//! `get(entity::list::<Customer>)` and so on.
//!
//! Writes validate the body against the entity's schema before touching the
//! database; a body that fails validation never reaches storage.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::{ApiResponse, ApiResult, Message};
use crate::database::Entity;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /<collection>
pub async fn list<E: Entity>(State(state): State<AppState>) -> ApiResult<Vec<E>> {
    let rows = state.repository::<E>().list().await?;
    Ok(ApiResponse::success(rows))
}

/// GET /<collection>/:id
pub async fn show<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<E> {
    let Path(id) = id?;
    let row = state.repository::<E>().get(id).await?;
    Ok(ApiResponse::success(row))
}

/// POST /<collection>
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let entity = load::<E>(payload)?;
    state.repository::<E>().create(&entity).await?;

    info!("Created {} {} in {}", E::LABEL, entity.id(), E::TABLE);
    Ok(ApiResponse::created(Message::added(E::LABEL)))
}

/// PUT /<collection>/:id - replaces every field, the id included
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let Path(id) = id?;
    let entity = load::<E>(payload)?;
    state.repository::<E>().update(id, &entity).await?;

    if entity.id() == id {
        info!("Updated {} {} in {}", E::LABEL, id, E::TABLE);
    } else {
        info!("Updated {} {} in {} (now {})", E::LABEL, id, E::TABLE, entity.id());
    }
    Ok(ApiResponse::success(Message::updated(E::LABEL)))
}

/// DELETE /<collection>/:id
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Message> {
    let Path(id) = id?;
    state.repository::<E>().delete(id).await?;

    info!("Deleted {} {} from {}", E::LABEL, id, E::TABLE);
    Ok(ApiResponse::success(Message::removed(E::LABEL)))
}

fn load<E: Entity>(payload: Result<Json<Value>, JsonRejection>) -> Result<E, ApiError> {
    let Json(body) = payload?;
    let input: E::Input = E::schema().deserialize(&body)?;
    Ok(E::from_input(input)?)
}
