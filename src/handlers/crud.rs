//! Entity CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, JsonBody};
use crate::response::{no_content, success_created, success_ok, Envelope};
use crate::service::CrudService;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), AppError>;

pub async fn list<S: CrudService>(State(service): State<Arc<S>>) -> Reply<Vec<S::Entity>> {
    let rows = service.get_all().await.map_err(Into::<AppError>::into)?;
    Ok(success_ok(rows))
}

pub async fn read<S: CrudService>(
    State(service): State<Arc<S>>,
    EntityId(id): EntityId,
) -> Reply<S::Entity> {
    let row = service.get(id).await.map_err(Into::<AppError>::into)?;
    Ok(success_ok(row))
}

pub async fn create<S: CrudService>(
    State(service): State<Arc<S>>,
    JsonBody(request): JsonBody<S::Create>,
) -> Reply<S::Entity> {
    let row = service.create(request).await.map_err(Into::<AppError>::into)?;
    Ok(success_created(row))
}

/// Partial update: attributes missing from the body keep their stored value.
pub async fn update<S: CrudService>(
    State(service): State<Arc<S>>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<S::Update>,
) -> Reply<S::Entity> {
    let row = service.update(id, request).await.map_err(Into::<AppError>::into)?;
    Ok(success_ok(row))
}

pub async fn delete<S: CrudService>(
    State(service): State<Arc<S>>,
    EntityId(id): EntityId,
) -> Result<StatusCode, AppError> {
    service.delete(id).await.map_err(Into::<AppError>::into)?;
    Ok(no_content())
}
