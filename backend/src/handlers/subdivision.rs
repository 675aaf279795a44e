//! Subdivision HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::subdivision::{
    CreateSubdivisionInput, Subdivision, SubdivisionService, UpdateSubdivisionInput,
};
use crate::AppState;

/// List all subdivisions
pub async fn list_subdivisions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Subdivision>>> {
    let service = SubdivisionService::new(state.db);
    let subdivisions = service.list().await?;
    Ok(Json(subdivisions))
}

/// Get a subdivision
pub async fn get_subdivision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Subdivision>> {
    let service = SubdivisionService::new(state.db);
    let subdivision = service.get(id).await?;
    Ok(Json(subdivision))
}

/// Create a subdivision
pub async fn create_subdivision(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubdivisionInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Subdivision>)> {
    let Json(input) = payload?;
    let service = SubdivisionService::new(state.db);
    let subdivision = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(subdivision)))
}

/// Update a subdivision
pub async fn update_subdivision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateSubdivisionInput>, JsonRejection>,
) -> AppResult<Json<Subdivision>> {
    let Json(input) = payload?;
    let service = SubdivisionService::new(state.db);
    let subdivision = service.update(id, input).await?;
    Ok(Json(subdivision))
}

/// Delete a subdivision with no related records
pub async fn delete_subdivision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = SubdivisionService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
