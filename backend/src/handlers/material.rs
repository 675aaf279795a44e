//! Material HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::material::{
    CreateMaterialInput, Material, MaterialService, UpdateMaterialInput,
};
use crate::AppState;

pub async fn list_materials(State(state): State<AppState>) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list().await?;
    Ok(Json(materials))
}

pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.get(id).await?;
    Ok(Json(material))
}

pub async fn create_material(
    State(state): State<AppState>,
    payload: Result<Json<CreateMaterialInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Material>)> {
    let Json(input) = payload?;
    let service = MaterialService::new(state.db);
    let material = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateMaterialInput>, JsonRejection>,
) -> AppResult<Json<Material>> {
    let Json(input) = payload?;
    let service = MaterialService::new(state.db);
    let material = service.update(id, input).await?;
    Ok(Json(material))
}

/// Delete a material that no plan, card or movement refers to
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = MaterialService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
