//! Supply source HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::supply_source::{
    CreateSupplySourceInput, SupplySource, SupplySourceService, UpdateSupplySourceInput,
};
use crate::AppState;

pub async fn list_supply_sources(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SupplySource>>> {
    let service = SupplySourceService::new(state.db);
    let sources = service.list().await?;
    Ok(Json(sources))
}

pub async fn get_supply_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SupplySource>> {
    let service = SupplySourceService::new(state.db);
    let source = service.get(id).await?;
    Ok(Json(source))
}

pub async fn create_supply_source(
    State(state): State<AppState>,
    payload: Result<Json<CreateSupplySourceInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SupplySource>)> {
    let Json(input) = payload?;
    let service = SupplySourceService::new(state.db);
    let source = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

pub async fn update_supply_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateSupplySourceInput>, JsonRejection>,
) -> AppResult<Json<SupplySource>> {
    let Json(input) = payload?;
    let service = SupplySourceService::new(state.db);
    let source = service.update(id, input).await?;
    Ok(Json(source))
}

pub async fn delete_supply_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = SupplySourceService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
