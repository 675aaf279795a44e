//! Regulation HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::regulation::{
    CreateRegulationInput, RegulationRecord, RegulationService, UpdateRegulationInput,
};
use crate::AppState;

pub async fn list_regulations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RegulationRecord>>> {
    let service = RegulationService::new(state.db);
    let regulations = service.list().await?;
    Ok(Json(regulations))
}

pub async fn get_regulation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RegulationRecord>> {
    let service = RegulationService::new(state.db);
    let regulation = service.get(id).await?;
    Ok(Json(regulation))
}

pub async fn create_regulation(
    State(state): State<AppState>,
    payload: Result<Json<CreateRegulationInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegulationRecord>)> {
    let Json(input) = payload?;
    let service = RegulationService::new(state.db);
    let regulation = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(regulation)))
}

pub async fn update_regulation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateRegulationInput>, JsonRejection>,
) -> AppResult<Json<RegulationRecord>> {
    let Json(input) = payload?;
    let service = RegulationService::new(state.db);
    let regulation = service.update(id, input).await?;
    Ok(Json(regulation))
}

pub async fn delete_regulation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = RegulationService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
