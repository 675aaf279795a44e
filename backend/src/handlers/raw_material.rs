//! HTTP handlers for raw material purchases and write-offs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::raw_material::{
    CreateRawMaterialInput, Movement, RawMaterialFilter, RawMaterialRecord, RawMaterialService,
    UpdateRawMaterialInput,
};
use crate::AppState;

type Payload<T> = Result<Json<T>, JsonRejection>;

async fn list(
    state: AppState,
    movement: Movement,
    filter: RawMaterialFilter,
) -> AppResult<Json<Vec<RawMaterialRecord>>> {
    let service = RawMaterialService::new(state.db, movement);
    Ok(Json(service.list(filter).await?))
}

async fn get(state: AppState, movement: Movement, id: i32) -> AppResult<Json<RawMaterialRecord>> {
    let service = RawMaterialService::new(state.db, movement);
    Ok(Json(service.get(id).await?))
}

async fn create(
    state: AppState,
    movement: Movement,
    payload: Payload<CreateRawMaterialInput>,
) -> AppResult<(StatusCode, Json<RawMaterialRecord>)> {
    let Json(input) = payload?;
    let service = RawMaterialService::new(state.db, movement);
    let record = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update(
    state: AppState,
    movement: Movement,
    id: i32,
    payload: Payload<UpdateRawMaterialInput>,
) -> AppResult<Json<RawMaterialRecord>> {
    let Json(input) = payload?;
    let service = RawMaterialService::new(state.db, movement);
    Ok(Json(service.update(id, input).await?))
}

async fn delete(state: AppState, movement: Movement, id: i32) -> AppResult<StatusCode> {
    let service = RawMaterialService::new(state.db, movement);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Purchases

pub async fn list_purchases(
    State(state): State<AppState>,
    Query(filter): Query<RawMaterialFilter>,
) -> AppResult<Json<Vec<RawMaterialRecord>>> {
    list(state, Movement::Purchase, filter).await
}

pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RawMaterialRecord>> {
    get(state, Movement::Purchase, id).await
}

pub async fn create_purchase(
    State(state): State<AppState>,
    payload: Payload<CreateRawMaterialInput>,
) -> AppResult<(StatusCode, Json<RawMaterialRecord>)> {
    create(state, Movement::Purchase, payload).await
}

pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Payload<UpdateRawMaterialInput>,
) -> AppResult<Json<RawMaterialRecord>> {
    update(state, Movement::Purchase, id, payload).await
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(state, Movement::Purchase, id).await
}

// Write-offs

pub async fn list_write_offs(
    State(state): State<AppState>,
    Query(filter): Query<RawMaterialFilter>,
) -> AppResult<Json<Vec<RawMaterialRecord>>> {
    list(state, Movement::WriteOff, filter).await
}

pub async fn get_write_off(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RawMaterialRecord>> {
    get(state, Movement::WriteOff, id).await
}

pub async fn create_write_off(
    State(state): State<AppState>,
    payload: Payload<CreateRawMaterialInput>,
) -> AppResult<(StatusCode, Json<RawMaterialRecord>)> {
    create(state, Movement::WriteOff, payload).await
}

pub async fn update_write_off(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Payload<UpdateRawMaterialInput>,
) -> AppResult<Json<RawMaterialRecord>> {
    update(state, Movement::WriteOff, id, payload).await
}

pub async fn delete_write_off(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(state, Movement::WriteOff, id).await
}
