//! Transfer plan HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::transfer::{
    CreateTransferPlanInput, TransferPlanRecord, TransferPlanService, UpdateTransferPlanInput,
};
use crate::AppState;

pub async fn list_transfer_plans(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransferPlanRecord>>> {
    let service = TransferPlanService::new(state.db);
    let transfers = service.list().await?;
    Ok(Json(transfers))
}

pub async fn get_transfer_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TransferPlanRecord>> {
    let service = TransferPlanService::new(state.db);
    let transfer = service.get(id).await?;
    Ok(Json(transfer))
}

pub async fn create_transfer_plan(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransferPlanInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TransferPlanRecord>)> {
    let Json(input) = payload?;
    let service = TransferPlanService::new(state.db);
    let transfer = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

pub async fn update_transfer_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateTransferPlanInput>, JsonRejection>,
) -> AppResult<Json<TransferPlanRecord>> {
    let Json(input) = payload?;
    let service = TransferPlanService::new(state.db);
    let transfer = service.update(id, input).await?;
    Ok(Json(transfer))
}

pub async fn delete_transfer_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = TransferPlanService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
