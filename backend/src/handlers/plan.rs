//! HTTP handlers for monthly sales, inventory and production plans

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::FactKind;

use crate::error::AppResult;
use crate::services::plan::{CreatePlanInput, PlanFilter, PlanRecord, PlanService, UpdatePlanInput};
use crate::AppState;

type Payload<T> = Result<Json<T>, JsonRejection>;

async fn list(state: AppState, kind: FactKind, filter: PlanFilter) -> AppResult<Json<Vec<PlanRecord>>> {
    let service = PlanService::new(state.db, kind);
    Ok(Json(service.list(filter).await?))
}

async fn get(state: AppState, kind: FactKind, id: i32) -> AppResult<Json<PlanRecord>> {
    let service = PlanService::new(state.db, kind);
    Ok(Json(service.get(id).await?))
}

async fn create(
    state: AppState,
    kind: FactKind,
    payload: Payload<CreatePlanInput>,
) -> AppResult<(StatusCode, Json<PlanRecord>)> {
    let Json(input) = payload?;
    let service = PlanService::new(state.db, kind);
    let plan = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update(
    state: AppState,
    kind: FactKind,
    id: i32,
    payload: Payload<UpdatePlanInput>,
) -> AppResult<Json<PlanRecord>> {
    let Json(input) = payload?;
    let service = PlanService::new(state.db, kind);
    Ok(Json(service.update(id, input).await?))
}

async fn delete(state: AppState, kind: FactKind, id: i32) -> AppResult<StatusCode> {
    let service = PlanService::new(state.db, kind);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Sales plans
// ============================================================================

pub async fn list_sales_plans(
    State(state): State<AppState>,
    Query(filter): Query<PlanFilter>,
) -> AppResult<Json<Vec<PlanRecord>>> {
    list(state, FactKind::SalesPlan, filter).await
}

pub async fn get_sales_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PlanRecord>> {
    get(state, FactKind::SalesPlan, id).await
}

pub async fn create_sales_plan(
    State(state): State<AppState>,
    payload: Payload<CreatePlanInput>,
) -> AppResult<(StatusCode, Json<PlanRecord>)> {
    create(state, FactKind::SalesPlan, payload).await
}

pub async fn update_sales_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Payload<UpdatePlanInput>,
) -> AppResult<Json<PlanRecord>> {
    update(state, FactKind::SalesPlan, id, payload).await
}

pub async fn delete_sales_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(state, FactKind::SalesPlan, id).await
}

// ============================================================================
// Inventory plans
// ============================================================================

pub async fn list_inventory_plans(
    State(state): State<AppState>,
    Query(filter): Query<PlanFilter>,
) -> AppResult<Json<Vec<PlanRecord>>> {
    list(state, FactKind::InventoryPlan, filter).await
}

pub async fn get_inventory_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PlanRecord>> {
    get(state, FactKind::InventoryPlan, id).await
}

pub async fn create_inventory_plan(
    State(state): State<AppState>,
    payload: Payload<CreatePlanInput>,
) -> AppResult<(StatusCode, Json<PlanRecord>)> {
    create(state, FactKind::InventoryPlan, payload).await
}

pub async fn update_inventory_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Payload<UpdatePlanInput>,
) -> AppResult<Json<PlanRecord>> {
    update(state, FactKind::InventoryPlan, id, payload).await
}

pub async fn delete_inventory_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(state, FactKind::InventoryPlan, id).await
}

// ============================================================================
// Production plans
// ============================================================================

pub async fn list_production_plans(
    State(state): State<AppState>,
    Query(filter): Query<PlanFilter>,
) -> AppResult<Json<Vec<PlanRecord>>> {
    list(state, FactKind::ProductionPlan, filter).await
}

pub async fn get_production_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PlanRecord>> {
    get(state, FactKind::ProductionPlan, id).await
}

pub async fn create_production_plan(
    State(state): State<AppState>,
    payload: Payload<CreatePlanInput>,
) -> AppResult<(StatusCode, Json<PlanRecord>)> {
    create(state, FactKind::ProductionPlan, payload).await
}

pub async fn update_production_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Payload<UpdatePlanInput>,
) -> AppResult<Json<PlanRecord>> {
    update(state, FactKind::ProductionPlan, id, payload).await
}

pub async fn delete_production_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(state, FactKind::ProductionPlan, id).await
}
