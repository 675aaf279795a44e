//! HTTP handlers for the derived-plan calculations
//!
//! Each endpoint takes `{ subdivision_id, material_id, date }` and returns the
//! computed plan together with the inputs it was derived from.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared::{CalculationKind, CalculationRequest, CalculationResult};

use crate::error::AppResult;
use crate::AppState;

async fn run(
    state: AppState,
    kind: CalculationKind,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> AppResult<Json<CalculationResult>> {
    let Json(request) = payload?;

    tracing::info!(
        "{} calculation for subdivision {}, material {}, date {}",
        kind,
        request.subdivision_id,
        request.material_id,
        request.date
    );

    let result = state.calculator.calculate(kind, &request).await?;
    Ok(Json(result))
}

/// Inventory plan: sales * stock norm / days in month
pub async fn calculate_inventory(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> AppResult<Json<CalculationResult>> {
    run(state, CalculationKind::Inventory, payload).await
}

/// Production plan: current - previous inventory + inbound transfer
pub async fn calculate_production(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> AppResult<Json<CalculationResult>> {
    run(state, CalculationKind::Production, payload).await
}

/// Transfer plan: current - previous inventory + sales
pub async fn calculate_transfer(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> AppResult<Json<CalculationResult>> {
    run(state, CalculationKind::Transfer, payload).await
}

/// Raw material purchase plan: current - previous inventory + production
pub async fn calculate_raw_material(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> AppResult<Json<CalculationResult>> {
    run(state, CalculationKind::RawMaterial, payload).await
}
