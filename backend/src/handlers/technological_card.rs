//! Technological card HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::technological_card::{
    CreateTechnologicalCardInput, TechnologicalCard, TechnologicalCardService,
    UpdateTechnologicalCardInput,
};
use crate::AppState;

pub async fn list_technological_cards(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TechnologicalCard>>> {
    let service = TechnologicalCardService::new(state.db);
    let cards = service.list().await?;
    Ok(Json(cards))
}

pub async fn get_technological_card(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TechnologicalCard>> {
    let service = TechnologicalCardService::new(state.db);
    let card = service.get(id).await?;
    Ok(Json(card))
}

pub async fn create_technological_card(
    State(state): State<AppState>,
    payload: Result<Json<CreateTechnologicalCardInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TechnologicalCard>)> {
    let Json(input) = payload?;
    let service = TechnologicalCardService::new(state.db);
    let card = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_technological_card(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateTechnologicalCardInput>, JsonRejection>,
) -> AppResult<Json<TechnologicalCard>> {
    let Json(input) = payload?;
    let service = TechnologicalCardService::new(state.db);
    let card = service.update(id, input).await?;
    Ok(Json(card))
}

pub async fn delete_technological_card(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let service = TechnologicalCardService::new(state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
