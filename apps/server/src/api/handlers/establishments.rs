//! Establishment registry handlers

use crate::{
    api::dto::{
        CreateEstablishmentRequest, DescriptionQuery, EstablishmentResponse,
        UpdateEstablishmentRequest, ValueRequest,
    },
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Register a new establishment
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateEstablishmentRequest>,
) -> Result<Response> {
    let establishment = state.establishments.add(&body.into_draft()).await?;
    Ok((
        StatusCode::CREATED,
        Json(EstablishmentResponse::from(establishment)),
    )
        .into_response())
}

/// List every establishment, active or not
pub async fn list(State(state): State<AppState>) -> Result<Response> {
    let establishments = state.establishments.list().await?;
    Ok(Json(to_responses(establishments)).into_response())
}

/// List only establishments that have not been deactivated
pub async fn list_active(State(state): State<AppState>) -> Result<Response> {
    let establishments = state.establishments.list_active().await?;
    Ok(Json(to_responses(establishments)).into_response())
}

/// Substring lookup over descriptions
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<DescriptionQuery>,
) -> Result<Response> {
    let establishments = state.establishments.get_by_description(&q.description).await?;
    Ok(Json(to_responses(establishments)).into_response())
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let establishment = state.establishments.get(id).await?;
    Ok(Json(EstablishmentResponse::from(establishment)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateEstablishmentRequest>,
) -> Result<Response> {
    let establishment = state.establishments.update(id, &body.into_update()).await?;
    Ok(Json(EstablishmentResponse::from(establishment)).into_response())
}

/// One-way soft delete
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let establishment = state.establishments.deactivate(id).await?;
    Ok(Json(EstablishmentResponse::from(establishment)).into_response())
}

pub async fn update_classification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ValueRequest>,
) -> Result<Response> {
    let establishment = state
        .establishments
        .update_classification(id, body.value)
        .await?;
    Ok(Json(EstablishmentResponse::from(establishment)).into_response())
}

/// Accumulate revenue onto the establishment's running total
pub async fn add_amount_received(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ValueRequest>,
) -> Result<Response> {
    let establishment = state.accounting.add_amount_received(id, body.value).await?;
    Ok(Json(EstablishmentResponse::from(establishment)).into_response())
}

fn to_responses(
    establishments: Vec<goodtogo_models::Establishment>,
) -> Vec<EstablishmentResponse> {
    establishments
        .into_iter()
        .map(EstablishmentResponse::from)
        .collect()
}
