//! Publication lifecycle handlers

use crate::{
    api::dto::{
        CreatePublicationRequest, PriceRangeQuery, PublicationResponse, StatusRequest,
        UpdatePublicationRequest,
    },
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use goodtogo_models::PublicationStatus;

/// Publish a new offer
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePublicationRequest>,
) -> Result<Response> {
    let publication = state.publications.add(&body.into_draft()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PublicationResponse::from(publication)),
    )
        .into_response())
}

pub async fn list(State(state): State<AppState>) -> Result<Response> {
    let publications = state.publications.list().await?;
    Ok(Json(to_responses(publications)).into_response())
}

/// Sweep expired offers, then list what is still available
pub async fn list_available(State(state): State<AppState>) -> Result<Response> {
    let publications = state.publications.get_available().await?;
    Ok(Json(to_responses(publications)).into_response())
}

pub async fn list_by_price_range(
    State(state): State<AppState>,
    Query(q): Query<PriceRangeQuery>,
) -> Result<Response> {
    let min = q.min.ok_or(Error::MissingParam("min"))?;
    let max = q.max.ok_or(Error::MissingParam("max"))?;
    let publications = state.publications.list_by_price_range(min, max).await?;
    Ok(Json(to_responses(publications)).into_response())
}

pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<PublicationStatus>,
) -> Result<Response> {
    let publications = state.publications.list_by_status(status).await?;
    Ok(Json(to_responses(publications)).into_response())
}

pub async fn list_by_establishment(
    State(state): State<AppState>,
    Path(establishment_id): Path<i64>,
) -> Result<Response> {
    let publications = state
        .publications
        .list_by_establishment(establishment_id)
        .await?;
    Ok(Json(to_responses(publications)).into_response())
}

pub async fn list_by_establishment_and_status(
    State(state): State<AppState>,
    Path((establishment_id, status)): Path<(i64, PublicationStatus)>,
) -> Result<Response> {
    let publications = state
        .publications
        .list_by_establishment_and_status(establishment_id, status)
        .await?;
    Ok(Json(to_responses(publications)).into_response())
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let publication = state.publications.get(id).await?;
    Ok(Json(PublicationResponse::from(publication)).into_response())
}

/// Generic update; marking a sale goes through the status endpoint
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePublicationRequest>,
) -> Result<Response> {
    let publication = state.publications.update(id, &body.into_update()).await?;
    Ok(Json(PublicationResponse::from(publication)).into_response())
}

/// The one path that may mark a publication sold
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusRequest>,
) -> Result<Response> {
    let publication = state.publications.update_status(id, body.status).await?;
    Ok(Json(PublicationResponse::from(publication)).into_response())
}

fn to_responses(publications: Vec<goodtogo_models::Publication>) -> Vec<PublicationResponse> {
    publications
        .into_iter()
        .map(PublicationResponse::from)
        .collect()
}
