//! Discovery search handler

use crate::{
    api::dto::{ListingResponse, SearchQuery},
    services::SearchFilters,
    state::AppState,
    Result,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

/// Filtered search over available offers. An empty result is a 200 with an
/// empty array, not an error.
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Response> {
    let filters = SearchFilters {
        category: q.category,
        latitude: q.latitude,
        longitude: q.longitude,
        max_distance_km: q.max_distance,
        food_type: q.food_type,
        max_price: q.max_price,
    };
    let listings = state.discovery.search(&filters).await?;
    let listings: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(Json(listings).into_response())
}
