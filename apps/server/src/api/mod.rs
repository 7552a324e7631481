//! HTTP boundary: router assembly and handlers.

pub mod dto;
pub mod handlers;

use axum::{
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/establishments", establishment_routes())
        .nest("/api/publications", publication_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn establishment_routes() -> Router<AppState> {
    use crate::api::handlers::establishments;

    Router::new()
        .route(
            "/",
            post(establishments::create).get(establishments::list),
        )
        .route("/active", get(establishments::list_active))
        .route("/search", get(establishments::search))
        .route(
            "/:id",
            get(establishments::get).put(establishments::update),
        )
        .route("/:id/deactivate", post(establishments::deactivate))
        .route(
            "/:id/classification",
            put(establishments::update_classification),
        )
        .route(
            "/:id/amount-received",
            post(establishments::add_amount_received),
        )
}

fn publication_routes() -> Router<AppState> {
    use crate::api::handlers::{discovery, publications};

    Router::new()
        .route("/", post(publications::create).get(publications::list))
        .route("/available", get(publications::list_available))
        .route("/search", get(discovery::search))
        .route("/price-range", get(publications::list_by_price_range))
        .route("/status/:status", get(publications::list_by_status))
        .route(
            "/establishment/:id",
            get(publications::list_by_establishment),
        )
        .route(
            "/establishment/:id/status/:status",
            get(publications::list_by_establishment_and_status),
        )
        .route("/:id", get(publications::get).put(publications::update))
        .route("/:id/status", put(publications::update_status))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
