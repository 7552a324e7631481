//! Shared test harness: the full service stack wired over in-memory stores,
//! plus a router driver for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use goodtogo::{
    api::create_router,
    config::Config,
    db::{MemEstablishmentStore, MemPublicationStore},
    state::AppState,
};
use goodtogo_models::{Category, EstablishmentDraft, PublicationDraft};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub establishment_store: Arc<MemEstablishmentStore>,
    pub publication_store: Arc<MemPublicationStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let establishment_store = Arc::new(MemEstablishmentStore::new());
        let publication_store =
            Arc::new(MemPublicationStore::new(establishment_store.clone()));
        let state = AppState::from_stores(
            Arc::new(Config::default()),
            establishment_store.clone(),
            publication_store.clone(),
        );
        let router = create_router(state.clone());
        Self {
            state,
            establishment_store,
            publication_store,
            router,
        }
    }

    /// Drive one request through the router and decode the JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            // Extractor rejections (e.g. axum's Json) produce plain-text
            // bodies; surface those as a JSON string instead of erroring.
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        Ok((status, value))
    }
}

pub fn bakery_draft(email: &str, latitude: f64, longitude: f64) -> EstablishmentDraft {
    EstablishmentDraft {
        username: "Padaria Central".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        description: "Fresh bread daily".to_string(),
        categories: vec![Category::Bakery],
        latitude,
        longitude,
    }
}

pub fn restaurant_draft(email: &str, latitude: f64, longitude: f64) -> EstablishmentDraft {
    EstablishmentDraft {
        username: "Tasca do Rio".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        description: "Family restaurant by the river".to_string(),
        categories: vec![Category::Restaurant],
        latitude,
        longitude,
    }
}

pub fn offer_draft(establishment_id: i64, description: &str, price: f64) -> PublicationDraft {
    PublicationDraft {
        establishment_id,
        description: description.to_string(),
        price,
        end_date: in_hours(6),
    }
}

pub fn in_hours(hours: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(hours)
}
