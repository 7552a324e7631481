//! Request and response shapes for the HTTP boundary.
//!
//! Wire naming is camelCase. Responses never echo the password; creation
//! requests carry no classification or revenue fields, so those start at
//! zero no matter what the caller sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use goodtogo_models::{
    Category, Establishment, EstablishmentDraft, EstablishmentUpdate, Publication,
    PublicationDraft, PublicationListing, PublicationStatus, PublicationUpdate,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstablishmentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CreateEstablishmentRequest {
    pub fn into_draft(self) -> EstablishmentDraft {
        EstablishmentDraft {
            username: self.username,
            email: self.email,
            password: self.password,
            description: self.description,
            categories: self.categories,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEstablishmentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UpdateEstablishmentRequest {
    pub fn into_update(self) -> EstablishmentUpdate {
        EstablishmentUpdate {
            username: self.username,
            email: self.email,
            password: self.password,
            description: self.description,
            categories: self.categories,
            latitude: self.latitude,
            longitude: self.longitude,
            active: self.active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
    pub classification: f64,
    pub active: bool,
    pub total_amount_received: f64,
}

impl From<Establishment> for EstablishmentResponse {
    fn from(e: Establishment) -> Self {
        Self {
            id: e.id,
            username: e.username,
            email: e.email,
            description: e.description,
            categories: e.categories,
            latitude: e.latitude,
            longitude: e.longitude,
            classification: e.classification,
            active: e.active,
            total_amount_received: e.total_amount_received,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicationRequest {
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    pub end_date: DateTime<Utc>,
}

impl CreatePublicationRequest {
    pub fn into_draft(self) -> PublicationDraft {
        PublicationDraft {
            establishment_id: self.establishment_id,
            description: self.description,
            price: self.price,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublicationRequest {
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    pub end_date: DateTime<Utc>,
    pub status: PublicationStatus,
}

impl UpdatePublicationRequest {
    pub fn into_update(self) -> PublicationUpdate {
        PublicationUpdate {
            establishment_id: self.establishment_id,
            description: self.description,
            price: self.price,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationResponse {
    pub id: i64,
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    pub post_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: PublicationStatus,
}

impl From<Publication> for PublicationResponse {
    fn from(p: Publication) -> Self {
        Self {
            id: p.id,
            establishment_id: p.establishment_id,
            description: p.description,
            price: p.price,
            post_date: p.post_date,
            end_date: p.end_date,
            status: p.status,
        }
    }
}

/// A search hit: the publication together with its establishment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub publication: PublicationResponse,
    pub establishment: EstablishmentResponse,
}

impl From<PublicationListing> for ListingResponse {
    fn from(listing: PublicationListing) -> Self {
        Self {
            publication: listing.publication.into(),
            establishment: listing.establishment.into(),
        }
    }
}

/// A single numeric payload, used by the classification and amount-received
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct ValueRequest {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: PublicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeQuery {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub category: Option<Category>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance: Option<f64>,
    pub food_type: Option<String>,
    pub max_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_ignores_missing_description() {
        let req: CreateEstablishmentRequest = serde_json::from_value(json!({
            "username": "padaria",
            "email": "p@example.com",
            "password": "secret",
            "categories": ["bakery"],
            "latitude": 38.7,
            "longitude": -9.1
        }))
        .unwrap();
        assert_eq!(req.description, "");
        assert_eq!(req.categories, vec![Category::Bakery]);
    }

    #[test]
    fn establishment_response_has_no_password_field() {
        let establishment = Establishment {
            id: 1,
            username: "padaria".into(),
            email: "p@example.com".into(),
            password: "secret".into(),
            description: String::new(),
            categories: vec![Category::Bakery],
            latitude: 38.7,
            longitude: -9.1,
            classification: 0.0,
            active: true,
            total_amount_received: 0.0,
        };
        let body = serde_json::to_value(EstablishmentResponse::from(establishment)).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["totalAmountReceived"], 0.0);
    }

    #[test]
    fn search_query_accepts_camel_case_params() {
        let query: SearchQuery = serde_json::from_value(json!({
            "category": "bakery",
            "maxDistance": 1.0,
            "foodType": "bread",
            "maxPrice": 5.0
        }))
        .unwrap();
        assert_eq!(query.category, Some(Category::Bakery));
        assert_eq!(query.max_distance, Some(1.0));
        assert_eq!(query.food_type.as_deref(), Some("bread"));
        assert_eq!(query.max_price, Some(5.0));
        assert!(query.latitude.is_none());
    }
}
