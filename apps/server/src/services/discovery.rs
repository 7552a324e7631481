//! Discovery engine
//!
//! Filtered search over the joined publication + establishment view. Every
//! filter is optional and the applied ones must all hold. Unlike the store
//! reads, an empty result here is an empty list, not an error: "nothing
//! matched your filters" is a normal answer to a search.

use std::sync::Arc;

use chrono::Utc;
use goodtogo_models::{geo, Category, PublicationListing};

use crate::{db::PublicationStore, Result};

/// Independently optional search criteria, combined as a conjunction.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub category: Option<Category>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub food_type: Option<String>,
    pub max_price: Option<f64>,
}

#[derive(Clone)]
pub struct DiscoveryService {
    store: Arc<dyn PublicationStore>,
}

impl DiscoveryService {
    pub fn new(store: Arc<dyn PublicationStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<PublicationListing>> {
        // Discovery exposes availability, so it sweeps like any other read.
        self.store.mark_expired(Utc::now()).await?;

        let listings = self.store.list_with_establishments().await?;
        Ok(listings
            .into_iter()
            .filter(|listing| matches(filters, listing))
            .collect())
    }
}

fn matches(filters: &SearchFilters, listing: &PublicationListing) -> bool {
    if let Some(category) = filters.category {
        if !listing.establishment.categories.contains(&category) {
            return false;
        }
    }

    // The geo filter needs all three parameters; a partial set is ignored.
    if let (Some(lat), Some(lon), Some(max_km)) =
        (filters.latitude, filters.longitude, filters.max_distance_km)
    {
        let distance = geo::distance_km(
            lat,
            lon,
            listing.establishment.latitude,
            listing.establishment.longitude,
        );
        if distance > max_km {
            return false;
        }
    }

    if let Some(food_type) = &filters.food_type {
        if !listing.publication.description.contains(food_type.as_str()) {
            return false;
        }
    }

    // Strict ceiling: an offer at exactly the ceiling is excluded.
    if let Some(max_price) = filters.max_price {
        if listing.publication.price >= max_price {
            return false;
        }
    }

    true
}
