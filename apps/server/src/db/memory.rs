//! In-memory store implementations
//!
//! Enforce the same uniqueness and foreign-key semantics as the Postgres
//! stores so the services behave identically over either (useful for tests).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    db::traits::{EstablishmentStore, PublicationStore},
    Error, Result,
};
use goodtogo_models::{
    Establishment, EstablishmentDraft, EstablishmentUpdate, Publication, PublicationDraft,
    PublicationListing, PublicationStatus, PublicationUpdate,
};

#[derive(Default)]
struct EstablishmentTable {
    rows: Vec<Establishment>,
    next_id: i64,
}

/// In-memory EstablishmentStore implementation
#[derive(Default)]
pub struct MemEstablishmentStore {
    table: RwLock<EstablishmentTable>,
}

impl MemEstablishmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstablishmentStore for MemEstablishmentStore {
    async fn insert(&self, draft: &EstablishmentDraft) -> Result<Establishment> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|e| e.email == draft.email) {
            return Err(Error::NotUnique("email"));
        }
        if table
            .rows
            .iter()
            .any(|e| e.latitude == draft.latitude && e.longitude == draft.longitude)
        {
            return Err(Error::NotUnique("location"));
        }

        table.next_id += 1;
        let establishment = Establishment {
            id: table.next_id,
            username: draft.username.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            description: draft.description.clone(),
            categories: draft.categories.clone(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            classification: 0.0,
            active: true,
            total_amount_received: 0.0,
        };
        table.rows.push(establishment.clone());
        Ok(establishment)
    }

    async fn get(&self, id: i64) -> Result<Option<Establishment>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Establishment>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn list_active(&self) -> Result<Vec<Establishment>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|e| e.active).cloned().collect())
    }

    async fn find_by_description(&self, query: &str) -> Result<Vec<Establishment>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|e| e.description.contains(query))
            .cloned()
            .collect())
    }

    async fn email_taken_by_other(&self, id: i64, email: &str) -> Result<bool> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|e| e.email == email && e.id != id))
    }

    async fn location_taken_by_other(
        &self,
        id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .any(|e| e.latitude == latitude && e.longitude == longitude && e.id != id))
    }

    async fn update(&self, id: i64, update: &EstablishmentUpdate) -> Result<Option<Establishment>> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|e| e.email == update.email && e.id != id) {
            return Err(Error::NotUnique("email"));
        }
        if table.rows.iter().any(|e| {
            e.latitude == update.latitude && e.longitude == update.longitude && e.id != id
        }) {
            return Err(Error::NotUnique("location"));
        }

        let Some(row) = table.rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.username = update.username.clone();
        row.email = update.email.clone();
        row.password = update.password.clone();
        row.description = update.description.clone();
        row.categories = update.categories.clone();
        row.latitude = update.latitude;
        row.longitude = update.longitude;
        row.active = update.active;
        Ok(Some(row.clone()))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Option<Establishment>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.active = active;
        Ok(Some(row.clone()))
    }

    async fn set_classification(&self, id: i64, value: f64) -> Result<Option<Establishment>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.classification = value;
        Ok(Some(row.clone()))
    }

    async fn add_amount_received(&self, id: i64, amount: f64) -> Result<Option<Establishment>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.total_amount_received += amount;
        Ok(Some(row.clone()))
    }
}

#[derive(Default)]
struct PublicationTable {
    rows: Vec<Publication>,
    next_id: i64,
}

/// In-memory PublicationStore implementation
///
/// Holds a handle to the establishment store for foreign-key checks and the
/// joined discovery view.
pub struct MemPublicationStore {
    table: RwLock<PublicationTable>,
    establishments: Arc<MemEstablishmentStore>,
}

impl MemPublicationStore {
    pub fn new(establishments: Arc<MemEstablishmentStore>) -> Self {
        Self {
            table: RwLock::new(PublicationTable::default()),
            establishments,
        }
    }

    async fn check_establishment_exists(&self, id: i64) -> Result<()> {
        if self.establishments.get(id).await?.is_none() {
            return Err(Error::EstablishmentNotFound { id });
        }
        Ok(())
    }
}

#[async_trait]
impl PublicationStore for MemPublicationStore {
    async fn insert(
        &self,
        draft: &PublicationDraft,
        post_date: DateTime<Utc>,
    ) -> Result<Publication> {
        self.check_establishment_exists(draft.establishment_id)
            .await?;

        let mut table = self.table.write().await;
        table.next_id += 1;
        let publication = Publication {
            id: table.next_id,
            establishment_id: draft.establishment_id,
            description: draft.description.clone(),
            price: draft.price,
            post_date,
            end_date: draft.end_date,
            status: PublicationStatus::Available,
        };
        table.rows.push(publication.clone());
        Ok(publication)
    }

    async fn get(&self, id: i64) -> Result<Option<Publication>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Publication>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn list_by_establishment(&self, establishment_id: i64) -> Result<Vec<Publication>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|p| p.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    async fn list_by_status(&self, status: PublicationStatus) -> Result<Vec<Publication>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect())
    }

    async fn list_by_establishment_and_status(
        &self,
        establishment_id: i64,
        status: PublicationStatus,
    ) -> Result<Vec<Publication>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|p| p.establishment_id == establishment_id && p.status == status)
            .cloned()
            .collect())
    }

    async fn list_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Publication>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, update: &PublicationUpdate) -> Result<Option<Publication>> {
        self.check_establishment_exists(update.establishment_id)
            .await?;

        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.establishment_id = update.establishment_id;
        row.description = update.description.clone();
        row.price = update.price;
        row.end_date = update.end_date;
        row.status = update.status;
        Ok(Some(row.clone()))
    }

    async fn set_status(
        &self,
        id: i64,
        status: PublicationStatus,
    ) -> Result<Option<Publication>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.status = status;
        Ok(Some(row.clone()))
    }

    async fn mark_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut table = self.table.write().await;
        let mut flipped = 0;
        for row in table
            .rows
            .iter_mut()
            .filter(|p| p.status == PublicationStatus::Available && p.end_date < now)
        {
            row.status = PublicationStatus::Unavailable;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn list_with_establishments(&self) -> Result<Vec<PublicationListing>> {
        let publications = self.table.read().await.rows.clone();
        let mut listings = Vec::with_capacity(publications.len());
        for publication in publications {
            let establishment = self
                .establishments
                .get(publication.establishment_id)
                .await?
                .ok_or(Error::EstablishmentNotFound {
                    id: publication.establishment_id,
                })?;
            listings.push(PublicationListing {
                publication,
                establishment,
            });
        }
        Ok(listings)
    }
}
