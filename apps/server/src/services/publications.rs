//! Publication lifecycle
//!
//! Status machine: Available (initial) -> Sold | Unavailable, both terminal.
//! Available -> Unavailable happens automatically through the lazy expiry
//! sweep: every read that exposes availability flips expired rows first, so
//! an expired publication is never served as purchasable. Available -> Sold
//! goes only through `update_status`; the generic `update` rejects Sold.

use std::sync::Arc;

use chrono::Utc;
use goodtogo_models::{
    Publication, PublicationDraft, PublicationStatus, PublicationUpdate, MAX_DESCRIPTION_LEN,
};

use crate::{
    db::{EstablishmentStore, PublicationStore},
    Error, Result,
};

#[derive(Clone)]
pub struct PublicationService {
    store: Arc<dyn PublicationStore>,
    establishments: Arc<dyn EstablishmentStore>,
}

impl PublicationService {
    pub fn new(
        store: Arc<dyn PublicationStore>,
        establishments: Arc<dyn EstablishmentStore>,
    ) -> Self {
        Self {
            store,
            establishments,
        }
    }

    /// Publish a new offer. `post_date` is stamped here and never changes;
    /// the status always starts Available.
    pub async fn add(&self, draft: &PublicationDraft) -> Result<Publication> {
        validate_description(&draft.description)?;
        if draft.price <= 0.0 {
            return Err(Error::InvalidPrice(draft.price));
        }
        let now = Utc::now();
        if draft.end_date <= now {
            return Err(Error::InvalidEndDate);
        }
        if self.establishments.get(draft.establishment_id).await?.is_none() {
            return Err(Error::EstablishmentNotFound {
                id: draft.establishment_id,
            });
        }

        let publication = self.store.insert(draft, now).await?;
        tracing::info!(
            id = publication.id,
            establishment_id = publication.establishment_id,
            "publication created"
        );
        Ok(publication)
    }

    pub async fn get(&self, id: i64) -> Result<Publication> {
        if id <= 0 {
            return Err(Error::Validation(format!(
                "publication id must be positive (got {id})"
            )));
        }
        self.store
            .get(id)
            .await?
            .ok_or(Error::PublicationNotFound { id })
    }

    pub async fn list(&self) -> Result<Vec<Publication>> {
        let publications = self.store.list().await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    /// Sweep, then every row still Available.
    pub async fn get_available(&self) -> Result<Vec<Publication>> {
        self.sweep_expired().await?;
        let publications = self
            .store
            .list_by_status(PublicationStatus::Available)
            .await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    pub async fn list_by_establishment(&self, establishment_id: i64) -> Result<Vec<Publication>> {
        if establishment_id <= 0 {
            return Err(Error::Validation(format!(
                "establishment id must be positive (got {establishment_id})"
            )));
        }
        let publications = self.store.list_by_establishment(establishment_id).await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    pub async fn list_by_status(&self, status: PublicationStatus) -> Result<Vec<Publication>> {
        if status == PublicationStatus::Available {
            self.sweep_expired().await?;
        }
        let publications = self.store.list_by_status(status).await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    pub async fn list_by_establishment_and_status(
        &self,
        establishment_id: i64,
        status: PublicationStatus,
    ) -> Result<Vec<Publication>> {
        if establishment_id <= 0 {
            return Err(Error::Validation(format!(
                "establishment id must be positive (got {establishment_id})"
            )));
        }
        if status == PublicationStatus::Available {
            self.sweep_expired().await?;
        }
        let publications = self
            .store
            .list_by_establishment_and_status(establishment_id, status)
            .await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    /// Inclusive price range.
    pub async fn list_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Publication>> {
        if min < 0.0 || max < 0.0 {
            return Err(Error::Validation(
                "price bounds must not be negative".into(),
            ));
        }
        if min > max {
            return Err(Error::Validation(
                "minimum price must not exceed maximum price".into(),
            ));
        }
        let publications = self.store.list_by_price_range(min, max).await?;
        if publications.is_empty() {
            return Err(Error::NoPublicationsFound);
        }
        Ok(publications)
    }

    /// Overwrite the updatable fields. Rejects `Sold`: marking a sale goes
    /// through [`Self::update_status`] so it cannot ride along unnoticed on
    /// an unrelated edit.
    pub async fn update(&self, id: i64, update: &PublicationUpdate) -> Result<Publication> {
        validate_description(&update.description)?;
        if update.price <= 0.0 {
            return Err(Error::InvalidPrice(update.price));
        }
        if update.end_date <= Utc::now() {
            return Err(Error::InvalidEndDate);
        }
        if update.status == PublicationStatus::Sold {
            return Err(Error::Validation(
                "sold status must be set through the status endpoint".into(),
            ));
        }

        self.store
            .update(id, update)
            .await?
            .ok_or(Error::PublicationNotFound { id })
    }

    /// The one path that may mark a publication Sold.
    pub async fn update_status(
        &self,
        id: i64,
        status: PublicationStatus,
    ) -> Result<Publication> {
        let publication = self
            .store
            .set_status(id, status)
            .await?
            .ok_or(Error::PublicationNotFound { id })?;
        tracing::info!(id, status = %status, "publication status updated");
        Ok(publication)
    }

    async fn sweep_expired(&self) -> Result<()> {
        let flipped = self.store.mark_expired(Utc::now()).await?;
        if flipped > 0 {
            tracing::debug!(flipped, "expired publications marked unavailable");
        }
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.is_empty() {
        return Err(Error::MissingParam("description"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::Validation(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}
