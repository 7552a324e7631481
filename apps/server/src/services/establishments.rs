//! Establishment registry
//!
//! Owns the account invariants: non-empty credentials, at least one category,
//! classification forced to zero on create, and the one-way deactivation
//! guard. Uniqueness of email and coordinates is enforced by the store's
//! atomic insert; the pre-checks on update only exist to give callers the
//! friendlier 400-class message before the constraint fires.

use std::sync::Arc;

use goodtogo_models::{Establishment, EstablishmentDraft, EstablishmentUpdate};

use crate::{db::EstablishmentStore, Error, Result};

#[derive(Clone)]
pub struct EstablishmentService {
    store: Arc<dyn EstablishmentStore>,
}

impl EstablishmentService {
    pub fn new(store: Arc<dyn EstablishmentStore>) -> Self {
        Self { store }
    }

    /// Register a new establishment. The stored record always starts with
    /// classification 0, active true, and no accumulated revenue, whatever
    /// the caller sent.
    pub async fn add(&self, draft: &EstablishmentDraft) -> Result<Establishment> {
        if draft.categories.is_empty() {
            return Err(Error::NoCategories);
        }
        validate_credentials(&draft.username, &draft.email, &draft.password)?;

        let establishment = self.store.insert(draft).await?;
        tracing::info!(id = establishment.id, email = %establishment.email, "establishment registered");
        Ok(establishment)
    }

    pub async fn get(&self, id: i64) -> Result<Establishment> {
        self.store
            .get(id)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })
    }

    pub async fn list(&self) -> Result<Vec<Establishment>> {
        let establishments = self.store.list().await?;
        if establishments.is_empty() {
            return Err(Error::NoEstablishmentsFound);
        }
        Ok(establishments)
    }

    pub async fn list_active(&self) -> Result<Vec<Establishment>> {
        let establishments = self.store.list_active().await?;
        if establishments.is_empty() {
            return Err(Error::NoEstablishmentsFound);
        }
        Ok(establishments)
    }

    /// Case-sensitive substring lookup over descriptions.
    pub async fn get_by_description(&self, query: &str) -> Result<Vec<Establishment>> {
        if query.is_empty() {
            return Err(Error::MissingParam("description"));
        }
        let establishments = self.store.find_by_description(query).await?;
        if establishments.is_empty() {
            return Err(Error::NoEstablishmentsFound);
        }
        Ok(establishments)
    }

    /// Overwrite the updatable fields. Classification and accumulated
    /// revenue have dedicated paths and are never touched here.
    pub async fn update(&self, id: i64, update: &EstablishmentUpdate) -> Result<Establishment> {
        if update.categories.is_empty() {
            return Err(Error::NoCategories);
        }
        validate_credentials(&update.username, &update.email, &update.password)?;

        if self.store.email_taken_by_other(id, &update.email).await? {
            return Err(Error::Validation("email already in use".into()));
        }
        if self
            .store
            .location_taken_by_other(id, update.latitude, update.longitude)
            .await?
        {
            return Err(Error::Validation("location already in use".into()));
        }

        self.store
            .update(id, update)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })
    }

    /// One-way soft delete. Deactivating an already-inactive establishment
    /// is a conflict, not a no-op.
    pub async fn deactivate(&self, id: i64) -> Result<Establishment> {
        let establishment = self
            .store
            .get(id)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })?;
        if !establishment.active {
            return Err(Error::AlreadyDeactivated { id });
        }

        let establishment = self
            .store
            .set_active(id, false)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })?;
        tracing::info!(id, "establishment deactivated");
        Ok(establishment)
    }

    pub async fn update_classification(&self, id: i64, value: f64) -> Result<Establishment> {
        if !(0.0..=5.0).contains(&value) {
            return Err(Error::Validation(format!(
                "classification must be between 0 and 5 (got {value})"
            )));
        }
        self.store
            .set_classification(id, value)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })
    }
}

fn validate_credentials(username: &str, email: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::MissingParam("username"));
    }
    if email.is_empty() {
        return Err(Error::MissingParam("email"));
    }
    if password.is_empty() {
        return Err(Error::MissingParam("password"));
    }
    Ok(())
}
