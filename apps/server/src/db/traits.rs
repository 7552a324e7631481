//! Storage port definitions
//!
//! Each port models request-scoped CRUD primitives over a transactional
//! relational store. Uniqueness is the store's job: `insert` is an atomic
//! insert-if-absent and surfaces conflicts as [`crate::Error::NotUnique`]
//! rather than relying on read-then-write checks.

use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use goodtogo_models::{
    Establishment, EstablishmentDraft, EstablishmentUpdate, Publication, PublicationDraft,
    PublicationListing, PublicationStatus, PublicationUpdate,
};

/// Abstract interface over the establishments table.
#[async_trait]
pub trait EstablishmentStore: Send + Sync {
    /// Insert a new establishment with classification 0, active true, and no
    /// revenue. Fails with `NotUnique` when the email or coordinate pair is
    /// already taken.
    async fn insert(&self, draft: &EstablishmentDraft) -> Result<Establishment>;

    async fn get(&self, id: i64) -> Result<Option<Establishment>>;

    async fn list(&self) -> Result<Vec<Establishment>>;

    async fn list_active(&self) -> Result<Vec<Establishment>>;

    /// Case-sensitive substring match on the description.
    async fn find_by_description(&self, query: &str) -> Result<Vec<Establishment>>;

    /// True when a *different* establishment already uses this email.
    async fn email_taken_by_other(&self, id: i64, email: &str) -> Result<bool>;

    /// True when a *different* establishment already sits at these
    /// coordinates.
    async fn location_taken_by_other(&self, id: i64, latitude: f64, longitude: f64)
        -> Result<bool>;

    /// Overwrite the updatable fields. Returns `None` when the id does not
    /// resolve; the unique constraints remain the atomic backstop and
    /// surface as `NotUnique`.
    async fn update(&self, id: i64, update: &EstablishmentUpdate) -> Result<Option<Establishment>>;

    async fn set_active(&self, id: i64, active: bool) -> Result<Option<Establishment>>;

    async fn set_classification(&self, id: i64, value: f64) -> Result<Option<Establishment>>;

    /// Atomically accumulate revenue.
    async fn add_amount_received(&self, id: i64, amount: f64) -> Result<Option<Establishment>>;
}

/// Abstract interface over the publications table.
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Insert a new publication with the given immutable post date and
    /// status `Available`.
    async fn insert(&self, draft: &PublicationDraft, post_date: DateTime<Utc>)
        -> Result<Publication>;

    async fn get(&self, id: i64) -> Result<Option<Publication>>;

    async fn list(&self) -> Result<Vec<Publication>>;

    async fn list_by_establishment(&self, establishment_id: i64) -> Result<Vec<Publication>>;

    async fn list_by_status(&self, status: PublicationStatus) -> Result<Vec<Publication>>;

    async fn list_by_establishment_and_status(
        &self,
        establishment_id: i64,
        status: PublicationStatus,
    ) -> Result<Vec<Publication>>;

    /// Inclusive price range.
    async fn list_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Publication>>;

    /// Overwrite the updatable fields (post date stays immutable). Returns
    /// `None` when the id does not resolve.
    async fn update(&self, id: i64, update: &PublicationUpdate) -> Result<Option<Publication>>;

    async fn set_status(&self, id: i64, status: PublicationStatus)
        -> Result<Option<Publication>>;

    /// The lazy expiry sweep: flip every `Available` row whose end date has
    /// passed to `Unavailable`. Returns the number of rows flipped.
    async fn mark_expired(&self, now: DateTime<Utc>) -> Result<u64>;

    /// Joined discovery view: every publication with its owning
    /// establishment, in storage iteration order.
    async fn list_with_establishments(&self) -> Result<Vec<PublicationListing>>;
}
