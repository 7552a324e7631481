//! PostgreSQL-backed store implementations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    db::traits::{EstablishmentStore, PublicationStore},
    Error, Result,
};
use goodtogo_models::{
    Category, Establishment, EstablishmentDraft, EstablishmentUpdate, Publication,
    PublicationDraft, PublicationListing, PublicationStatus, PublicationUpdate,
};

const ESTABLISHMENT_COLUMNS: &str = "id, username, email, password, description, categories, \
     latitude, longitude, classification, active, total_amount_received";

const PUBLICATION_COLUMNS: &str =
    "id, establishment_id, description, price, post_date, end_date, status";

/// PostgreSQL-backed EstablishmentStore implementation
#[derive(Clone)]
pub struct PgEstablishmentStore {
    pool: PgPool,
}

impl PgEstablishmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// PostgreSQL-backed PublicationStore implementation
#[derive(Clone)]
pub struct PgPublicationStore {
    pool: PgPool,
}

impl PgPublicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn categories_to_text(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.as_str().to_string()).collect()
}

fn establishment_from_row(row: &PgRow) -> Result<Establishment> {
    let raw_categories: Vec<String> = row.get("categories");
    let categories = raw_categories
        .iter()
        .map(|s| s.parse::<Category>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Internal(format!("corrupt category column: {e}")))?;

    Ok(Establishment {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password: row.get("password"),
        description: row.get("description"),
        categories,
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        classification: row.get("classification"),
        active: row.get("active"),
        total_amount_received: row.get("total_amount_received"),
    })
}

fn publication_from_row(row: &PgRow) -> Result<Publication> {
    let raw_status: String = row.get("status");
    let status = raw_status
        .parse::<PublicationStatus>()
        .map_err(|e| Error::Internal(format!("corrupt status column: {e}")))?;

    Ok(Publication {
        id: row.get("id"),
        establishment_id: row.get("establishment_id"),
        description: row.get("description"),
        price: row.get("price"),
        post_date: row.get("post_date"),
        end_date: row.get("end_date"),
        status,
    })
}

/// Translate unique/foreign-key violations into domain errors. Anything else
/// stays a storage fault.
fn map_constraint_violation(e: sqlx::Error, establishment_id: Option<i64>) -> Error {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some("establishments_email_key") => return Error::NotUnique("email"),
            Some("establishments_location_key") => return Error::NotUnique("location"),
            Some("publications_establishment_id_fkey") => {
                return Error::EstablishmentNotFound {
                    id: establishment_id.unwrap_or_default(),
                }
            }
            _ => {}
        }
    }
    Error::Database(e)
}

#[async_trait]
impl EstablishmentStore for PgEstablishmentStore {
    async fn insert(&self, draft: &EstablishmentDraft) -> Result<Establishment> {
        // Single statement: the unique indexes close the concurrent-creator
        // race, no pre-read needed.
        let row = sqlx::query(&format!(
            "INSERT INTO establishments
                 (username, email, password, description, categories, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ESTABLISHMENT_COLUMNS}"
        ))
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(&draft.password)
        .bind(&draft.description)
        .bind(categories_to_text(&draft.categories))
        .bind(draft.latitude)
        .bind(draft.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, None))?;

        establishment_from_row(&row)
    }

    async fn get(&self, id: i64) -> Result<Option<Establishment>> {
        let row = sqlx::query(&format!(
            "SELECT {ESTABLISHMENT_COLUMNS} FROM establishments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(establishment_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Establishment>> {
        let rows = sqlx::query(&format!(
            "SELECT {ESTABLISHMENT_COLUMNS} FROM establishments ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(establishment_from_row).collect()
    }

    async fn list_active(&self) -> Result<Vec<Establishment>> {
        let rows = sqlx::query(&format!(
            "SELECT {ESTABLISHMENT_COLUMNS} FROM establishments WHERE active = TRUE ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(establishment_from_row).collect()
    }

    async fn find_by_description(&self, query: &str) -> Result<Vec<Establishment>> {
        // strpos keeps the match case-sensitive, unlike ILIKE.
        let rows = sqlx::query(&format!(
            "SELECT {ESTABLISHMENT_COLUMNS} FROM establishments
             WHERE strpos(description, $1) > 0
             ORDER BY id"
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(establishment_from_row).collect()
    }

    async fn email_taken_by_other(&self, id: i64, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM establishments WHERE email = $1 AND id <> $2")
            .bind(email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.is_some())
    }

    async fn location_taken_by_other(
        &self,
        id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM establishments
             WHERE latitude = $1 AND longitude = $2 AND id <> $3",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.is_some())
    }

    async fn update(&self, id: i64, update: &EstablishmentUpdate) -> Result<Option<Establishment>> {
        let row = sqlx::query(&format!(
            "UPDATE establishments
             SET username = $2, email = $3, password = $4, description = $5,
                 categories = $6, latitude = $7, longitude = $8, active = $9
             WHERE id = $1
             RETURNING {ESTABLISHMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.password)
        .bind(&update.description)
        .bind(categories_to_text(&update.categories))
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, None))?;

        row.as_ref().map(establishment_from_row).transpose()
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Option<Establishment>> {
        let row = sqlx::query(&format!(
            "UPDATE establishments SET active = $2 WHERE id = $1
             RETURNING {ESTABLISHMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(establishment_from_row).transpose()
    }

    async fn set_classification(&self, id: i64, value: f64) -> Result<Option<Establishment>> {
        let row = sqlx::query(&format!(
            "UPDATE establishments SET classification = $2 WHERE id = $1
             RETURNING {ESTABLISHMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(establishment_from_row).transpose()
    }

    async fn add_amount_received(&self, id: i64, amount: f64) -> Result<Option<Establishment>> {
        // Atomic accumulate; no read-modify-write in the application.
        let row = sqlx::query(&format!(
            "UPDATE establishments
             SET total_amount_received = total_amount_received + $2
             WHERE id = $1
             RETURNING {ESTABLISHMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(establishment_from_row).transpose()
    }
}

#[async_trait]
impl PublicationStore for PgPublicationStore {
    async fn insert(
        &self,
        draft: &PublicationDraft,
        post_date: DateTime<Utc>,
    ) -> Result<Publication> {
        let row = sqlx::query(&format!(
            "INSERT INTO publications
                 (establishment_id, description, price, post_date, end_date, status)
             VALUES ($1, $2, $3, $4, $5, 'available')
             RETURNING {PUBLICATION_COLUMNS}"
        ))
        .bind(draft.establishment_id)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(post_date)
        .bind(draft.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, Some(draft.establishment_id)))?;

        publication_from_row(&row)
    }

    async fn get(&self, id: i64) -> Result<Option<Publication>> {
        let row = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(publication_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Publication>> {
        let rows = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(publication_from_row).collect()
    }

    async fn list_by_establishment(&self, establishment_id: i64) -> Result<Vec<Publication>> {
        let rows = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications
             WHERE establishment_id = $1 ORDER BY id"
        ))
        .bind(establishment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(publication_from_row).collect()
    }

    async fn list_by_status(&self, status: PublicationStatus) -> Result<Vec<Publication>> {
        let rows = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications WHERE status = $1 ORDER BY id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(publication_from_row).collect()
    }

    async fn list_by_establishment_and_status(
        &self,
        establishment_id: i64,
        status: PublicationStatus,
    ) -> Result<Vec<Publication>> {
        let rows = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications
             WHERE establishment_id = $1 AND status = $2
             ORDER BY id"
        ))
        .bind(establishment_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(publication_from_row).collect()
    }

    async fn list_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Publication>> {
        let rows = sqlx::query(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications
             WHERE price >= $1 AND price <= $2
             ORDER BY id"
        ))
        .bind(min)
        .bind(max)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(publication_from_row).collect()
    }

    async fn update(&self, id: i64, update: &PublicationUpdate) -> Result<Option<Publication>> {
        let row = sqlx::query(&format!(
            "UPDATE publications
             SET establishment_id = $2, description = $3, price = $4,
                 end_date = $5, status = $6
             WHERE id = $1
             RETURNING {PUBLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(update.establishment_id)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.end_date)
        .bind(update.status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, Some(update.establishment_id)))?;

        row.as_ref().map(publication_from_row).transpose()
    }

    async fn set_status(
        &self,
        id: i64,
        status: PublicationStatus,
    ) -> Result<Option<Publication>> {
        let row = sqlx::query(&format!(
            "UPDATE publications SET status = $2 WHERE id = $1
             RETURNING {PUBLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(publication_from_row).transpose()
    }

    async fn mark_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let flipped = sqlx::query(
            "UPDATE publications
             SET status = 'unavailable'
             WHERE status = 'available' AND end_date < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?
        .rows_affected();

        Ok(flipped)
    }

    async fn list_with_establishments(&self) -> Result<Vec<PublicationListing>> {
        let rows = sqlx::query(
            "SELECT p.id, p.establishment_id, p.description, p.price, p.post_date,
                    p.end_date, p.status,
                    e.id AS e_id, e.username AS e_username, e.email AS e_email,
                    e.password AS e_password, e.description AS e_description,
                    e.categories AS e_categories, e.latitude AS e_latitude,
                    e.longitude AS e_longitude, e.classification AS e_classification,
                    e.active AS e_active,
                    e.total_amount_received AS e_total_amount_received
             FROM publications p
             JOIN establishments e ON e.id = p.establishment_id
             ORDER BY p.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter()
            .map(|row| {
                let publication = publication_from_row(row)?;

                let raw_categories: Vec<String> = row.get("e_categories");
                let categories = raw_categories
                    .iter()
                    .map(|s| s.parse::<Category>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| Error::Internal(format!("corrupt category column: {e}")))?;

                let establishment = Establishment {
                    id: row.get("e_id"),
                    username: row.get("e_username"),
                    email: row.get("e_email"),
                    password: row.get("e_password"),
                    description: row.get("e_description"),
                    categories,
                    latitude: row.get("e_latitude"),
                    longitude: row.get("e_longitude"),
                    classification: row.get("e_classification"),
                    active: row.get("e_active"),
                    total_amount_received: row.get("e_total_amount_received"),
                };

                Ok(PublicationListing {
                    publication,
                    establishment,
                })
            })
            .collect()
    }
}
