//! Error taxonomy and its HTTP mapping.
//!
//! Services raise typed errors and never swallow them; translating kinds
//! into caller-visible responses is the boundary's sole responsibility:
//! not-found -> 404, validation -> 400, conflicts -> 409, storage -> 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing store failed or is unavailable. Internal fault, not
    /// user-correctable.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller-supplied data is out of contract.
    #[error("{0}")]
    Validation(String),

    /// A required parameter was missing or empty.
    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("price must be greater than zero (got {0})")]
    InvalidPrice(f64),

    #[error("end date must be in the future")]
    InvalidEndDate,

    /// Unique-constraint conflict on create (email or coordinates).
    #[error("establishment {0} already exists")]
    NotUnique(&'static str),

    #[error("establishment must have at least one category")]
    NoCategories,

    #[error("establishment {id} not found")]
    EstablishmentNotFound { id: i64 },

    #[error("publication {id} not found")]
    PublicationNotFound { id: i64 },

    /// Idempotency guard: deactivating twice is an error.
    #[error("establishment {id} is already deactivated")]
    AlreadyDeactivated { id: i64 },

    #[error("no establishments found")]
    NoEstablishmentsFound,

    #[error("no publications found")]
    NoPublicationsFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable kind for error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Database(_) => "storage",
            Error::Validation(_) => "validation",
            Error::MissingParam(_) => "missing-param",
            Error::InvalidPrice(_) => "invalid-price",
            Error::InvalidEndDate => "invalid-end-date",
            Error::NotUnique(_) => "not-unique",
            Error::NoCategories => "no-categories",
            Error::EstablishmentNotFound { .. } => "establishment-not-found",
            Error::PublicationNotFound { .. } => "publication-not-found",
            Error::AlreadyDeactivated { .. } => "already-deactivated",
            Error::NoEstablishmentsFound => "no-establishments-found",
            Error::NoPublicationsFound => "no-publications-found",
            Error::Internal(_) => "internal",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Validation(_)
            | Error::MissingParam(_)
            | Error::InvalidPrice(_)
            | Error::InvalidEndDate
            | Error::NoCategories => StatusCode::BAD_REQUEST,
            Error::NotUnique(_) | Error::AlreadyDeactivated { .. } => StatusCode::CONFLICT,
            Error::EstablishmentNotFound { .. }
            | Error::PublicationNotFound { .. }
            | Error::NoEstablishmentsFound
            | Error::NoPublicationsFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        // Internal detail stays in the logs; the body carries a generic
        // message for 5xx.
        let message = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_kinds_map_to_409() {
        assert_eq!(Error::NotUnique("email").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::AlreadyDeactivated { id: 1 }.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn not_found_kinds_map_to_404() {
        assert_eq!(
            Error::PublicationNotFound { id: 7 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::NoPublicationsFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_kinds_map_to_400() {
        assert_eq!(
            Error::InvalidPrice(-1.0).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NoCategories.status_code(), StatusCode::BAD_REQUEST);
    }
}
