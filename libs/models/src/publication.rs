//! Publication entity, status machine vocabulary, and input shapes.

use crate::establishment::Establishment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted publication description length.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Lifecycle state of a publication.
///
/// `Available` is the initial state; `Sold` and `Unavailable` are terminal.
/// `Available -> Unavailable` happens either through the lazy expiry sweep or
/// an explicit status set; `Available -> Sold` only through the dedicated
/// status path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Available,
    Sold,
    Unavailable,
}

impl PublicationStatus {
    /// Stable string form used for storage columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Available => "available",
            PublicationStatus::Sold => "sold",
            PublicationStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown publication status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for PublicationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PublicationStatus::Available),
            "sold" => Ok(PublicationStatus::Sold),
            "unavailable" => Ok(PublicationStatus::Unavailable),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A surplus-food offer published by an establishment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    /// Set by the server at creation time; immutable afterwards.
    pub post_date: DateTime<Utc>,
    /// Strictly after `post_date`.
    pub end_date: DateTime<Utc>,
    pub status: PublicationStatus,
}

/// Input shape for creating a publication. Status is not accepted: every
/// publication starts `Available`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicationDraft {
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    pub end_date: DateTime<Utc>,
}

/// Input shape for the generic publication update. Setting `Sold` through
/// this shape is rejected by the service; sales go through the dedicated
/// status path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicationUpdate {
    pub establishment_id: i64,
    pub description: String,
    pub price: f64,
    pub end_date: DateTime<Utc>,
    pub status: PublicationStatus,
}

/// Joined discovery view: a publication together with its owning
/// establishment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationListing {
    pub publication: Publication,
    pub establishment: Establishment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_forms_round_trip() {
        for status in [
            PublicationStatus::Available,
            PublicationStatus::Sold,
            PublicationStatus::Unavailable,
        ] {
            assert_eq!(status.as_str().parse::<PublicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&PublicationStatus::Unavailable).unwrap(),
            "\"unavailable\""
        );
        assert!(serde_json::from_str::<PublicationStatus>("\"Expired\"").is_err());
    }
}
