//! Establishment entity and its input shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business type of an establishment. Closed set: values outside it are
/// unrepresentable past the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bakery,
    PastryShop,
    Restaurant,
}

impl Category {
    /// Stable string form used for storage columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bakery => "bakery",
            Category::PastryShop => "pastry-shop",
            Category::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bakery" => Ok(Category::Bakery),
            "pastry-shop" => Ok(Category::PastryShop),
            "restaurant" => Ok(Category::Restaurant),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// A vendor account that publishes surplus-food offers.
///
/// Invariants (enforced by the registry service and the storage schema):
/// email is globally unique, the (latitude, longitude) pair is globally
/// unique, the category set is non-empty, and classification stays in [0, 5].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Establishment {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Opaque credential; never echoed over the wire.
    pub password: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
    /// Rating in [0, 5]. Forced to 0 on creation.
    pub classification: f64,
    /// Deactivation only hides the establishment; it never cascades to
    /// publications.
    pub active: bool,
    pub total_amount_received: f64,
}

/// Input shape for creating an establishment.
///
/// Classification and revenue are intentionally absent: creation forces both
/// to zero regardless of what the caller asked for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstablishmentDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Input shape for the generic establishment update.
///
/// Classification has a dedicated path and is deliberately not part of this
/// shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstablishmentUpdate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub latitude: f64,
    pub longitude: f64,
    pub active: bool,
}
