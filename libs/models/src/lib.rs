//! Domain model for the GoodToGo surplus-food marketplace.
//!
//! This crate defines the entities shared by the server: establishments
//! (vendor accounts), publications (surplus-food offers), the closed
//! category/status enumerations, and the geo helper used by discovery.

pub mod establishment;
pub mod geo;
pub mod publication;

pub use establishment::{Category, Establishment, EstablishmentDraft, EstablishmentUpdate};
pub use publication::{
    Publication, PublicationDraft, PublicationListing, PublicationStatus, PublicationUpdate,
    MAX_DESCRIPTION_LEN,
};
