//! Storage layer: ports (traits) and their implementations.
//!
//! The services only ever see the traits; production wires in the Postgres
//! stores, tests the in-memory ones.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::{MemEstablishmentStore, MemPublicationStore};
pub use postgres::{PgEstablishmentStore, PgPublicationStore};
pub use traits::{EstablishmentStore, PublicationStore};
