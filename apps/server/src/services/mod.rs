//! Domain services: validation and lifecycle rules over the storage ports.

pub mod accounting;
pub mod discovery;
pub mod establishments;
pub mod publications;

pub use accounting::AccountingService;
pub use discovery::{DiscoveryService, SearchFilters};
pub use establishments::EstablishmentService;
pub use publications::PublicationService;
