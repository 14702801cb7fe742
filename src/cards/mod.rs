//! Card system: definitions, attributes, catalog and ingestion.
//!
//! ## Key Types
//!
//! - `Card`: immutable printed-card data
//! - `CardStats` / `ResourceIcons`: numeric attributes
//! - `DeckRequirement`: cards a hero's deck must contain
//! - `CardCatalog`: code lookup, built directly or from JSON records

pub mod attributes;
pub mod definition;
pub mod loader;
pub mod registry;

pub use attributes::{normalize_traits, CardStats, ResourceIcons};
pub use definition::{Card, DeckRequirement};
pub use loader::{parse_uses, RawCard};
pub use registry::CardCatalog;
