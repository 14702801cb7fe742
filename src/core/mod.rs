//! Core vocabulary: codes, configuration, errors.
//!
//! Everything else in the crate is built from the closed sets defined here.

pub mod codes;
pub mod config;
pub mod error;

pub use codes::{
    CardCode, FactionCode, ResourceType, SubtypeCode, TypeCode, UnknownCode,
    ASPECT_FACTIONS, PLAYER_FACTIONS, RESOURCES,
};
pub use config::{DeckSizeLimits, FilterDefaults, IntRange};
pub use error::{CatalogError, DeckError};
