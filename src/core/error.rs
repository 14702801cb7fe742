//! Error types for catalog ingestion and deck lookups.
//!
//! Deck problems are not errors: validation returns them as values. These
//! types cover malformed source data and caller mistakes only.

use thiserror::Error;

use super::codes::CardCode;

/// Failure while building a card catalog from raw records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("card {code}: invalid {field} '{value}'")]
    InvalidField {
        code: CardCode,
        field: &'static str,
        value: String,
    },
}

/// Failure resolving a deck against a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("hero {0} is not in the catalog")]
    UnknownHero(CardCode),
}
