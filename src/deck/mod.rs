//! Decks: saved snapshots, derived composition and starter seeding.
//!
//! ## Key Types
//!
//! - `Deck`: immutable deck snapshot with persistent `Slots`
//! - `DeckComposition`: counts, histogram and category lists
//! - `starter_slots`: initial slots from a hero's required cards

pub mod composition;
pub mod model;
pub mod starter;

pub use composition::{
    build_composition, CardCategory, CardQuantity, CategoryMap, DeckComposition, FactionCount,
    COST_BUCKETS, MAX_COST_BUCKET, MIN_COST_BUCKET,
};
pub use model::{Deck, DeckMeta, Slots};
pub use starter::{required_card_options, starter_slots};
