//! # champions-deck
//!
//! Deckbuilding rules and deck analysis for a cooperative hero card game.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Rules**: Heroes declare their construction rules as
//!    ordered option records. The engine interprets them generically and
//!    never hardcodes a hero.
//!
//! 2. **Pure Functions**: Validation and composition read immutable cards
//!    and deck snapshots. The same inputs always give equal outputs.
//!
//! 3. **Persistent Snapshots**: Deck slots use `im` persistent maps, so an
//!    edit yields a new deck while the previous one stays valid.
//!
//! ## Modules
//!
//! - `core`: Codes, configuration, errors
//! - `cards`: Card definitions, catalog and JSON loader
//! - `rules`: Rule options, problems and the deck validator
//! - `deck`: Deck snapshots, composition and starter seeding

pub mod core;
pub mod cards;
pub mod rules;
pub mod deck;

// Re-export commonly used types
pub use crate::core::{
    CardCode, FactionCode, TypeCode, SubtypeCode, ResourceType,
    DeckSizeLimits, FilterDefaults,
    CatalogError, DeckError,
};

pub use crate::cards::{Card, CardCatalog, CardStats, DeckRequirement, ResourceIcons};

pub use crate::rules::{
    validate_deck, DeckRules, DeckValidator, Eligibility, OptionTally,
    Problem, ProblemReason, RuleOption,
};

pub use crate::deck::{
    build_composition, required_card_options, starter_slots,
    CardCategory, Deck, DeckComposition, DeckMeta, Slots,
};
