//! Card catalog for code lookup.
//!
//! The `CardCatalog` stores every known card and provides fast lookup by
//! code. The catalog is read-only once built, so it can be shared freely
//! between concurrent evaluations.

use rustc_hash::FxHashMap;

use super::definition::Card;
use crate::core::{CardCode, TypeCode};

/// Catalog of card definitions keyed by code.
///
/// ## Example
///
/// ```
/// use champions_deck::cards::{Card, CardCatalog};
/// use champions_deck::core::TypeCode;
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(Card::new("01050", "Haymaker", TypeCode::Event));
///
/// let found = catalog.get("01050").unwrap();
/// assert_eq!(found.name, "Haymaker");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardCode, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card, returning the card it replaced if the code was taken.
    pub fn insert(&mut self, card: Card) -> Option<Card> {
        let replaced = self.cards.insert(card.code.clone(), card);
        if let Some(old) = &replaced {
            tracing::warn!(code = %old.code, "replacing duplicate card code in catalog");
        }
        replaced
    }

    /// Get a card by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Card> {
        self.cards.get(code)
    }

    /// Check if a code is known.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.cards.contains_key(code)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Every selectable hero.
    pub fn heroes(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(|c| c.type_code == TypeCode::Hero)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl FromIterator<Card> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.insert(card);
        }
        catalog
    }
}
