//! Deck snapshots.
//!
//! A `Deck` is an immutable value. Edits go through `with_*` methods that
//! return a new snapshot; `Slots` is a persistent map, so the previous
//! snapshot stays valid and the copy shares most of its structure.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::composition::{build_composition, DeckComposition};
use crate::cards::{Card, CardCatalog};
use crate::core::{CardCode, DeckError, FactionCode};
use crate::rules::{validate_deck, Problem, ProblemReason};

/// Card code to quantity. Codes with no copies are not stored.
pub type Slots = OrdMap<CardCode, u32>;

/// Choices a deck makes on top of its hero's rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<FactionCode>,
}

impl DeckMeta {
    #[must_use]
    pub fn with_aspect(aspect: FactionCode) -> Self {
        Self {
            aspect: Some(aspect),
        }
    }
}

/// A saved deck.
///
/// ## Example
///
/// ```
/// use champions_deck::core::FactionCode;
/// use champions_deck::deck::Deck;
///
/// let deck = Deck::new(1, "Test", "01001a").with_aspect(FactionCode::Justice);
/// let edited = deck.with_quantity("01050", 2);
///
/// assert_eq!(deck.quantity("01050"), 0);
/// assert_eq!(edited.quantity("01050"), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    #[serde(rename = "investigator_code")]
    pub hero_code: CardCode,
    #[serde(default)]
    pub meta: DeckMeta,
    #[serde(default)]
    pub slots: Slots,
    /// Copies that do not count towards deck size.
    #[serde(rename = "ignoreDeckLimitSlots", default)]
    pub ignore_deck_limit_slots: Slots,
    /// Last validation result as stored with the deck.
    #[serde(default)]
    pub problem: Option<ProblemReason>,
}

impl Deck {
    /// Create an empty deck for a hero.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, hero_code: impl Into<CardCode>) -> Self {
        Self {
            id,
            name: name.into(),
            hero_code: hero_code.into(),
            meta: DeckMeta::default(),
            slots: Slots::new(),
            ignore_deck_limit_slots: Slots::new(),
            problem: None,
        }
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: FactionCode) -> Self {
        self.meta.aspect = Some(aspect);
        self
    }

    #[must_use]
    pub fn with_slots(mut self, slots: Slots) -> Self {
        self.slots = slots;
        self
    }

    /// New snapshot with a card's quantity set. Zero removes the card.
    #[must_use]
    pub fn with_quantity(&self, code: impl Into<CardCode>, quantity: u32) -> Self {
        let mut next = self.clone();
        next.slots = set_quantity(&self.slots, code.into(), quantity);
        next
    }

    /// New snapshot with a card's ignored quantity set. Zero removes it.
    #[must_use]
    pub fn with_ignored(&self, code: impl Into<CardCode>, quantity: u32) -> Self {
        let mut next = self.clone();
        next.ignore_deck_limit_slots = set_quantity(&self.ignore_deck_limit_slots, code.into(), quantity);
        next
    }

    /// Copies of a card in the deck.
    #[must_use]
    pub fn quantity(&self, code: &str) -> u32 {
        self.slots.get(code).copied().unwrap_or(0)
    }

    /// Copies of a card that do not count towards deck size.
    #[must_use]
    pub fn ignored(&self, code: &str) -> u32 {
        self.ignore_deck_limit_slots.get(code).copied().unwrap_or(0)
    }

    /// Sum of all slot quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.slots.values().fold(0, |total, &q| total.saturating_add(q))
    }

    /// Copies of a card that count towards deck limits and size.
    #[must_use]
    pub fn counted(&self, code: &str) -> u32 {
        self.quantity(code).saturating_sub(self.ignored(code))
    }

    /// One entry per counted copy, in code order. Ignored copies are left
    /// out and codes missing from the catalog are dropped.
    #[must_use]
    pub fn resolve_cards<'c>(&self, catalog: &'c CardCatalog) -> Vec<&'c Card> {
        let counted = self
            .slots
            .keys()
            .fold(0u32, |total, code| total.saturating_add(self.counted(code.as_str())));
        let mut cards = Vec::with_capacity(counted as usize);
        for code in self.slots.keys() {
            match catalog.get(code.as_str()) {
                Some(card) => {
                    let copies = self.counted(code.as_str()) as usize;
                    cards.extend(std::iter::repeat(card).take(copies));
                }
                None => tracing::trace!(deck = self.id, code = %code, "dropping unknown card code"),
            }
        }
        cards
    }

    /// Composition of the deck's own slots.
    #[must_use]
    pub fn composition(&self, catalog: &CardCatalog) -> DeckComposition {
        build_composition(self, &self.slots, &self.ignore_deck_limit_slots, catalog)
    }

    /// Validate against the hero's rules.
    pub fn problem(&self, catalog: &CardCatalog) -> Result<Option<Problem>, DeckError> {
        let hero = catalog
            .get(self.hero_code.as_str())
            .ok_or_else(|| DeckError::UnknownHero(self.hero_code.clone()))?;
        let cards = self.resolve_cards(catalog);
        Ok(validate_deck(hero, &self.meta, &cards))
    }

    /// Snapshot with the stored `problem` refreshed.
    pub fn revalidated(&self, catalog: &CardCatalog) -> Result<Self, DeckError> {
        let problem = self.problem(catalog)?;
        let mut next = self.clone();
        next.problem = problem.map(|p| p.reason);
        Ok(next)
    }
}

fn set_quantity(slots: &Slots, code: CardCode, quantity: u32) -> Slots {
    if quantity == 0 {
        slots.without(&code)
    } else {
        slots.update(code, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeCode;

    fn catalog() -> CardCatalog {
        [
            Card::new("01001a", "Hero", TypeCode::Hero).with_faction(FactionCode::Hero),
            Card::new("b1", "Basic", TypeCode::Event)
                .with_faction(FactionCode::Basic)
                .with_deck_limit(3),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_edits_are_snapshots() {
        let deck = Deck::new(7, "Test", "01001a");
        let one = deck.with_quantity("b1", 2);
        let two = one.with_quantity("b1", 0);

        assert_eq!(deck.quantity("b1"), 0);
        assert_eq!(one.quantity("b1"), 2);
        assert_eq!(two.quantity("b1"), 0);
        assert!(two.slots.is_empty());
    }

    #[test]
    fn test_ignored_quantities() {
        let deck = Deck::new(1, "Test", "01001a").with_quantity("b1", 3).with_ignored("b1", 1);
        assert_eq!(deck.ignored("b1"), 1);
        assert_eq!(deck.with_ignored("b1", 0).ignored("b1"), 0);
    }

    #[test]
    fn test_resolve_cards_expands_and_drops_unknown() {
        let deck = Deck::new(1, "Test", "01001a")
            .with_quantity("b1", 2)
            .with_quantity("gone", 1);
        let catalog = catalog();
        let cards = deck.resolve_cards(&catalog);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.code.as_str() == "b1"));
    }

    #[test]
    fn test_resolve_cards_skips_ignored_copies() {
        let deck = Deck::new(1, "Test", "01001a")
            .with_quantity("b1", 5)
            .with_ignored("b1", 2);
        assert_eq!(deck.counted("b1"), 3);
        assert_eq!(deck.resolve_cards(&catalog()).len(), 3);

        // more ignored than held resolves to nothing
        let over = deck.with_ignored("b1", 9);
        assert_eq!(over.counted("b1"), 0);
        assert!(over.resolve_cards(&catalog()).is_empty());
    }

    #[test]
    fn test_total_quantity_saturates() {
        let deck = Deck::new(1, "Test", "01001a")
            .with_quantity("b1", u32::MAX)
            .with_quantity("b2", 4);
        assert_eq!(deck.total_quantity(), u32::MAX);
    }

    #[test]
    fn test_problem_requires_known_hero() {
        let deck = Deck::new(1, "Test", "99999a");
        assert_eq!(
            deck.problem(&catalog()),
            Err(DeckError::UnknownHero(CardCode::new("99999a")))
        );
    }

    #[test]
    fn test_revalidated_stores_reason() {
        let deck = Deck::new(1, "Test", "01001a").with_quantity("b1", 1);
        let checked = deck.revalidated(&catalog()).unwrap();
        assert_eq!(checked.problem, Some(ProblemReason::MissingAspect));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": 12,
            "name": "Spidey",
            "investigator_code": "01001a",
            "meta": { "aspect": "justice" },
            "slots": { "b1": 2 },
            "ignoreDeckLimitSlots": { "b1": 1 },
            "problem": "too_few_cards"
        }"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.hero_code.as_str(), "01001a");
        assert_eq!(deck.meta.aspect, Some(FactionCode::Justice));
        assert_eq!(deck.quantity("b1"), 2);
        assert_eq!(deck.ignored("b1"), 1);
        assert_eq!(deck.problem, Some(ProblemReason::TooFewCards));

        let minimal: Deck =
            serde_json::from_str(r#"{ "id": 1, "name": "n", "investigator_code": "x" }"#).unwrap();
        assert!(minimal.slots.is_empty());
        assert_eq!(minimal.meta, DeckMeta::default());
    }
}
