//! Configuration values.
//!
//! Two configuration records are provided:
//! - `DeckSizeLimits`: legal draw-deck size bounds used by validation
//! - `FilterDefaults`: seed ranges for card-browser sliders
//!
//! Both are plain immutable values. The validation and composition code
//! only ever reads `DeckSizeLimits`; `FilterDefaults` exists for whatever
//! session layer drives card search.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::codes::TypeCode;

/// Inclusive `(min, max)` range for a numeric slider.
pub type IntRange = (i32, i32);

/// Draw-deck size bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSizeLimits {
    /// Fewest draw-deck cards a legal deck may hold.
    pub min: u32,
    /// Most draw-deck cards a legal deck may hold.
    pub max: u32,
}

impl DeckSizeLimits {
    /// Standard constructed deck size.
    pub const STANDARD: DeckSizeLimits = DeckSizeLimits { min: 40, max: 50 };

    /// Create custom limits.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "Minimum deck size must not exceed maximum");
        Self { min, max }
    }

    /// Check whether a draw-deck size is within bounds.
    #[must_use]
    pub fn contains(&self, size: u32) -> bool {
        size >= self.min && size <= self.max
    }
}

impl Default for DeckSizeLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Default slider ranges for card search.
///
/// `Default` yields the static ranges; `from_cards` widens them to the
/// values actually present in a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefaults {
    pub cost: IntRange,
    pub enemy_health: IntRange,
    pub enemy_attack: IntRange,
    pub enemy_scheme: IntRange,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            cost: (0, 6),
            enemy_health: (0, 10),
            enemy_attack: (0, 5),
            enemy_scheme: (0, 5),
        }
    }
}

/// Seed for a range being widened. Any observed value collapses it.
const UNSEEN: IntRange = (10, 0);

fn widen(value: Option<i32>, range: IntRange) -> IntRange {
    match value {
        Some(v) if v >= 0 => (v.min(range.0), v.max(range.1)),
        _ => range,
    }
}

fn settle(range: IntRange, fallback: IntRange) -> IntRange {
    if range == UNSEEN {
        fallback
    } else {
        range
    }
}

impl FilterDefaults {
    /// Compute slider ranges from a set of cards.
    ///
    /// Cost considers every card and its linked back face; enemy ranges
    /// only consider minions. Null and negative values are ignored. A range
    /// that saw no values keeps its static default.
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut cost = UNSEEN;
        let mut health = UNSEEN;
        let mut attack = UNSEEN;
        let mut scheme = UNSEEN;

        let mut observe = |card: &Card| {
            cost = widen(card.cost, cost);
            if card.type_code == TypeCode::Minion {
                health = widen(card.stats.health, health);
                attack = widen(card.stats.attack, attack);
                scheme = widen(card.stats.scheme, scheme);
            }
        };

        for card in cards {
            observe(card);
            if let Some(linked) = card.linked_card.as_deref() {
                observe(linked);
            }
        }

        let defaults = Self::default();
        Self {
            cost: settle(cost, defaults.cost),
            enemy_health: settle(health, defaults.enemy_health),
            enemy_attack: settle(attack, defaults.enemy_attack),
            enemy_scheme: settle(scheme, defaults.enemy_scheme),
        }
    }
}
