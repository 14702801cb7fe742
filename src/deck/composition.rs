//! Deck composition: the derived summary shown while editing a deck.
//!
//! `build_composition` is a pure function of the deck, its slots and the
//! catalog. Building twice from the same inputs gives equal results.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{Deck, Slots};
use crate::cards::{Card, CardCatalog};
use crate::core::{CardCode, FactionCode, ResourceType, TypeCode, PLAYER_FACTIONS, RESOURCES};

/// Lowest histogram bucket. Holds cards with no printed cost.
pub const MIN_COST_BUCKET: i32 = -2;
/// Highest histogram bucket. Higher costs are counted here.
pub const MAX_COST_BUCKET: i32 = 10;
/// Number of histogram buckets, `MIN_COST_BUCKET..=MAX_COST_BUCKET`.
pub const COST_BUCKETS: usize = (MAX_COST_BUCKET - MIN_COST_BUCKET + 1) as usize;

/// Card groupings used for deck lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Ally,
    Event,
    Resource,
    Support,
    Upgrade,
}

impl CardCategory {
    pub const ALL: [CardCategory; 5] = [
        CardCategory::Ally,
        CardCategory::Event,
        CardCategory::Resource,
        CardCategory::Support,
        CardCategory::Upgrade,
    ];

    /// Category for an exact type match.
    #[must_use]
    pub const fn from_type(type_code: TypeCode) -> Option<Self> {
        match type_code {
            TypeCode::Ally => Some(CardCategory::Ally),
            TypeCode::Event => Some(CardCategory::Event),
            TypeCode::Resource => Some(CardCategory::Resource),
            TypeCode::Support => Some(CardCategory::Support),
            TypeCode::Upgrade => Some(CardCategory::Upgrade),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardCategory::Ally => "Ally",
            CardCategory::Event => "Event",
            CardCategory::Resource => "Resource",
            CardCategory::Support => "Support",
            CardCategory::Upgrade => "Upgrade",
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deck entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuantity {
    pub code: CardCode,
    pub quantity: u32,
}

/// Entries per category, sorted by card name. Empty categories are absent.
pub type CategoryMap = BTreeMap<CardCategory, Vec<CardQuantity>>;

/// Copies of one faction, split by whether the card has a second faction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionCount {
    pub dual: u32,
    pub single: u32,
}

impl FactionCount {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.dual.saturating_add(self.single)
    }
}

/// Derived deck summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    pub hero_code: CardCode,
    /// Copies counting towards deck size.
    pub normal_card_count: u32,
    pub total_card_count: u32,
    /// Distinct packs among the deck's cards.
    pub packs: usize,
    pub faction_counts: BTreeMap<FactionCode, FactionCount>,
    /// Copies per cost, index 0 is `MIN_COST_BUCKET`.
    pub cost_histogram: [u32; COST_BUCKETS],
    pub resource_counts: BTreeMap<ResourceType, u32>,
    pub normal_cards: CategoryMap,
    pub special_cards: CategoryMap,
}

impl DeckComposition {
    /// Histogram index for a cost. No cost or a negative cost goes to the
    /// lowest bucket; costs above the range go to the highest.
    #[must_use]
    pub fn cost_bucket(cost: Option<i32>) -> usize {
        match cost {
            Some(cost) if cost >= 0 => (cost.min(MAX_COST_BUCKET) - MIN_COST_BUCKET) as usize,
            _ => 0,
        }
    }

    /// Copies at a cost bucket, `MIN_COST_BUCKET..=MAX_COST_BUCKET`.
    #[must_use]
    pub fn copies_at_cost(&self, cost: i32) -> u32 {
        if !(MIN_COST_BUCKET..=MAX_COST_BUCKET).contains(&cost) {
            return 0;
        }
        self.cost_histogram[(cost - MIN_COST_BUCKET) as usize]
    }

    #[must_use]
    pub fn resource_count(&self, resource: ResourceType) -> u32 {
        self.resource_counts.get(&resource).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn faction_count(&self, faction: FactionCode) -> FactionCount {
        self.faction_counts.get(&faction).copied().unwrap_or_default()
    }

    /// Every listed code, normal entries first.
    pub fn listed_codes(&self) -> impl Iterator<Item = &CardCode> {
        self.normal_cards
            .values()
            .chain(self.special_cards.values())
            .flatten()
            .map(|entry| &entry.code)
    }
}

/// Summarize a deck.
///
/// Slot codes missing from the catalog are treated as not in the deck.
#[must_use]
pub fn build_composition(
    deck: &Deck,
    slots: &Slots,
    ignore_deck_limit_slots: &Slots,
    catalog: &CardCatalog,
) -> DeckComposition {
    let entries = selected_entries(deck, slots, catalog);
    let ignored_copies = |card: &Card| {
        ignore_deck_limit_slots
            .get(card.code.as_str())
            .copied()
            .unwrap_or(0)
    };

    let mut normal = Vec::new();
    let mut special = Vec::new();
    let mut normal_card_count: u32 = 0;
    for &(card, quantity) in &entries {
        let ignored = ignored_copies(card);
        let counts = !card.is_special() && quantity > ignored;
        if counts {
            normal_card_count = normal_card_count.saturating_add(quantity - ignored);
        }
        if (card.is_special() && quantity > 0) || ignored > 0 {
            special.push((card, quantity));
        } else if counts {
            normal.push((card, quantity));
        }
    }

    DeckComposition {
        hero_code: deck.hero_code.clone(),
        normal_card_count,
        total_card_count: entries.iter().fold(0, |total, &(_, q)| total.saturating_add(q)),
        packs: entries
            .iter()
            .map(|(card, _)| card.pack_code.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
        faction_counts: PLAYER_FACTIONS
            .iter()
            .map(|&faction| (faction, faction_count(&entries, faction)))
            .collect(),
        cost_histogram: cost_histogram(&entries),
        resource_counts: RESOURCES
            .iter()
            .map(|&resource| {
                let total = entries.iter().fold(0u32, |total, &(card, q)| {
                    total.saturating_add(card.resource_count(resource).saturating_mul(q))
                });
                (resource, total)
            })
            .collect(),
        normal_cards: categorize(&normal),
        special_cards: categorize(&special),
    }
}

/// Known cards with their quantities, sorted by name then code.
fn selected_entries<'c>(deck: &Deck, slots: &Slots, catalog: &'c CardCatalog) -> Vec<(&'c Card, u32)> {
    let mut entries: Vec<_> = slots
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .filter_map(|(code, &quantity)| match catalog.get(code.as_str()) {
            Some(card) => Some((card, quantity)),
            None => {
                tracing::trace!(deck = deck.id, code = %code, "dropping unknown card code");
                None
            }
        })
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
    entries
}

fn faction_count(entries: &[(&Card, u32)], faction: FactionCode) -> FactionCount {
    entries
        .iter()
        .filter(|(card, _)| !card.double_sided)
        .fold(FactionCount::default(), |mut count, &(card, quantity)| {
            if card.faction2_code.is_some() {
                if card.matches_faction(faction) {
                    count.dual = count.dual.saturating_add(quantity);
                }
            } else if card.faction_code == Some(faction) {
                count.single = count.single.saturating_add(quantity);
            }
            count
        })
}

fn cost_histogram(entries: &[(&Card, u32)]) -> [u32; COST_BUCKETS] {
    let mut histogram = [0u32; COST_BUCKETS];
    for &(card, quantity) in entries {
        if card.has_cost() && !card.double_sided {
            let bucket = &mut histogram[DeckComposition::cost_bucket(card.cost)];
            *bucket = bucket.saturating_add(quantity);
        }
    }
    histogram
}

fn categorize(entries: &[(&Card, u32)]) -> CategoryMap {
    let mut map = CategoryMap::new();
    for &(card, quantity) in entries {
        if let Some(category) = CardCategory::from_type(card.type_code) {
            map.entry(category).or_default().push(CardQuantity {
                code: card.code.clone(),
                quantity,
            });
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SubtypeCode;

    fn catalog() -> CardCatalog {
        [
            Card::new("a1", "Zeta Ally", TypeCode::Ally)
                .with_faction(FactionCode::Justice)
                .with_cost(3)
                .with_pack("core")
                .with_resource(ResourceType::Mental, 1),
            Card::new("e1", "Alpha Event", TypeCode::Event)
                .with_faction(FactionCode::Justice)
                .with_faction2(FactionCode::Protection)
                .with_cost(1)
                .with_pack("core")
                .with_resource(ResourceType::Wild, 2),
            Card::new("x1", "X Cost", TypeCode::Event)
                .with_faction(FactionCode::Basic)
                .with_pack("promo"),
            Card::new("w1", "Weakness", TypeCode::Obligation)
                .with_subtype(SubtypeCode::Weakness)
                .with_pack("core"),
            Card::new("r1", "Energy", TypeCode::Resource)
                .with_faction(FactionCode::Basic)
                .with_pack("core"),
        ]
        .into_iter()
        .collect()
    }

    fn deck() -> Deck {
        Deck::new(1, "Test", "01001a")
            .with_quantity("a1", 2)
            .with_quantity("e1", 3)
            .with_quantity("x1", 1)
            .with_quantity("w1", 1)
            .with_quantity("r1", 2)
            .with_quantity("missing", 4)
    }

    #[test]
    fn test_cost_bucket_clamping() {
        assert_eq!(DeckComposition::cost_bucket(None), 0);
        assert_eq!(DeckComposition::cost_bucket(Some(-1)), 0);
        assert_eq!(DeckComposition::cost_bucket(Some(0)), 2);
        assert_eq!(DeckComposition::cost_bucket(Some(10)), 12);
        assert_eq!(DeckComposition::cost_bucket(Some(14)), 12);
    }

    #[test]
    fn test_counts_and_histogram() {
        let composition = deck().composition(&catalog());

        assert_eq!(composition.total_card_count, 9);
        assert_eq!(composition.normal_card_count, 8);
        assert_eq!(composition.packs, 2);
        assert_eq!(composition.copies_at_cost(3), 2);
        assert_eq!(composition.copies_at_cost(1), 3);
        assert_eq!(composition.copies_at_cost(-2), 1);
        assert_eq!(composition.copies_at_cost(42), 0);
        assert_eq!(composition.cost_histogram.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_faction_and_resource_counts() {
        let composition = deck().composition(&catalog());

        assert_eq!(composition.faction_count(FactionCode::Justice), FactionCount { dual: 3, single: 2 });
        assert_eq!(composition.faction_count(FactionCode::Protection), FactionCount { dual: 3, single: 0 });
        assert_eq!(composition.faction_count(FactionCode::Basic).total(), 3);
        assert_eq!(composition.faction_counts.len(), PLAYER_FACTIONS.len());
        assert_eq!(composition.resource_count(ResourceType::Mental), 2);
        assert_eq!(composition.resource_count(ResourceType::Wild), 6);
        assert_eq!(composition.resource_count(ResourceType::Energy), 0);
    }

    #[test]
    fn test_categories_sorted_by_name() {
        let composition = deck().composition(&catalog());

        let events: Vec<_> = composition.normal_cards[&CardCategory::Event]
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(events, vec!["e1", "x1"]);
        assert!(!composition.normal_cards.contains_key(&CardCategory::Upgrade));
        // obligations have no category
        assert!(composition.special_cards.is_empty());
    }

    #[test]
    fn test_ignored_copies_move_to_special() {
        let deck = deck().with_ignored("a1", 1);
        let composition = deck.composition(&catalog());

        assert_eq!(composition.normal_card_count, 7);
        assert_eq!(composition.special_cards[&CardCategory::Ally][0].code.as_str(), "a1");
        assert!(!composition.normal_cards.contains_key(&CardCategory::Ally));
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let deck = deck().with_quantity("e1", u32::MAX);
        let composition = deck.composition(&catalog());

        assert_eq!(composition.total_card_count, u32::MAX);
        assert_eq!(composition.normal_card_count, u32::MAX);
        assert_eq!(composition.resource_count(ResourceType::Wild), u32::MAX);
        assert_eq!(composition.copies_at_cost(1), u32::MAX);
    }

    #[test]
    fn test_idempotent() {
        let deck = deck();
        let catalog = catalog();
        assert_eq!(deck.composition(&catalog), deck.composition(&catalog));
    }
}
