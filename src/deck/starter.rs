//! Starter decks seeded from a hero's required cards.
//!
//! A hero's requirements may list alternates. Option set 0 is every
//! required card; set `i + 1` is the `i`-th alternate of each requirement
//! that has one. Picking sets swaps the defaults for alternates.

use super::model::Slots;
use crate::cards::{Card, CardCatalog};
use crate::core::CardCode;

fn lookup<'c>(catalog: &'c CardCatalog, code: &CardCode) -> Option<&'c Card> {
    let card = catalog.get(code.as_str());
    if card.is_none() {
        tracing::warn!(code = %code, "required card is not in the catalog");
    }
    card
}

/// Copies a starter deck gets: the deck limit, else the printed quantity.
fn seed_count(card: &Card) -> u32 {
    card.deck_limit
        .filter(|&n| n > 0)
        .or(card.quantity)
        .unwrap_or(0)
}

/// Required cards grouped into option sets.
#[must_use]
pub fn required_card_options<'c>(hero: &Card, catalog: &'c CardCatalog) -> Vec<Vec<&'c Card>> {
    let mut options: Vec<Vec<&Card>> = vec![Vec::new()];
    for requirement in &hero.deck_requirements {
        if let Some(card) = lookup(catalog, &requirement.code) {
            options[0].push(card);
        }
        for (index, alternate) in requirement.alternates.iter().enumerate() {
            if options.len() <= index + 1 {
                options.resize_with(index + 2, Vec::new);
            }
            if let Some(card) = lookup(catalog, alternate) {
                options[index + 1].push(card);
            }
        }
    }
    options
}

/// Initial slots for a new deck.
///
/// `selected[i]` says whether option set `i` is wanted. Selecting only set
/// 0 keeps the defaults. Otherwise each set is applied in order: selected
/// sets add their cards, unselected sets remove theirs.
#[must_use]
pub fn starter_slots(hero: &Card, catalog: &CardCatalog, selected: &[bool]) -> Slots {
    let mut slots = Slots::new();
    for requirement in &hero.deck_requirements {
        if let Some(card) = lookup(catalog, &requirement.code) {
            insert_seed(&mut slots, card);
        }
    }

    let defaults_only = selected.first() == Some(&true) && selected.iter().filter(|&&s| s).count() == 1;
    if defaults_only {
        return slots;
    }

    let options = required_card_options(hero, catalog);
    for (cards, &include) in options.iter().zip(selected) {
        for card in cards {
            if include {
                insert_seed(&mut slots, card);
            } else {
                slots.remove(card.code.as_str());
            }
        }
    }
    slots
}

fn insert_seed(slots: &mut Slots, card: &Card) {
    match seed_count(card) {
        0 => {
            slots.remove(card.code.as_str());
        }
        count => {
            slots.insert(card.code.clone(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DeckRequirement;
    use crate::core::{FactionCode, TypeCode};

    fn setup() -> (Card, CardCatalog) {
        let hero = Card::new("01001a", "Hero", TypeCode::Hero)
            .with_requirement(DeckRequirement::new("s1").with_alternate("s1x"))
            .with_requirement(DeckRequirement::new("s2"));
        let catalog = [
            Card::new("s1", "Sig One", TypeCode::Ally)
                .with_faction(FactionCode::Hero)
                .with_deck_limit(1),
            Card::new("s1x", "Sig One Alt", TypeCode::Ally)
                .with_faction(FactionCode::Hero)
                .with_deck_limit(1),
            Card::new("s2", "Sig Two", TypeCode::Event)
                .with_faction(FactionCode::Hero)
                .with_quantity(2),
        ]
        .into_iter()
        .collect();
        (hero, catalog)
    }

    #[test]
    fn test_option_sets() {
        let (hero, catalog) = setup();
        let options = required_card_options(&hero, &catalog);

        assert_eq!(options.len(), 2);
        let codes = |set: &[&Card]| set.iter().map(|c| c.code.as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(codes(&options[0]), vec!["s1", "s2"]);
        assert_eq!(codes(&options[1]), vec!["s1x"]);
    }

    #[test]
    fn test_default_seed() {
        let (hero, catalog) = setup();
        let slots = starter_slots(&hero, &catalog, &[true]);

        assert_eq!(slots.get("s1"), Some(&1));
        // no deck limit: printed quantity
        assert_eq!(slots.get("s2"), Some(&2));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_alternate_replaces_default() {
        let (hero, catalog) = setup();
        let slots = starter_slots(&hero, &catalog, &[false, true]);

        assert_eq!(slots.get("s1"), None);
        assert_eq!(slots.get("s2"), None);
        assert_eq!(slots.get("s1x"), Some(&1));
    }

    #[test]
    fn test_missing_codes_skipped() {
        let hero = Card::new("h", "Hero", TypeCode::Hero).with_requirement(DeckRequirement::new("nope"));
        let slots = starter_slots(&hero, &CardCatalog::new(), &[true]);
        assert!(slots.is_empty());
        assert_eq!(required_card_options(&hero, &CardCatalog::new()), vec![Vec::<&Card>::new()]);
    }
}
