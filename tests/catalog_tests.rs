//! Catalog loading tests against card-database style JSON.

mod common;

use serde_json::json;

use champions_deck::cards::CardCatalog;
use champions_deck::core::{CatalogError, FactionCode, FilterDefaults, ResourceType, TypeCode};
use champions_deck::deck::Deck;
use champions_deck::rules::{DeckRules, DeckValidator, ProblemReason};

use common::init_logging;

fn database() -> serde_json::Value {
    json!([
        {
            "code": "01010a",
            "name": "Hawk",
            "type_code": "hero",
            "faction_code": "hero",
            "card_set_code": "hawk",
            "pack_code": "core",
            "health": 10,
            "hand_size": 5,
            "deck_requirements": { "card": { "01011": { "01011": "01011" } } },
            "deck_options": [
                { "aspect_select": ["aggression"], "trait": ["Weapon"], "limit": 2,
                  "error": "At most 2 off-aspect Weapons" }
            ],
            "linked_card": {
                "code": "01010b", "name": "Archer", "type_code": "alter_ego",
                "faction_code": "hero", "card_set_code": "hawk"
            }
        },
        {
            "code": "01011", "name": "Trick Arrow", "type_code": "upgrade",
            "faction_code": "hero", "card_set_code": "hawk", "pack_code": "core",
            "cost": 1, "deck_limit": 1, "resource_energy": 1,
            "real_text": "Uses (3 arrow counters)."
        },
        {
            "code": "01020", "name": "Bo Staff", "type_code": "upgrade",
            "faction_code": "aggression", "pack_code": "core", "cost": 2,
            "deck_limit": 3, "real_traits": "Item. Weapon.", "resource_physical": 1
        },
        {
            "code": "01021", "name": "Shield", "type_code": "upgrade",
            "faction_code": "aggression", "pack_code": "core", "cost": 3,
            "deck_limit": 3, "real_traits": "Item. Armor."
        },
        {
            "code": "01030", "name": "Tactics", "type_code": "event",
            "faction_code": "leadership", "pack_code": "wave1", "cost": 0,
            "deck_limit": 3, "resource_mental": 1
        },
        {
            "code": "01040", "name": "Goon", "type_code": "minion",
            "faction_code": "encounter", "pack_code": "core",
            "health": 4, "attack": 1, "scheme": 1
        }
    ])
}

fn load() -> CardCatalog {
    CardCatalog::from_json(&database().to_string()).expect("fixture parses")
}

#[test]
fn test_loads_database_records() {
    init_logging();
    let catalog = load();

    assert_eq!(catalog.len(), 6);
    let hero = catalog.get("01010a").unwrap();
    assert_eq!(hero.stats.hand_size, Some(5));
    assert_eq!(hero.deck_options[0].traits, vec!["Weapon".to_string()]);
    assert_eq!(hero.linked_card.as_deref().map(|c| c.type_code), Some(TypeCode::AlterEgo));

    let arrow = catalog.get("01011").unwrap();
    assert_eq!(arrow.uses.as_deref(), Some("arrow counters"));
    assert_eq!(arrow.resource_count(ResourceType::Energy), 1);

    assert!(catalog.get("01020").unwrap().has_trait("weapon"));
    assert_eq!(catalog.heroes().count(), 1);
}

#[test]
fn test_loaded_hero_rules() {
    init_logging();
    let catalog = load();
    let hero = catalog.get("01010a").unwrap();
    let deck = Deck::new(1, "Arrows", "01010a").with_aspect(FactionCode::Leadership);
    let validator = DeckValidator::new(hero, &deck.meta);

    // leadership plus basic, and aggression weapons through the hero's option
    assert_eq!(validator.options().len(), 3);
    assert!(validator.can_include(catalog.get("01030").unwrap()));
    assert!(validator.can_include(catalog.get("01020").unwrap()));
    assert!(!validator.can_include(catalog.get("01021").unwrap()));
    assert!(!validator.can_include(catalog.get("01040").unwrap()));

    let deck = deck
        .with_quantity("01011", 1)
        .with_quantity("01020", 3);
    let problem = deck.problem(&catalog).unwrap().unwrap();
    assert_eq!(problem.reason, ProblemReason::DeckOptionsLimit);
    assert_eq!(problem.headline(), "At most 2 off-aspect Weapons");

    let deck = deck.with_quantity("01020", 2).with_quantity("01030", 3);
    assert_eq!(deck.problem(&catalog).unwrap().unwrap().reason, ProblemReason::TooFewCards);
}

#[test]
fn test_filter_defaults_from_catalog() {
    init_logging();
    let catalog = load();
    let defaults = FilterDefaults::from_cards(catalog.iter());

    assert_eq!(defaults.cost, (0, 3));
    assert_eq!(defaults.enemy_health, (4, 4));
    assert_eq!(defaults.enemy_attack, (1, 1));
    assert_eq!(defaults.enemy_scheme, (1, 1));
}

#[test]
fn test_unknown_faction_rejected() {
    init_logging();
    let json = json!([{ "code": "q", "name": "Q", "type_code": "event", "faction_code": "mystic" }]);
    let err = CardCatalog::from_json(&json.to_string()).unwrap_err();

    assert!(matches!(err, CatalogError::InvalidField { field: "faction_code", .. }));
    assert_eq!(err.to_string(), "card q: invalid faction_code 'mystic'");
}
