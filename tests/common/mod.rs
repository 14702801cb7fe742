//! Shared fixtures for integration tests.
//!
//! Log output is controlled by `TEST_LOG`, then `RUST_LOG`, then `"warn"`.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use champions_deck::cards::{Card, CardCatalog, DeckRequirement};
use champions_deck::core::{FactionCode, SubtypeCode, TypeCode};
use champions_deck::deck::Deck;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per test binary.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const HERO: &str = "01001a";
pub const ALTER_EGO: &str = "01001b";
pub const SIGNATURE: &str = "01002";
pub const OTHER_SIGNATURE: &str = "02002";
pub const WEAKNESS: &str = "01003";

/// A hero requiring one signature card.
pub fn hero() -> Card {
    Card::new(HERO, "Spider-Man", TypeCode::Hero)
        .with_faction(FactionCode::Hero)
        .with_card_set("spider_man")
        .with_pack("core")
        .with_requirement(DeckRequirement::new(SIGNATURE))
}

/// An event with a deck limit of 3.
pub fn aspect_card(code: &str, faction: FactionCode) -> Card {
    Card::new(code, format!("Card {code}"), TypeCode::Event)
        .with_faction(faction)
        .with_cost(1)
        .with_deck_limit(3)
        .with_pack("core")
}

/// Hero, alter ego, signature cards, a weakness, and `count` cards of each
/// aspect plus basic, coded `<faction>-<n>`.
pub fn catalog(count: usize) -> CardCatalog {
    let mut cards = vec![
        hero(),
        Card::new(ALTER_EGO, "Peter Parker", TypeCode::AlterEgo)
            .with_faction(FactionCode::Hero)
            .with_card_set("spider_man"),
        Card::new(SIGNATURE, "Black Cat", TypeCode::Ally)
            .with_faction(FactionCode::Hero)
            .with_card_set("spider_man")
            .with_cost(2)
            .with_deck_limit(1),
        Card::new(OTHER_SIGNATURE, "Mockingbird", TypeCode::Ally)
            .with_faction(FactionCode::Hero)
            .with_card_set("captain_marvel")
            .with_cost(3)
            .with_deck_limit(1),
        Card::new(WEAKNESS, "Eviction Notice", TypeCode::Obligation)
            .with_faction(FactionCode::Encounter)
            .with_subtype(SubtypeCode::Weakness)
            .with_card_set("spider_man"),
    ];
    for faction in [
        FactionCode::Justice,
        FactionCode::Aggression,
        FactionCode::Leadership,
        FactionCode::Protection,
        FactionCode::Basic,
    ] {
        for n in 0..count {
            cards.push(aspect_card(&code(faction, n), faction));
        }
    }
    cards.into_iter().collect()
}

pub fn code(faction: FactionCode, n: usize) -> String {
    format!("{}-{n}", faction.as_str())
}

/// Justice deck with the signature card and `copies` of cards until the
/// draw deck holds `size` cards.
pub fn justice_deck(size: u32) -> Deck {
    let mut deck = Deck::new(1, "Test Deck", HERO)
        .with_aspect(FactionCode::Justice)
        .with_quantity(SIGNATURE, 1);
    let mut remaining = size.saturating_sub(1);
    let mut n = 0;
    while remaining > 0 {
        let copies = remaining.min(3);
        deck = deck.with_quantity(code(FactionCode::Justice, n), copies);
        remaining -= copies;
        n += 1;
    }
    deck
}
