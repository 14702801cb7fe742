//! Card definitions - static card data.
//!
//! `Card` holds the immutable, gameplay-relevant properties of one printed
//! card. Cards are built once when the catalog is loaded and are never
//! mutated during deck evaluation.
//!
//! A double-faced card owns its back face through `linked_card`; the back
//! is not shared with any other card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{normalize_traits, trait_token, CardStats, ResourceIcons};
use crate::core::{CardCode, FactionCode, ResourceType, SubtypeCode, TypeCode, ASPECT_FACTIONS};
use crate::rules::RuleOption;

/// A card the hero's deck must contain.
///
/// Satisfied by `code` or by any of its `alternates`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRequirement {
    pub code: CardCode,
    #[serde(default)]
    pub alternates: Vec<CardCode>,
}

impl DeckRequirement {
    /// Create a requirement with no alternates.
    #[must_use]
    pub fn new(code: impl Into<CardCode>) -> Self {
        Self {
            code: code.into(),
            alternates: Vec::new(),
        }
    }

    /// Add an acceptable substitute.
    #[must_use]
    pub fn with_alternate(mut self, code: impl Into<CardCode>) -> Self {
        self.alternates.push(code.into());
        self
    }

    /// Check whether a card code satisfies this requirement.
    #[must_use]
    pub fn is_satisfied_by(&self, code: &CardCode) -> bool {
        self.code == *code || self.alternates.contains(code)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use champions_deck::cards::Card;
/// use champions_deck::core::{FactionCode, TypeCode};
///
/// let card = Card::new("01050", "Haymaker", TypeCode::Event)
///     .with_faction(FactionCode::Aggression)
///     .with_cost(2)
///     .with_deck_limit(3);
///
/// assert!(card.has_cost());
/// assert_eq!(card.faction_code(), FactionCode::Aggression);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    // === Identity ===
    pub code: CardCode,
    pub name: String,
    /// Untranslated name; copies are counted by this.
    pub real_name: String,
    pub subname: Option<String>,
    pub pack_code: String,

    // === Classification ===
    pub type_code: TypeCode,
    pub subtype_code: Option<SubtypeCode>,
    pub faction_code: Option<FactionCode>,
    pub faction2_code: Option<FactionCode>,
    /// Signature set; hero cards share their hero's set.
    pub card_set_code: Option<String>,

    // === Gameplay ===
    pub cost: Option<i32>,
    pub stats: CardStats,
    pub resources: ResourceIcons,

    // === Deck construction ===
    pub deck_limit: Option<u32>,
    /// Copies printed in the product.
    pub quantity: Option<u32>,
    pub is_unique: bool,
    pub double_sided: bool,
    pub spoiler: bool,
    pub hidden: bool,
    /// Hero codes that alone may include this card.
    pub restrictions: Option<SmallVec<[CardCode; 2]>>,
    pub deck_requirements: Vec<DeckRequirement>,
    pub deck_options: Vec<RuleOption>,

    // === Text ===
    pub text: Option<String>,
    pub real_text: Option<String>,
    pub traits: Option<String>,
    /// `#trait#` tokens, see `normalize_traits`.
    pub real_traits_normalized: Option<String>,
    /// Tag from "Uses (N tag)." in the card text, lowercased.
    pub uses: Option<String>,

    // === Linked face ===
    pub linked_card: Option<Box<Card>>,
    /// True on a card that is itself the back of another card.
    pub back_linked: bool,
}

impl Card {
    /// Create a card with only identity and type set.
    #[must_use]
    pub fn new(code: impl Into<CardCode>, name: impl Into<String>, type_code: TypeCode) -> Self {
        let name = name.into();
        Self {
            code: code.into(),
            real_name: name.clone(),
            name,
            subname: None,
            pack_code: String::new(),
            type_code,
            subtype_code: None,
            faction_code: None,
            faction2_code: None,
            card_set_code: None,
            cost: None,
            stats: CardStats::default(),
            resources: ResourceIcons::default(),
            deck_limit: None,
            quantity: None,
            is_unique: false,
            double_sided: false,
            spoiler: false,
            hidden: false,
            restrictions: None,
            deck_requirements: Vec::new(),
            deck_options: Vec::new(),
            text: None,
            real_text: None,
            traits: None,
            real_traits_normalized: None,
            uses: None,
            linked_card: None,
            back_linked: false,
        }
    }

    // === Builders ===

    #[must_use]
    pub fn with_faction(mut self, faction: FactionCode) -> Self {
        self.faction_code = Some(faction);
        self
    }

    #[must_use]
    pub fn with_faction2(mut self, faction: FactionCode) -> Self {
        self.faction2_code = Some(faction);
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: SubtypeCode) -> Self {
        self.subtype_code = Some(subtype);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_deck_limit(mut self, limit: u32) -> Self {
        self.deck_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn with_pack(mut self, pack_code: impl Into<String>) -> Self {
        self.pack_code = pack_code.into();
        self
    }

    #[must_use]
    pub fn with_card_set(mut self, set_code: impl Into<String>) -> Self {
        self.card_set_code = Some(set_code.into());
        self
    }

    #[must_use]
    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = real_name.into();
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceType, count: u32) -> Self {
        self.resources = self.resources.with(resource, count);
        self
    }

    /// Set the trait line and its normalized tokens.
    #[must_use]
    pub fn with_traits(mut self, traits: impl Into<String>) -> Self {
        let traits = traits.into();
        self.real_traits_normalized = normalize_traits(&traits);
        self.traits = Some(traits);
        self
    }

    /// Set the card text (both localized and untranslated).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.real_text = Some(text.clone());
        self.text = Some(text);
        self
    }

    /// Restrict the card to the given heroes.
    #[must_use]
    pub fn restricted_to(mut self, heroes: impl IntoIterator<Item = CardCode>) -> Self {
        self.restrictions = Some(heroes.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: DeckRequirement) -> Self {
        self.deck_requirements.push(requirement);
        self
    }

    #[must_use]
    pub fn with_deck_option(mut self, option: RuleOption) -> Self {
        self.deck_options.push(option);
        self
    }

    #[must_use]
    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    #[must_use]
    pub fn spoiler(mut self) -> Self {
        self.spoiler = true;
        self
    }

    /// Attach a back face. The back is flagged `back_linked`.
    #[must_use]
    pub fn with_linked_card(mut self, mut back: Card) -> Self {
        back.back_linked = true;
        self.linked_card = Some(Box::new(back));
        self
    }

    // === Classification ===

    /// Primary faction, `Basic` when unset.
    #[must_use]
    pub fn faction_code(&self) -> FactionCode {
        self.faction_code.unwrap_or(FactionCode::Basic)
    }

    /// Check either faction slot. Dual-faction cards match both.
    #[must_use]
    pub fn matches_faction(&self, faction: FactionCode) -> bool {
        self.faction_code == Some(faction) || self.faction2_code == Some(faction)
    }

    /// Cards with a printed cost: allies, events, upgrades and supports.
    #[must_use]
    pub fn has_cost(&self) -> bool {
        matches!(
            self.type_code,
            TypeCode::Ally | TypeCode::Event | TypeCode::Upgrade | TypeCode::Support
        )
    }

    #[must_use]
    pub fn is_player_deck_card(&self) -> bool {
        self.has_cost() || self.type_code == TypeCode::Resource
    }

    /// Any scenario card, including villains and main schemes.
    #[must_use]
    pub fn is_encounter_card(&self) -> bool {
        self.is_encounter_deck_card()
            || matches!(self.type_code, TypeCode::Villain | TypeCode::MainScheme)
    }

    /// Cards shuffled into the encounter deck.
    #[must_use]
    pub fn is_encounter_deck_card(&self) -> bool {
        matches!(
            self.type_code,
            TypeCode::Minion | TypeCode::Treachery | TypeCode::SideScheme | TypeCode::Obligation
        )
    }

    #[must_use]
    pub fn is_weakness(&self) -> bool {
        self.subtype_code.is_some()
    }

    /// Special cards sit outside normal deck accounting: weaknesses,
    /// spoilers and restricted cards.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.is_weakness() || self.spoiler || self.restrictions.is_some()
    }

    /// False only when the card is restricted to other heroes.
    #[must_use]
    pub fn is_allowed_for(&self, hero_code: &CardCode) -> bool {
        match &self.restrictions {
            Some(heroes) => heroes.contains(hero_code),
            None => true,
        }
    }

    /// Check the normalized trait tokens, case-insensitively.
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.real_traits_normalized
            .as_deref()
            .is_some_and(|traits| traits.contains(&trait_token(name)))
    }

    /// Does the untranslated text carry "Uses (N tag)." for this tag?
    #[must_use]
    pub fn text_contains_uses(&self, tag: &str) -> bool {
        self.real_text.as_deref().is_some_and(|text| {
            text.to_lowercase()
                .contains(&format!("{}).", tag.to_lowercase()))
        })
    }

    /// Number of resource icons of a type.
    #[must_use]
    pub fn resource_count(&self, resource: ResourceType) -> u32 {
        self.resources.count(resource)
    }

    /// Deckbuilding options for a hero.
    ///
    /// Always starts with "choose one aspect" followed by "basic cards",
    /// then any aspect-selecting options printed on the hero. Empty for
    /// every other card type.
    #[must_use]
    pub fn hero_select_options(&self) -> Vec<RuleOption> {
        if self.type_code != TypeCode::Hero {
            return Vec::new();
        }
        let mut options = vec![
            RuleOption::aspect_select(ASPECT_FACTIONS),
            // basic cards only; not an open option accepting every faction
            RuleOption::factions([FactionCode::Basic]),
        ];
        options.extend(
            self.deck_options
                .iter()
                .filter(|option| option.selects_aspect())
                .cloned(),
        );
        options
    }
}
