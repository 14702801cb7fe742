//! Catalog ingestion from the card database's JSON records.
//!
//! The remote database ships one flat record per card. This module turns
//! those records into `Card` values, deriving the search fields the rule
//! engine relies on (normalized traits, uses tag, restriction lists).
//! Fetching and caching the JSON is the caller's business.

use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::attributes::{normalize_traits, CardStats, ResourceIcons};
use super::definition::{Card, DeckRequirement};
use super::registry::CardCatalog;
use crate::core::{CardCode, CatalogError, TypeCode};
use crate::rules::RuleOption;

/// Raw card record as served by the card database.
#[derive(Debug, Deserialize)]
pub struct RawCard {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub subname: Option<String>,
    #[serde(default)]
    pub pack_code: Option<String>,
    pub type_code: String,
    #[serde(default)]
    pub subtype_code: Option<String>,
    #[serde(default)]
    pub faction_code: Option<String>,
    #[serde(default)]
    pub faction2_code: Option<String>,
    #[serde(default)]
    pub card_set_code: Option<String>,

    #[serde(default)]
    pub cost: Option<i32>,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub attack: Option<i32>,
    #[serde(default)]
    pub thwart: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub recover: Option<i32>,
    #[serde(default)]
    pub hand_size: Option<i32>,
    #[serde(default)]
    pub scheme: Option<i32>,
    #[serde(default)]
    pub threat: Option<i32>,
    #[serde(default)]
    pub resource_physical: Option<u32>,
    #[serde(default)]
    pub resource_mental: Option<u32>,
    #[serde(default)]
    pub resource_energy: Option<u32>,
    #[serde(default)]
    pub resource_wild: Option<u32>,

    #[serde(default)]
    pub deck_limit: Option<u32>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub is_unique: Option<bool>,
    #[serde(default)]
    pub double_sided: Option<bool>,
    #[serde(default)]
    pub spoiler: Option<bool>,
    #[serde(default)]
    pub hidden: Option<bool>,

    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub real_text: Option<String>,
    #[serde(default)]
    pub traits: Option<String>,
    #[serde(default)]
    pub real_traits: Option<String>,

    #[serde(default)]
    pub restrictions: Option<RawRestrictions>,
    #[serde(default)]
    pub deck_requirements: Option<RawDeckRequirements>,
    #[serde(default)]
    pub deck_options: Option<Vec<RuleOption>>,

    #[serde(default)]
    pub linked_card: Option<Box<RawCard>>,
}

/// `{ "investigator": { "<hero code>": "<hero code>" } }`
#[derive(Debug, Default, Deserialize)]
pub struct RawRestrictions {
    #[serde(default)]
    pub investigator: Option<BTreeMap<String, String>>,
}

/// `{ "card": { "<code>": { "<code>": "<code>", "<alt>": "<alt>" } } }`
///
/// Each inner map lists every code that satisfies the requirement keyed
/// by the outer code.
#[derive(Debug, Default, Deserialize)]
pub struct RawDeckRequirements {
    #[serde(default)]
    pub card: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

/// "Uses (N tag)." marker in card text.
fn uses_regex() -> &'static Regex {
    static USES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"Uses\s*\([0-9]+\s(.+?)\)\.").unwrap()
    });
    &USES_REGEX
}

/// Extract the lowercased tag from "Uses (3 ammo)." card text.
#[must_use]
pub fn parse_uses(text: &str) -> Option<String> {
    uses_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

fn parse_field<T: FromStr>(
    code: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, CatalogError> {
    value
        .map(|v| {
            v.parse::<T>().map_err(|_| CatalogError::InvalidField {
                code: CardCode::new(code),
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

impl RawRestrictions {
    fn into_heroes(self) -> Option<Vec<CardCode>> {
        let heroes: Vec<CardCode> = self
            .investigator?
            .into_keys()
            .map(CardCode::from)
            .collect();
        (!heroes.is_empty()).then_some(heroes)
    }
}

impl RawDeckRequirements {
    fn into_requirements(self) -> Vec<DeckRequirement> {
        self.card
            .unwrap_or_default()
            .into_iter()
            .map(|(code, choices)| DeckRequirement {
                alternates: choices
                    .into_keys()
                    .filter(|alt| *alt != code)
                    .map(CardCode::from)
                    .collect(),
                code: CardCode::from(code),
            })
            .collect()
    }
}

impl RawCard {
    /// Convert into an immutable `Card`.
    pub fn into_card(self) -> Result<Card, CatalogError> {
        let code = self.code;
        let type_code = self
            .type_code
            .parse::<TypeCode>()
            .map_err(|_| CatalogError::InvalidField {
                code: CardCode::new(code.as_str()),
                field: "type_code",
                value: self.type_code.clone(),
            })?;
        let subtype_code = parse_field(&code, "subtype_code", self.subtype_code.as_deref())?;
        let faction_code = parse_field(&code, "faction_code", self.faction_code.as_deref())?;
        let faction2_code = parse_field(&code, "faction2_code", self.faction2_code.as_deref())?;

        let linked_card = self
            .linked_card
            .map(|raw| {
                (*raw).into_card().map(|mut back| {
                    back.back_linked = true;
                    Box::new(back)
                })
            })
            .transpose()?;

        let real_text = self.real_text.or_else(|| self.text.clone());
        let real_traits = self.real_traits.or_else(|| self.traits.clone());
        let uses = real_text.as_deref().and_then(parse_uses);
        let spoiler =
            self.spoiler.unwrap_or(false) || linked_card.as_ref().is_some_and(|back| back.spoiler);

        Ok(Card {
            real_name: self.real_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            subname: self.subname,
            pack_code: self.pack_code.unwrap_or_default(),
            type_code,
            subtype_code,
            faction_code,
            faction2_code,
            card_set_code: self.card_set_code,
            cost: self.cost,
            stats: CardStats {
                health: self.health,
                attack: self.attack,
                thwart: self.thwart,
                defense: self.defense,
                recover: self.recover,
                hand_size: self.hand_size,
                scheme: self.scheme,
                threat: self.threat,
            },
            resources: ResourceIcons {
                physical: self.resource_physical,
                mental: self.resource_mental,
                energy: self.resource_energy,
                wild: self.resource_wild,
            },
            deck_limit: self.deck_limit,
            quantity: self.quantity,
            is_unique: self.is_unique.unwrap_or(false),
            double_sided: self.double_sided.unwrap_or(false),
            spoiler,
            hidden: self.hidden.unwrap_or(false),
            restrictions: self
                .restrictions
                .and_then(RawRestrictions::into_heroes)
                .map(|heroes| heroes.into_iter().collect()),
            deck_requirements: self
                .deck_requirements
                .map(RawDeckRequirements::into_requirements)
                .unwrap_or_default(),
            deck_options: self.deck_options.unwrap_or_default(),
            real_traits_normalized: real_traits.as_deref().and_then(normalize_traits),
            traits: self.traits,
            text: self.text,
            real_text,
            uses,
            linked_card,
            back_linked: false,
            code: CardCode::from(code),
        })
    }
}

impl CardCatalog {
    /// Build a catalog from raw records.
    pub fn from_records(records: impl IntoIterator<Item = RawCard>) -> Result<Self, CatalogError> {
        let mut catalog = CardCatalog::new();
        for record in records {
            catalog.insert(record.into_card()?);
        }
        tracing::debug!(cards = catalog.len(), "card catalog loaded");
        Ok(catalog)
    }

    /// Parse a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawCard> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Parse a JSON array of card records from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let records: Vec<RawCard> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }
}
