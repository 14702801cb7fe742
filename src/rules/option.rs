//! Rule options: declarative deckbuilding clauses.
//!
//! A hero's deckbuilding rules are an ordered list of `RuleOption`s. Each
//! option constrains some dimensions of a card (faction, type, trait, uses,
//! text). A dimension left empty is unconstrained, not "must be empty".
//!
//! Options are parsed once from the card database and never change.
//! Evaluation order and accounting (limits, at-least counts) live in the
//! validator; this module only answers "does this option match this card".

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{FactionCode, TypeCode};

/// Minimum per-faction match count that a number of factions must reach.
///
/// `{ factions: 2, min: 5 }` reads "at least 5 cards from each of at least
/// 2 different factions".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtLeast {
    #[serde(default)]
    pub factions: u32,
    #[serde(default)]
    pub min: u32,
}

impl AtLeast {
    /// A zero in either field disables the requirement.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.factions > 0 && self.min > 0
    }
}

/// A text fragment matched against lowercased card text.
///
/// Fragments are regular expressions when they compile; otherwise they are
/// matched literally.
#[derive(Clone, Debug)]
pub struct TextPattern {
    source: String,
    matcher: Matcher,
}

#[derive(Clone, Debug)]
enum Matcher {
    Regex(Regex),
    Literal,
}

impl TextPattern {
    /// Compile a fragment.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let matcher = match Regex::new(&source) {
            Ok(regex) => Matcher::Regex(regex),
            Err(err) => {
                tracing::warn!(pattern = %source, error = %err, "text pattern is not a valid regex, matching literally");
                Matcher::Literal
            }
        };
        Self { source, matcher }
    }

    /// The fragment as written in the card data.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check the fragment against already-lowercased text.
    #[must_use]
    pub fn is_match(&self, lowered_text: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(lowered_text),
            Matcher::Literal => lowered_text.contains(self.source.as_str()),
        }
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for TextPattern {}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for TextPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for TextPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(TextPattern::new)
    }
}

/// Treat an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One deckbuilding clause.
///
/// All fields are optional. An option matches a card when every
/// constrained dimension is satisfied by at least one listed value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOption {
    /// Candidate aspects; the deck picks one and the card must belong to it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aspect_select: SmallVec<[FactionCode; 4]>,

    /// Fixed factions; the card must belong to one of them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aspect: SmallVec<[FactionCode; 4]>,

    /// Allowed card types.
    #[serde(rename = "type", alias = "type_code", default, deserialize_with = "null_as_default")]
    pub type_code: SmallVec<[TypeCode; 4]>,

    /// Required traits (any one).
    #[serde(rename = "trait", default, deserialize_with = "null_as_default")]
    pub traits: Vec<String>,

    /// Required "Uses (N tag)." resource tags (any one).
    #[serde(default, deserialize_with = "null_as_default")]
    pub uses: Vec<String>,

    /// Text fragments (any one).
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: Vec<TextPattern>,

    /// Maximum cards accepted under this option.
    #[serde(default)]
    pub limit: Option<u32>,

    #[serde(default)]
    pub atleast: Option<AtLeast>,

    /// A matching card is disqualified outright.
    #[serde(default, deserialize_with = "null_as_default")]
    pub not: bool,

    /// Message shown when this option's limit or at-least rule is broken.
    #[serde(default)]
    pub error: Option<String>,
}

/// A single dimension check. Returns true when the dimension is
/// unconstrained or satisfied.
type DimensionCheck = fn(&RuleOption, &Card, Option<FactionCode>) -> bool;

/// Dimensions in evaluation order. New dimensions are added here.
const DIMENSIONS: [DimensionCheck; 6] = [
    RuleOption::check_aspect_select,
    RuleOption::check_aspect,
    RuleOption::check_type,
    RuleOption::check_trait,
    RuleOption::check_uses,
    RuleOption::check_text,
];

impl RuleOption {
    /// Parse an ordered list of raw option records.
    ///
    /// Order is preserved. Absent and `null` fields both mean
    /// "unconstrained".
    pub fn parse_list(raw: serde_json::Value) -> Result<Vec<RuleOption>, serde_json::Error> {
        serde_json::from_value(raw)
    }

    /// Option requiring one of the given aspects to be selected.
    #[must_use]
    pub fn aspect_select(candidates: impl IntoIterator<Item = FactionCode>) -> Self {
        Self {
            aspect_select: candidates.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Option admitting cards from fixed factions.
    #[must_use]
    pub fn factions(factions: impl IntoIterator<Item = FactionCode>) -> Self {
        Self {
            aspect: factions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restrict to card types.
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.type_code = types.into_iter().collect();
        self
    }

    /// Require a trait.
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    /// Require a uses tag.
    #[must_use]
    pub fn with_uses(mut self, tag: impl Into<String>) -> Self {
        self.uses.push(tag.into());
        self
    }

    /// Require a text fragment.
    #[must_use]
    pub fn with_text(mut self, pattern: impl Into<String>) -> Self {
        self.text.push(TextPattern::new(pattern));
        self
    }

    /// Cap the number of cards this option accepts.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Require `min` cards from each of `factions` different factions.
    #[must_use]
    pub fn with_atleast(mut self, factions: u32, min: u32) -> Self {
        self.atleast = Some(AtLeast { factions, min });
        self
    }

    /// Turn this option into a disqualifier.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.not = true;
        self
    }

    /// Attach a user-facing error message.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Does this option ask the deck to choose an aspect?
    #[must_use]
    pub fn selects_aspect(&self) -> bool {
        !self.aspect_select.is_empty()
    }

    /// Aspect this option resolves to for a deck.
    ///
    /// The deck's choice if it is one of the candidates, otherwise the first
    /// candidate. `None` when the option selects no aspect.
    #[must_use]
    pub fn resolved_aspect(&self, chosen: Option<FactionCode>) -> Option<FactionCode> {
        match chosen {
            Some(aspect) if self.aspect_select.contains(&aspect) => Some(aspect),
            _ => self.aspect_select.first().copied(),
        }
    }

    /// Check every constrained dimension against a card.
    #[must_use]
    pub fn matches(&self, card: &Card, chosen_aspect: Option<FactionCode>) -> bool {
        DIMENSIONS
            .iter()
            .all(|check| check(self, card, chosen_aspect))
    }

    fn check_aspect_select(&self, card: &Card, chosen: Option<FactionCode>) -> bool {
        match self.resolved_aspect(chosen) {
            Some(aspect) => card.matches_faction(aspect),
            None => true,
        }
    }

    fn check_aspect(&self, card: &Card, _: Option<FactionCode>) -> bool {
        self.aspect.is_empty() || self.aspect.iter().any(|&f| card.matches_faction(f))
    }

    fn check_type(&self, card: &Card, _: Option<FactionCode>) -> bool {
        self.type_code.is_empty() || self.type_code.contains(&card.type_code)
    }

    fn check_trait(&self, card: &Card, _: Option<FactionCode>) -> bool {
        self.traits.is_empty() || self.traits.iter().any(|t| card.has_trait(t))
    }

    fn check_uses(&self, card: &Card, _: Option<FactionCode>) -> bool {
        self.uses.is_empty() || self.uses.iter().any(|tag| card.text_contains_uses(tag))
    }

    fn check_text(&self, card: &Card, _: Option<FactionCode>) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let Some(text) = card.real_text.as_deref() else {
            return false;
        };
        let lowered = text.to_lowercase();
        self.text.iter().any(|pattern| pattern.is_match(&lowered))
    }
}
