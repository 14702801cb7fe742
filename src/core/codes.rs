//! Game vocabulary: card codes, factions, card types and resources.
//!
//! Every value here is a closed set taken from the card database. The wire
//! names (snake_case strings) are what the catalog JSON and saved decks use.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier of a printed card (e.g. `"01001a"`).
///
/// Codes are opaque strings; the engine only compares them for equality
/// and uses them as map keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCode(pub String);

impl CardCode {
    /// Create a new card code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CardCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Returned when a wire string names no known variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown code '{}'", self.0)
    }
}

impl std::error::Error for UnknownCode {}

/// Faction (aspect) affiliation of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionCode {
    /// Signature cards belonging to one hero.
    Hero,
    Aggression,
    Justice,
    Leadership,
    Protection,
    /// Neutral cards any hero may play.
    Basic,
    /// Scenario content, never legal in a player deck.
    Encounter,
}

/// Factions tracked in deck statistics, in display order.
pub const PLAYER_FACTIONS: [FactionCode; 6] = [
    FactionCode::Hero,
    FactionCode::Aggression,
    FactionCode::Justice,
    FactionCode::Leadership,
    FactionCode::Protection,
    FactionCode::Basic,
];

/// Aspects a hero chooses between. The first entry is the fallback
/// selection when a deck has not picked one yet.
pub const ASPECT_FACTIONS: [FactionCode; 4] = [
    FactionCode::Leadership,
    FactionCode::Justice,
    FactionCode::Aggression,
    FactionCode::Protection,
];

impl FactionCode {
    /// Wire name of the faction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FactionCode::Hero => "hero",
            FactionCode::Aggression => "aggression",
            FactionCode::Justice => "justice",
            FactionCode::Leadership => "leadership",
            FactionCode::Protection => "protection",
            FactionCode::Basic => "basic",
            FactionCode::Encounter => "encounter",
        }
    }
}

impl fmt::Display for FactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactionCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(FactionCode::Hero),
            "aggression" => Ok(FactionCode::Aggression),
            "justice" => Ok(FactionCode::Justice),
            "leadership" => Ok(FactionCode::Leadership),
            "protection" => Ok(FactionCode::Protection),
            "basic" => Ok(FactionCode::Basic),
            "encounter" => Ok(FactionCode::Encounter),
            other => Err(UnknownCode(other.to_string())),
        }
    }
}

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCode {
    Hero,
    AlterEgo,
    Ally,
    Event,
    Resource,
    Support,
    Upgrade,
    Obligation,
    Villain,
    MainScheme,
    SideScheme,
    Minion,
    Treachery,
    Attachment,
}

impl TypeCode {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeCode::Hero => "hero",
            TypeCode::AlterEgo => "alter_ego",
            TypeCode::Ally => "ally",
            TypeCode::Event => "event",
            TypeCode::Resource => "resource",
            TypeCode::Support => "support",
            TypeCode::Upgrade => "upgrade",
            TypeCode::Obligation => "obligation",
            TypeCode::Villain => "villain",
            TypeCode::MainScheme => "main_scheme",
            TypeCode::SideScheme => "side_scheme",
            TypeCode::Minion => "minion",
            TypeCode::Treachery => "treachery",
            TypeCode::Attachment => "attachment",
        }
    }

    /// Hero and alter-ego are the two faces of the primary character.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, TypeCode::Hero | TypeCode::AlterEgo)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(TypeCode::Hero),
            "alter_ego" => Ok(TypeCode::AlterEgo),
            "ally" => Ok(TypeCode::Ally),
            "event" => Ok(TypeCode::Event),
            "resource" => Ok(TypeCode::Resource),
            "support" => Ok(TypeCode::Support),
            "upgrade" => Ok(TypeCode::Upgrade),
            "obligation" => Ok(TypeCode::Obligation),
            "villain" => Ok(TypeCode::Villain),
            "main_scheme" => Ok(TypeCode::MainScheme),
            "side_scheme" => Ok(TypeCode::SideScheme),
            "minion" => Ok(TypeCode::Minion),
            "treachery" => Ok(TypeCode::Treachery),
            "attachment" => Ok(TypeCode::Attachment),
            other => Err(UnknownCode(other.to_string())),
        }
    }
}

/// Weakness markers. Any card carrying one is a special card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtypeCode {
    #[serde(rename = "weakness")]
    Weakness,
    #[serde(rename = "basicweakness")]
    BasicWeakness,
}

impl FromStr for SubtypeCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weakness" => Ok(SubtypeCode::Weakness),
            "basicweakness" => Ok(SubtypeCode::BasicWeakness),
            other => Err(UnknownCode(other.to_string())),
        }
    }
}

/// Resource icon printed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Physical,
    Mental,
    Energy,
    Wild,
}

/// All resource types, basic ones first.
pub const RESOURCES: [ResourceType; 4] = [
    ResourceType::Physical,
    ResourceType::Mental,
    ResourceType::Energy,
    ResourceType::Wild,
];
