//! Card attributes: gameplay numerics, resource icons and trait tokens.
//!
//! ## Types
//!
//! - `CardStats`: nullable printed numbers (character and scheme values)
//! - `ResourceIcons`: resource icons a card provides when paid with
//! - `normalize_traits`: trait line to searchable token string

use serde::{Deserialize, Serialize};

use crate::core::ResourceType;

/// Printed numeric values. `None` means "not printed on this card".
///
/// Character values (attack, thwart, defense, recover, hand size) are only
/// set on heroes, alter-egos, allies and minions. Threat is scheme-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub health: Option<i32>,
    pub attack: Option<i32>,
    pub thwart: Option<i32>,
    pub defense: Option<i32>,
    pub recover: Option<i32>,
    pub hand_size: Option<i32>,
    /// Scheme value of an enemy (minion or villain).
    pub scheme: Option<i32>,
    /// Threat on a scheme card.
    pub threat: Option<i32>,
}

/// Resource icons, one counter per resource type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIcons {
    pub physical: Option<u32>,
    pub mental: Option<u32>,
    pub energy: Option<u32>,
    pub wild: Option<u32>,
}

impl ResourceIcons {
    /// Number of icons of the given type (0 when unprinted).
    #[must_use]
    pub fn count(&self, resource: ResourceType) -> u32 {
        let icons = match resource {
            ResourceType::Physical => self.physical,
            ResourceType::Mental => self.mental,
            ResourceType::Energy => self.energy,
            ResourceType::Wild => self.wild,
        };
        icons.unwrap_or(0)
    }

    /// Set the icon count for a resource type.
    #[must_use]
    pub fn with(mut self, resource: ResourceType, count: u32) -> Self {
        let slot = match resource {
            ResourceType::Physical => &mut self.physical,
            ResourceType::Mental => &mut self.mental,
            ResourceType::Energy => &mut self.energy,
            ResourceType::Wild => &mut self.wild,
        };
        *slot = Some(count);
        self
    }
}

/// Normalize a trait line like `"Avenger. Spy."`.
///
/// Splits on `.`, lowercases and trims each piece, drops empties, wraps each
/// token in `#` and joins with `,`. Returns `None` when no token survives.
/// Matching a trait is then a substring search for `#trait#`.
#[must_use]
pub fn normalize_traits(traits: &str) -> Option<String> {
    let tokens: Vec<String> = traits
        .split('.')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{}#", t))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(","))
    }
}

/// Search token for a single trait name.
#[must_use]
pub fn trait_token(name: &str) -> String {
    format!("#{}#", name.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_count() {
        let icons = ResourceIcons::default()
            .with(ResourceType::Physical, 2)
            .with(ResourceType::Wild, 1);

        assert_eq!(icons.count(ResourceType::Physical), 2);
        assert_eq!(icons.count(ResourceType::Wild), 1);
        assert_eq!(icons.count(ResourceType::Mental), 0);
        assert_eq!(icons.count(ResourceType::Energy), 0);
    }

    #[test]
    fn test_normalize_traits() {
        assert_eq!(
            normalize_traits("Avenger. Spy."),
            Some("#avenger#,#spy#".to_string())
        );
        assert_eq!(normalize_traits("  Hero For Hire .  "), Some("#hero for hire#".to_string()));
        assert_eq!(normalize_traits(" . "), None);
    }

    #[test]
    fn test_trait_token() {
        assert_eq!(trait_token(" Avenger"), "#avenger#");
    }
}
