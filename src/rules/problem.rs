//! Deck problems: the outcome of a failed validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a deck is not legal, in the order the rules are checked.
///
/// Wire names match what saved decks store in their `problem` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemReason {
    /// The deck has not chosen an aspect.
    #[serde(rename = "aspect")]
    MissingAspect,
    /// A card the hero requires is missing.
    #[serde(rename = "hero")]
    HeroRequirements,
    #[serde(rename = "too_many_copies")]
    TooManyCopies,
    #[serde(rename = "invalid_cards")]
    InvalidCards,
    /// A limited or at-least option was broken.
    #[serde(rename = "deck_options_limit")]
    DeckOptionsLimit,
    #[serde(rename = "too_few_cards")]
    TooFewCards,
    #[serde(rename = "too_many_cards")]
    TooManyCards,
}

impl ProblemReason {
    /// Default user-facing explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            ProblemReason::MissingAspect => "Aspect not selected.",
            ProblemReason::HeroRequirements => "Doesn't comply with the hero requirements.",
            ProblemReason::TooManyCopies => "Too many copies of a card with the same name.",
            ProblemReason::InvalidCards => "Contains cards from wrong aspect.",
            ProblemReason::DeckOptionsLimit => "Contains too many limited cards.",
            ProblemReason::TooFewCards => "Not enough cards.",
            ProblemReason::TooManyCards => "Too many cards.",
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProblemReason::MissingAspect => "aspect",
            ProblemReason::HeroRequirements => "hero",
            ProblemReason::TooManyCopies => "too_many_copies",
            ProblemReason::InvalidCards => "invalid_cards",
            ProblemReason::DeckOptionsLimit => "deck_options_limit",
            ProblemReason::TooFewCards => "too_few_cards",
            ProblemReason::TooManyCards => "too_many_cards",
        }
    }
}

impl fmt::Display for ProblemReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed validation: the first broken rule plus any option messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub reason: ProblemReason,
    #[serde(default)]
    pub problems: Vec<String>,
}

impl Problem {
    /// A problem with no extra messages.
    #[must_use]
    pub fn new(reason: ProblemReason) -> Self {
        Self {
            reason,
            problems: Vec::new(),
        }
    }

    /// Attach a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.problems.push(message.into());
        self
    }

    /// One line for display: the first attached message, else the
    /// reason's default text.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.problems
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.reason.message())
    }
}
