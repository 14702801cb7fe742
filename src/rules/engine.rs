//! Deckbuilding rule engine.
//!
//! `DeckValidator` checks a resolved card list (one entry per copy) against
//! a hero's construction rules and reports the first broken rule.
//!
//! ## Rule order
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. aspect chosen
//! 2. hero requirements present
//! 3. copies per name within deck limit
//! 4. every card includable
//! 5. option limits and at-least counts respected
//! 6. draw deck not too small
//! 7. draw deck not too large
//!
//! ## Eligibility
//!
//! Per-card eligibility walks the hero's options in order; the first option
//! whose dimensions all match decides. Limit and at-least bookkeeping is an
//! explicit `OptionTally` threaded through a fold over the card list, so
//! `can_include` stays a pure predicate.

use rustc_hash::FxHashMap;

use super::option::RuleOption;
use super::problem::{Problem, ProblemReason};
use crate::cards::Card;
use crate::core::{DeckSizeLimits, FactionCode, TypeCode};
use crate::deck::DeckMeta;

/// Running counts for one option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionCount {
    /// Cards accepted under the option's limit.
    pub limit: u32,
    /// Matches per faction, for at-least rules.
    pub atleast: FxHashMap<FactionCode, u32>,
}

/// Per-option counts accumulated while evaluating a deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionTally {
    counts: Vec<OptionCount>,
}

impl OptionTally {
    /// Empty tally for `option_count` options.
    #[must_use]
    pub fn new(option_count: usize) -> Self {
        Self {
            counts: vec![OptionCount::default(); option_count],
        }
    }

    /// Counts for an option index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OptionCount> {
        self.counts.get(index)
    }

    /// Cards accepted under an option's limit.
    #[must_use]
    pub fn limit_count(&self, index: usize) -> u32 {
        self.counts.get(index).map_or(0, |c| c.limit)
    }

    /// Number of factions with at least `min` matches under an option.
    #[must_use]
    pub fn factions_reaching(&self, index: usize, min: u32) -> u32 {
        self.counts.get(index).map_or(0, |c| {
            c.atleast.values().filter(|&&n| n >= min).count() as u32
        })
    }

    fn record_limit(&mut self, index: usize) {
        if let Some(count) = self.counts.get_mut(index) {
            count.limit += 1;
        }
    }

    /// Count a card towards both of its factions.
    fn record_factions(&mut self, index: usize, card: &Card) {
        let Some(count) = self.counts.get_mut(index) else {
            return;
        };
        // Unaligned cards are not counted at all.
        if let Some(faction) = card.faction_code {
            *count.atleast.entry(faction).or_insert(0) += 1;
            if let Some(faction2) = card.faction2_code {
                *count.atleast.entry(faction2).or_insert(0) += 1;
            }
        }
    }
}

/// Result of evaluating every card of a deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eligibility {
    /// One verdict per input card, same order.
    pub verdicts: Vec<bool>,
    /// Option counts after the last card.
    pub tally: OptionTally,
}

impl Eligibility {
    /// Check whether every card was included.
    #[must_use]
    pub fn all_included(&self) -> bool {
        self.verdicts.iter().all(|&v| v)
    }

    /// Indices of excluded cards.
    pub fn excluded(&self) -> impl Iterator<Item = usize> + '_ {
        self.verdicts
            .iter()
            .enumerate()
            .filter_map(|(i, &included)| (!included).then_some(i))
    }
}

/// Deck rules for one hero.
///
/// Implemented by `DeckValidator`; card browsers can stay generic over it
/// when they only need the inclusion predicate.
pub trait DeckRules {
    /// Can this card be put in the deck at all?
    fn can_include(&self, card: &Card) -> bool;

    /// First broken rule for a resolved card list, `None` when legal.
    fn validate(&self, cards: &[&Card]) -> Option<Problem>;

    // === Convenience Methods ===

    /// Keep only includable cards.
    fn includable<'c>(&self, cards: impl IntoIterator<Item = &'c Card>) -> Vec<&'c Card>
    where
        Self: Sized,
    {
        cards.into_iter().filter(|c| self.can_include(c)).collect()
    }

    /// Is the resolved card list a legal deck?
    fn is_legal(&self, cards: &[&Card]) -> bool {
        self.validate(cards).is_none()
    }
}

/// Validator for one hero and deck meta.
///
/// ## Example
///
/// ```
/// use champions_deck::cards::Card;
/// use champions_deck::core::{FactionCode, TypeCode};
/// use champions_deck::deck::DeckMeta;
/// use champions_deck::rules::{DeckRules, DeckValidator, ProblemReason};
///
/// let hero = Card::new("01001a", "Hero", TypeCode::Hero).with_faction(FactionCode::Hero);
/// let validator = DeckValidator::new(&hero, &DeckMeta::default());
///
/// let problem = validator.validate(&[]).unwrap();
/// assert_eq!(problem.reason, ProblemReason::MissingAspect);
/// ```
#[derive(Clone, Debug)]
pub struct DeckValidator<'a> {
    hero: &'a Card,
    aspect: Option<FactionCode>,
    options: Vec<RuleOption>,
    limits: DeckSizeLimits,
}

impl<'a> DeckValidator<'a> {
    /// Create a validator with standard deck size limits.
    #[must_use]
    pub fn new(hero: &'a Card, meta: &DeckMeta) -> Self {
        Self {
            hero,
            aspect: meta.aspect,
            options: hero.hero_select_options(),
            limits: DeckSizeLimits::default(),
        }
    }

    /// Override the deck size limits.
    #[must_use]
    pub fn with_limits(mut self, limits: DeckSizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The hero being built around.
    #[must_use]
    pub fn hero(&self) -> &Card {
        self.hero
    }

    /// Effective options, in evaluation order.
    #[must_use]
    pub fn options(&self) -> &[RuleOption] {
        &self.options
    }

    /// Does the deck need an aspect choice?
    #[must_use]
    pub fn requires_aspect(&self) -> bool {
        self.options.iter().any(RuleOption::selects_aspect)
    }

    /// Evaluate every card, threading option counts through the list.
    #[must_use]
    pub fn evaluate(&self, cards: &[&Card]) -> Eligibility {
        let (verdicts, tally) = cards.iter().fold(
            (
                Vec::with_capacity(cards.len()),
                OptionTally::new(self.options.len()),
            ),
            |(mut verdicts, mut tally), card| {
                verdicts.push(self.admit(card, Some(&mut tally)));
                (verdicts, tally)
            },
        );
        Eligibility { verdicts, tally }
    }

    /// Decide one card. With a tally, limits are enforced and counts
    /// recorded; without one, only matching is checked.
    fn admit(&self, card: &Card, mut tally: Option<&mut OptionTally>) -> bool {
        if card.type_code == TypeCode::Hero {
            return false;
        }
        if card.faction_code == Some(FactionCode::Encounter) {
            return false;
        }
        if !card.is_allowed_for(&self.hero.code) {
            return false;
        }
        // Signature cards: only the hero's own set, and no option can
        // override that.
        if card.faction_code == Some(FactionCode::Hero) && card.card_set_code.is_some() {
            return card.card_set_code == self.hero.card_set_code;
        }

        let last = self.options.len().saturating_sub(1);
        for (index, option) in self.options.iter().enumerate() {
            if !option.matches(card, self.aspect) {
                continue;
            }
            if option.not {
                return false;
            }
            let Some(tally) = tally.as_deref_mut() else {
                return true;
            };
            if option.atleast.is_some() {
                tally.record_factions(index, card);
            }
            match option.limit.filter(|&limit| limit > 0) {
                // The final option is the catch-all: it always accepts and
                // keeps counting past its limit, which the limit rule then
                // reports. Earlier options that are full fall through.
                Some(limit) => {
                    if index == last || tally.limit_count(index) < limit {
                        tally.record_limit(index);
                        return true;
                    }
                }
                None => return true,
            }
        }
        false
    }

    fn find_problem(&self, cards: &[&Card]) -> Option<Problem> {
        if self.requires_aspect() && self.aspect.is_none() {
            return Some(Problem::new(ProblemReason::MissingAspect));
        }

        let requirements_met = self
            .hero
            .deck_requirements
            .iter()
            .all(|req| cards.iter().any(|card| req.is_satisfied_by(&card.code)));
        if !requirements_met {
            return Some(Problem::new(ProblemReason::HeroRequirements));
        }

        if has_too_many_copies(cards) {
            return Some(Problem::new(ProblemReason::TooManyCopies));
        }

        let eligibility = self.evaluate(cards);
        if !eligibility.all_included() {
            return Some(Problem::new(ProblemReason::InvalidCards));
        }

        if let Some(problem) = self.check_option_counts(&eligibility.tally) {
            return Some(problem);
        }

        let size = draw_deck(cards).count() as u32;
        if size < self.limits.min {
            return Some(Problem::new(ProblemReason::TooFewCards));
        }
        if size > self.limits.max {
            return Some(Problem::new(ProblemReason::TooManyCards));
        }
        None
    }

    fn check_option_counts(&self, tally: &OptionTally) -> Option<Problem> {
        for (index, option) in self.options.iter().enumerate() {
            let over_limit = option
                .limit
                .filter(|&limit| limit > 0)
                .is_some_and(|limit| tally.limit_count(index) > limit);
            let under_atleast = option
                .atleast
                .filter(|atleast| atleast.is_active())
                .is_some_and(|atleast| tally.factions_reaching(index, atleast.min) < atleast.factions);

            if over_limit || under_atleast {
                let mut problem = Problem::new(ProblemReason::DeckOptionsLimit);
                if let Some(error) = &option.error {
                    problem = problem.with_message(error.clone());
                }
                return Some(problem);
            }
        }
        None
    }
}

impl DeckRules for DeckValidator<'_> {
    fn can_include(&self, card: &Card) -> bool {
        self.admit(card, None)
    }

    fn validate(&self, cards: &[&Card]) -> Option<Problem> {
        let problem = self.find_problem(cards);
        match &problem {
            Some(problem) => tracing::debug!(
                hero = %self.hero.code,
                reason = %problem.reason,
                cards = cards.len(),
                "deck problem found"
            ),
            None => tracing::trace!(hero = %self.hero.code, cards = cards.len(), "deck is legal"),
        }
        problem
    }
}

/// Cards that count towards deck size: no hero/alter-ego, no double-sided.
fn draw_deck<'a, 'c>(cards: &'a [&'c Card]) -> impl Iterator<Item = &'c Card> + 'a {
    cards
        .iter()
        .copied()
        .filter(|card| !card.double_sided && !card.type_code.is_identity())
}

/// Copies are grouped by untranslated name so alternate printings share a
/// limit. The first card seen supplies the limit; no limit means zero.
fn has_too_many_copies(cards: &[&Card]) -> bool {
    let mut groups: FxHashMap<&str, (u32, u32)> = FxHashMap::default();
    for card in draw_deck(cards) {
        let entry = groups
            .entry(card.real_name.as_str())
            .or_insert((0, card.deck_limit.unwrap_or(0)));
        entry.0 += 1;
    }
    groups.values().any(|&(copies, limit)| copies > limit)
}

/// Validate with standard limits.
#[must_use]
pub fn validate_deck(hero: &Card, meta: &DeckMeta, cards: &[&Card]) -> Option<Problem> {
    DeckValidator::new(hero, meta).validate(cards)
}
