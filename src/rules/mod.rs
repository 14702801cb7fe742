//! Deckbuilding rules.
//!
//! Heroes describe their construction rules as an ordered list of
//! `RuleOption`s. `DeckValidator` walks those options for every card and
//! reports the first broken rule as a `Problem`.
//!
//! The validator never reads card data beyond what `Card` exposes, so the
//! same rules apply whether cards came from the bundled database or were
//! built by hand.

pub mod engine;
pub mod option;
pub mod problem;

pub use engine::{validate_deck, DeckRules, DeckValidator, Eligibility, OptionCount, OptionTally};
pub use option::{AtLeast, RuleOption, TextPattern};
pub use problem::{Problem, ProblemReason};
