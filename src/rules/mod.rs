//! Placement consequences.
//!
//! - `conflict`: classify the neighbours of a placed card
//! - `battle`: settle one contested battle with two rolls
//! - `combo`: cascade captures from freshly captured cards
//! - `outcome`: final scores and the match result

pub mod battle;
pub mod combo;
pub mod conflict;
pub mod outcome;

pub use battle::{defense_value, BattleOutcome};
pub use combo::ComboChain;
pub use conflict::{Conflict, ConflictKind, ConflictSet};
pub use outcome::MatchResult;
