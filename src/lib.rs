//! # grid-duel
//!
//! Turn engine, combat resolution and opponent AI for a two-player card
//! battle on a 4x4 grid.
//!
//! ## Rules in brief
//!
//! 1. **Placement**: each side holds five cards and places one per turn on
//!    an open cell.
//!
//! 2. **Arrows**: every card points in up to eight directions. Pointing at
//!    an enemy card that does not point back captures it outright; if it
//!    points back, the two battle with attack and defense rolls.
//!
//! 3. **Combos**: a freshly captured card captures every enemy card its own
//!    arrows reach, and so on in waves.
//!
//! ## Architecture
//!
//! - **Explicit engine**: one `Engine` value owns the field, both hands,
//!   the turn state and an injected RNG. No global state.
//!
//! - **Step function**: every input returns the typed events it caused;
//!   the caller decides what to submit next.
//!
//! - **Index arithmetic**: cards live in a fixed array of cells and
//!   neighbours are computed from indices.
//!
//! ## Modules
//!
//! - `core`: sides, RNG, configuration, inputs, errors
//! - `board`: directions, arrows, cells and the field
//! - `cards`: cards, stats and the catalog
//! - `rules`: conflicts, battles, combos, scoring
//! - `ai`: move evaluation, target and forfeit selection
//! - `events`: output events
//! - `progression`: level-ups, rewards, the player's collection
//! - `engine`: the turn state machine and snapshots

pub mod ai;
pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod events;
pub mod progression;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState, MatchRng, ScriptedRng,
    Side, SideMap,
    MatchConfig, MatchMode,
    Input, MoveRecord,
    MoveRejection, SetupError, SnapshotError, CatalogError, ConfigError,
};

pub use crate::board::{Arrows, CellIndex, CellSet, Direction, Field};

pub use crate::cards::{
    AttackType, Card, CardCatalog, CardId, CardStats, CardTypeId,
    CatalogEntry, StatRatings, TableCatalog,
};

pub use crate::rules::{BattleOutcome, ComboChain, ConflictKind, MatchResult};

pub use crate::ai::{AiConfig, HeuristicAi, MoveChoice, OpponentPolicy};

pub use crate::events::MatchEvent;

pub use crate::progression::{Collection, LevelUp, MatchOutcome};

pub use crate::engine::{Engine, MatchSnapshot, Phase, HAND_SIZE};
