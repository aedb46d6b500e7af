//! Core engine types: sides, RNG, configuration, inputs, errors.
//!
//! These are the building blocks shared by every other module.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use action::{Input, MoveRecord};
pub use config::{MatchConfig, MatchMode};
pub use error::{CatalogError, ConfigError, MoveRejection, SetupError, SnapshotError};
pub use rng::{GameRng, GameRngState, MatchRng, ScriptedRng};
pub use side::{Side, SideMap};
