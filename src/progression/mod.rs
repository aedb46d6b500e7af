//! What a finished match changes outside the match.
//!
//! - `leveling`: random level-ups with catalog stat regeneration
//! - `reward`: cards the winner may take
//! - `collection`: the player's persistent cards and `MatchOutcome`

pub mod collection;
pub mod leveling;
pub mod reward;

pub use collection::{Collection, MatchOutcome};
pub use leveling::{apply_level_up, is_eligible, roll_level_ups, LevelUp};
pub use reward::{captured_cells, forfeit_candidates, reward_candidates};
