//! Heuristic opponent.
//!
//! - `evaluator`: score every placement and pick the best
//! - `target`: pick a battle target or a card to forfeit
//! - `policy`: the `OpponentPolicy` seam the engine calls through
//!
//! All choices are deterministic for a given field and hand.

pub mod config;
pub mod evaluator;
pub mod policy;
pub mod target;

pub use config::AiConfig;
pub use evaluator::{best_move, combo_potential, evaluate_move, win_probability, MoveChoice};
pub use policy::{FirstLegal, HeuristicAi, OpponentPolicy};
pub use target::{score_target, select_forfeit, select_target};
