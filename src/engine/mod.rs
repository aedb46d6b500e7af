//! Match orchestration.
//!
//! - `controller`: the `Engine` state machine
//! - `phase`: where the engine is waiting
//! - `snapshot`: turn-boundary save and resume

pub mod controller;
pub mod phase;
pub mod snapshot;

pub use controller::{Engine, HAND_SIZE};
pub use phase::Phase;
pub use snapshot::{MatchSnapshot, SNAPSHOT_VERSION};
