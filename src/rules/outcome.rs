//! Final score and match result.

use serde::{Deserialize, Serialize};

use crate::board::Field;
use crate::core::{Side, SideMap};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(Side),
    /// Equal scores.
    Draw,
}

impl MatchResult {
    /// Decide the result from final scores.
    #[must_use]
    pub fn from_scores(scores: &SideMap<u32>) -> Self {
        let player = scores[Side::Player];
        let opponent = scores[Side::Opponent];
        match player.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchResult::Winner(Side::Player),
            std::cmp::Ordering::Less => MatchResult::Winner(Side::Opponent),
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, MatchResult::Winner(s) if *s == side)
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchResult::Winner(s) => Some(*s),
            MatchResult::Draw => None,
        }
    }
}

/// Field cards owned by each side.
#[must_use]
pub fn scores(field: &Field) -> SideMap<u32> {
    SideMap::new(|side| field.count_owned(side))
}
