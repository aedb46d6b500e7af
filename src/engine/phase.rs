//! Where the engine is waiting.

use smallvec::SmallVec;

use crate::board::CellIndex;
use crate::core::Side;

/// The engine's suspension point.
///
/// ```text
/// AwaitingMove ──place──► (several battles?) ──► AwaitingTarget ──choose──┐
///      ▲                          │ no                                     │
///      └──────── next turn ◄──────┴──── resolve ◄──────────────────────────┘
///                                          │ match over
///                                          ▼
///                              AwaitingReward (player won) ──► Done
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `side` must place a card.
    AwaitingMove(Side),

    /// The card `side` placed at `attacker` has several battle candidates.
    /// `captures` holds the instant captures of the same placement, applied
    /// once the battle is settled.
    AwaitingTarget {
        side: Side,
        attacker: CellIndex,
        candidates: SmallVec<[CellIndex; 8]>,
        captures: SmallVec<[CellIndex; 8]>,
    },

    /// The player won and picks one of these cells' cards.
    AwaitingReward { candidates: Vec<CellIndex> },

    /// Nothing left to do.
    Done,
}

impl Phase {
    /// The side expected to act, if any.
    #[must_use]
    pub fn actor(&self) -> Option<Side> {
        match self {
            Phase::AwaitingMove(side) | Phase::AwaitingTarget { side, .. } => Some(*side),
            Phase::AwaitingReward { .. } => Some(Side::Player),
            Phase::Done => None,
        }
    }

    /// Is the engine between turns (safe to snapshot)?
    #[must_use]
    pub fn is_turn_boundary(&self) -> bool {
        matches!(self, Phase::AwaitingMove(_))
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Phase::Done)
    }
}
