//! Engine inputs and the move history.
//!
//! The engine is driven by a single `Input` at a time. Each accepted
//! placement is stored as a `MoveRecord` for replay and debugging.

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::board::CellIndex;
use crate::cards::CardId;

/// An external input to the engine.
///
/// ## Example
///
/// ```
/// use grid_duel::core::Input;
/// use grid_duel::cards::CardId;
///
/// let place = Input::player_move(CardId::new(3), 5);
/// let choose = Input::battle_target(1);
/// let keep = Input::RewardChoice(None);
/// # let _ = (place, choose, keep);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Human places a card. `cell` is a raw index so out-of-range values
    /// come back as a typed rejection.
    PlayerMove { card: CardId, cell: u8 },

    /// Rival move from an external driver (replay, remote peer).
    OpponentMove { card: CardId, cell: u8 },

    /// Human picks one of several simultaneous battle candidates.
    BattleTarget { cell: u8 },

    /// Human picks a won card to keep; `None` takes the first candidate.
    RewardChoice(Option<u8>),
}

impl Input {
    /// Build a `PlayerMove`.
    #[must_use]
    pub fn player_move(card: CardId, cell: u8) -> Self {
        Input::PlayerMove { card, cell }
    }

    /// Build an `OpponentMove`.
    #[must_use]
    pub fn opponent_move(card: CardId, cell: u8) -> Self {
        Input::OpponentMove { card, cell }
    }

    /// Build a `BattleTarget`.
    #[must_use]
    pub fn battle_target(cell: u8) -> Self {
        Input::BattleTarget { cell }
    }
}

/// A recorded placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that placed the card.
    pub side: Side,

    /// The placed card.
    pub card: CardId,

    /// Where it was placed.
    pub cell: CellIndex,

    /// Turn number of the placement.
    pub turn: u32,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(side: Side, card: CardId, cell: CellIndex, turn: u32) -> Self {
        Self {
            side,
            card,
            cell,
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builders() {
        assert_eq!(
            Input::player_move(CardId::new(1), 4),
            Input::PlayerMove {
                card: CardId::new(1),
                cell: 4
            }
        );
        assert_eq!(Input::battle_target(2), Input::BattleTarget { cell: 2 });
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::new(Side::Opponent, CardId::new(7), CellIndex::new(9).unwrap(), 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
