//! Error types.
//!
//! Every rejection is returned before any state is touched, so a caller
//! can always retry with corrected input.

use thiserror::Error;

use super::side::Side;
use crate::board::CellIndex;
use crate::cards::{CardId, CardTypeId};

/// Why a submitted input was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("the match is already over")]
    MatchOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    WrongTurn { expected: Side, actual: Side },

    #[error("a battle target or reward choice is pending")]
    NotAwaitingMove,

    #[error("cell index {0} is outside the 4x4 field")]
    CellOutOfRange(u8),

    #[error("{0} is not available in this match")]
    CellUnavailable(CellIndex),

    #[error("{0} is already occupied")]
    CellOccupied(CellIndex),

    #[error("{0} is not in the acting side's hand")]
    UnknownCard(CardId),

    #[error("{0} has already been played")]
    CardAlreadyUsed(CardId),

    #[error("no battle target choice is pending")]
    NotAwaitingTarget,

    #[error("{0} is not one of the battle candidates")]
    InvalidTarget(CellIndex),

    #[error("no reward choice is pending")]
    NotAwaitingReward,

    #[error("{0} is not one of the reward candidates")]
    InvalidRewardChoice(CellIndex),
}

/// Invalid `StartMatch` input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{side} hand has {actual} cards, expected {expected}")]
    HandSize {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("{0} appears more than once across both hands")]
    DuplicateCard(CardId),
}

/// Snapshot encoding and restore failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("snapshots are only taken at turn boundaries")]
    NotAtTurnBoundary,

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

/// Missing or invalid catalog data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0} is not in the catalog")]
    UnknownType(CardTypeId),

    #[error("{type_id} has no stats for level {level}")]
    MissingLevel { type_id: CardTypeId, level: u8 },

    #[error("{type_id} rating {rating} is outside 0..=15")]
    RatingOutOfRange { type_id: CardTypeId, rating: u8 },
}

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = MoveRejection::WrongTurn {
            expected: Side::Opponent,
            actual: Side::Player,
        };
        assert_eq!(err.to_string(), "it is Opponent's turn, not Player's");

        let err = MoveRejection::CellOutOfRange(20);
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_setup_error_message() {
        let err = SetupError::HandSize {
            side: Side::Player,
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.to_string(), "Player hand has 4 cards, expected 5");
    }
}
