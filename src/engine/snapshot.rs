//! Turn-boundary snapshots.
//!
//! A snapshot is taken only while the engine waits for a placement, so a
//! resumed match always restarts at move intake for the stored side.
//! Bytes are `bincode`; the RNG stream is persisted separately by the host
//! (see `GameRngState`).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::controller::HAND_SIZE;
use crate::board::Field;
use crate::cards::Card;
use crate::core::{MatchMode, Side, SnapshotError};

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable match state at a turn boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub version: u32,
    pub mode: MatchMode,
    pub current_turn: Side,
    pub turn_number: u32,
    /// Unplaced player cards.
    pub player_hand: Vec<Card>,
    /// Unplaced opponent cards.
    pub opponent_hand: Vec<Card>,
    /// Availability mask and placed cards.
    pub field: Field,
}

impl MatchSnapshot {
    /// Encode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the version and that the cards add up to two full hands.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }

        let placed = self.field.card_count();
        let total = placed + self.player_hand.len() + self.opponent_hand.len();
        if total != HAND_SIZE * 2 {
            return Err(SnapshotError::Inconsistent(format!(
                "{total} cards in play, expected {}",
                HAND_SIZE * 2
            )));
        }

        for (side, hand) in [(Side::Player, &self.player_hand), (Side::Opponent, &self.opponent_hand)] {
            if let Some(card) = hand.iter().find(|c| c.used || c.origin != side) {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} in {side} hand is already played or belongs elsewhere",
                    card.id
                )));
            }
        }

        let mut seen = FxHashSet::default();
        let all = self
            .player_hand
            .iter()
            .chain(&self.opponent_hand)
            .chain(self.field.occupied().map(|(_, c)| c));
        for card in all {
            if !seen.insert(card.id) {
                return Err(SnapshotError::Inconsistent(format!("{} appears twice", card.id)));
            }
        }

        let stuck = (self.player_hand.is_empty() && self.opponent_hand.is_empty()) || !self.field.has_open_cell();
        if stuck {
            return Err(SnapshotError::Inconsistent("the match is already over".into()));
        }
        if self.hand(self.current_turn).is_empty() {
            return Err(SnapshotError::Inconsistent(format!("{} has no card to play", self.current_turn)));
        }
        Ok(())
    }

    /// Unplaced cards of `side`.
    #[must_use]
    pub fn hand(&self, side: Side) -> &[Card] {
        match side {
            Side::Player => &self.player_hand,
            Side::Opponent => &self.opponent_hand,
        }
    }
}
