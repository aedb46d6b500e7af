//! Match events.
//!
//! Every step of the engine returns the events it produced, in order.
//! Presentation and persistence layers consume them; nothing inside the
//! engine reads them back.

use serde::{Deserialize, Serialize};

use crate::board::CellIndex;
use crate::cards::CardId;
use crate::core::{MatchMode, Side};
use crate::progression::LevelUp;
use crate::rules::{BattleOutcome, MatchResult};

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// The coin flip decided who opens.
    MatchStarted { mode: MatchMode, first: Side },

    /// A side may now place a card.
    TurnStarted { side: Side, turn_number: u32 },

    /// A side had no cards left and was passed over.
    TurnSkipped { side: Side },

    /// A card went onto the field.
    CardPlaced { side: Side, card: CardId, cell: CellIndex },

    /// Several battles are possible; the acting side must pick one.
    BattleCandidates {
        attacker_cell: CellIndex,
        candidates: Vec<CellIndex>,
    },

    /// A battle was rolled.
    BattleResolved {
        attacker_cell: CellIndex,
        defender_cell: CellIndex,
        attack_roll: u32,
        defense_roll: u32,
        winner: Side,
    },

    /// Cards changed hands.
    OwnershipChanged { changes: Vec<(CellIndex, Side)> },

    /// A combo wave captured further cards.
    ComboTriggered { captured: Vec<CellIndex> },

    /// No more moves are possible.
    MatchEnded {
        result: MatchResult,
        player_score: u32,
        opponent_score: u32,
    },

    /// Player cards that gained a level.
    CardsLeveledUp { level_ups: Vec<LevelUp> },

    /// Cards the player may pick as a prize.
    RewardCandidates { cells: Vec<CellIndex> },

    /// A card changed collection for good.
    RewardApplied { card: CardId, recipient: Side },
}

impl MatchEvent {
    /// Build a `BattleResolved` event from an outcome.
    #[must_use]
    pub fn battle(outcome: &BattleOutcome) -> Self {
        MatchEvent::BattleResolved {
            attacker_cell: outcome.attacker_cell,
            defender_cell: outcome.defender_cell,
            attack_roll: outcome.attack_roll,
            defense_roll: outcome.defense_roll,
            winner: outcome.winner,
        }
    }

    /// Build an `OwnershipChanged` event giving every cell to `side`.
    #[must_use]
    pub fn ownership(cells: impl IntoIterator<Item = CellIndex>, side: Side) -> Self {
        MatchEvent::OwnershipChanged {
            changes: cells.into_iter().map(|c| (c, side)).collect(),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::MatchStarted { .. } => "MatchStarted",
            MatchEvent::TurnStarted { .. } => "TurnStarted",
            MatchEvent::TurnSkipped { .. } => "TurnSkipped",
            MatchEvent::CardPlaced { .. } => "CardPlaced",
            MatchEvent::BattleCandidates { .. } => "BattleCandidates",
            MatchEvent::BattleResolved { .. } => "BattleResolved",
            MatchEvent::OwnershipChanged { .. } => "OwnershipChanged",
            MatchEvent::ComboTriggered { .. } => "ComboTriggered",
            MatchEvent::MatchEnded { .. } => "MatchEnded",
            MatchEvent::CardsLeveledUp { .. } => "CardsLeveledUp",
            MatchEvent::RewardCandidates { .. } => "RewardCandidates",
            MatchEvent::RewardApplied { .. } => "RewardApplied",
        }
    }
}
