//! Opponent policies.
//!
//! The engine asks a policy for three decisions:
//! - `choose_move`: which card to place where
//! - `choose_target`: which battle to fight when several are possible
//! - `choose_forfeit`: which card to hand over after a loss

use super::config::AiConfig;
use super::evaluator::{best_move, MoveChoice};
use super::target::{select_forfeit, select_target};
use crate::board::{CellIndex, Field};
use crate::cards::{Card, CardId};
use crate::core::MatchMode;

/// Decision maker for the computer-controlled side.
pub trait OpponentPolicy: Send + Sync {
    /// Pick a placement from `hand`. `None` when nothing can be placed.
    fn choose_move(&self, field: &Field, hand: &[Card], mode: MatchMode) -> Option<MoveChoice>;

    /// Pick one of `candidates` for the card at `attacker_cell`.
    fn choose_target(&self, field: &Field, attacker_cell: CellIndex, candidates: &[CellIndex]) -> Option<CellIndex>;

    /// Pick the card to forfeit from `cards`.
    fn choose_forfeit(&self, cards: &[Card]) -> Option<CardId>;
}

/// Deterministic heuristic opponent.
#[derive(Clone, Debug, Default)]
pub struct HeuristicAi {
    pub config: AiConfig,
}

impl HeuristicAi {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl OpponentPolicy for HeuristicAi {
    fn choose_move(&self, field: &Field, hand: &[Card], mode: MatchMode) -> Option<MoveChoice> {
        best_move(field, hand, mode, &self.config)
    }

    fn choose_target(&self, field: &Field, attacker_cell: CellIndex, candidates: &[CellIndex]) -> Option<CellIndex> {
        select_target(field, attacker_cell, candidates, &self.config)
    }

    fn choose_forfeit(&self, cards: &[Card]) -> Option<CardId> {
        select_forfeit(cards, &self.config)
    }
}

/// Always takes the first legal option. Useful as a baseline.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl OpponentPolicy for FirstLegal {
    fn choose_move(&self, field: &Field, hand: &[Card], _mode: MatchMode) -> Option<MoveChoice> {
        let cell = field.open_cells().next()?;
        let card = hand.iter().find(|c| !c.used)?;
        Some(MoveChoice {
            card: card.id,
            cell,
            score: 0.0,
        })
    }

    fn choose_target(&self, _field: &Field, _attacker_cell: CellIndex, candidates: &[CellIndex]) -> Option<CellIndex> {
        candidates.first().copied()
    }

    fn choose_forfeit(&self, cards: &[Card]) -> Option<CardId> {
        cards.first().map(|c| c.id)
    }
}
