//! Reward and forfeit candidates.

use crate::board::{CellIndex, Field};
use crate::cards::Card;
use crate::core::Side;

/// Cells holding cards the `winner` took from the other side.
///
/// The winner may keep one of these. Cells are in ascending order.
#[must_use]
pub fn captured_cells(field: &Field, winner: Side) -> Vec<CellIndex> {
    field
        .occupied()
        .filter(|(_, card)| card.origin == winner.other() && card.owner == winner)
        .map(|(cell, _)| cell)
        .collect()
}

/// Opponent cards that ended the match under player ownership.
#[must_use]
pub fn reward_candidates(field: &Field) -> Vec<CellIndex> {
    captured_cells(field, Side::Player)
}

/// Player cards that ended the match under opponent ownership.
#[must_use]
pub fn forfeit_candidates(field: &Field) -> Vec<Card> {
    captured_cells(field, Side::Opponent)
        .into_iter()
        .filter_map(|cell| field.card(cell).copied())
        .collect()
}
