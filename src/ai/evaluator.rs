//! Move evaluation.
//!
//! Every (unused card, open cell) pair gets a heuristic score built from:
//! - unopposed captures plus the combo they could start
//! - contested neighbours weighted by the chance of winning the battle
//! - how exposed the card is to future placements
//! - a corner bonus and a stat bonus for multi-capture moves
//!
//! The evaluator never touches the RNG, so the same field always yields
//! the same choice.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::AiConfig;
use crate::board::{CellIndex, CellSet, Direction, Field};
use crate::cards::{Card, CardId};
use crate::core::{MatchMode, Side};
use crate::rules::conflict::{analyze_card, ConflictKind};
use crate::rules::defense_value;

/// A scored placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveChoice {
    pub card: CardId,
    pub cell: CellIndex,
    pub score: f64,
}

/// Chance that `attack` beats `defense`, estimated as `a / (a + d)`.
///
/// Both zero gives an even 0.5.
#[must_use]
pub fn win_probability(attack: u16, defense: u16) -> f64 {
    let total = f64::from(attack) + f64::from(defense);
    if total <= 0.0 {
        return 0.5;
    }
    (f64::from(attack) / total).clamp(0.0, 1.0)
}

/// Score the cards a freshly captured card at `captured` could take for
/// `side`, looking ahead up to `config.combo_depth` cascade levels.
///
/// Cells in `visited` are skipped and every counted cell is added to it.
pub fn combo_potential(
    field: &Field,
    captured: CellIndex,
    side: Side,
    visited: &mut CellSet,
    config: &AiConfig,
) -> f64 {
    combo_level(field, captured, side, visited, config, 1)
}

fn combo_level(
    field: &Field,
    captured: CellIndex,
    side: Side,
    visited: &mut CellSet,
    config: &AiConfig,
    depth: u32,
) -> f64 {
    if depth > config.combo_depth {
        return 0.0;
    }
    let Some(card) = field.card(captured) else {
        return 0.0;
    };

    let mut value = 0.0;
    for direction in card.arrows.iter() {
        let Some(next) = captured.neighbor(direction) else {
            continue;
        };
        if visited.contains(next) || field.owner_at(next) != Some(side.other()) {
            continue;
        }
        visited.insert(next);
        value += config.combo_weight(depth);
        value += combo_level(field, next, side, visited, config, depth + 1);
    }
    value
}

/// Score placing `card` (owned by `card.owner`) at the open cell `cell`.
#[must_use]
pub fn evaluate_move(field: &Field, card: &Card, cell: CellIndex, mode: MatchMode, config: &AiConfig) -> f64 {
    let side = card.owner;
    let mut score = 0.0;
    let mut captures = 0u32;

    let conflicts = analyze_card(field, cell, card);
    // Shared across conflicts so a cell two cascades reach counts once.
    let mut visited: CellSet = std::iter::once(cell)
        .chain(conflicts.as_slice().iter().map(|c| c.cell))
        .collect();

    for conflict in conflicts.as_slice() {
        let Some(defender) = field.card(conflict.cell) else {
            continue;
        };

        match conflict.kind {
            ConflictKind::Capture => {
                captures += 1;
                score += config.capture_score;
                if mode.instant_captures_seed_combos() {
                    score += combo_potential(field, conflict.cell, side, &mut visited, config);
                }
            }
            ConflictKind::Battle => {
                let p = win_probability(card.attack, defense_value(card, defender));
                score += p * config.battle_score;
                if p < config.long_shot_threshold {
                    score -= config.long_shot_penalty;
                }
                if p >= config.combo_threshold {
                    captures += 1;
                    score += p * combo_potential(field, conflict.cell, side, &mut visited, config);
                }
            }
            ConflictKind::None => {}
        }
    }

    score += safety(field, card, cell, config);

    let onto_field = card.arrows.iter().filter(|&d| cell.neighbor(d).is_some()).count();
    if cell.is_corner() && onto_field >= config.corner_min_arrows as usize {
        score += config.corner_bonus;
    }

    if captures >= config.multi_capture_min {
        score += f64::from(card.stats().total()) * config.stat_bonus_factor;
    }

    score
}

/// Exposure adjustment over all eight directions.
fn safety(field: &Field, card: &Card, cell: CellIndex, config: &AiConfig) -> f64 {
    Direction::ALL
        .into_iter()
        .map(|direction| match cell.neighbor(direction) {
            Some(n) if field.is_open(n) => {
                if card.points(direction) {
                    config.guarded_bonus
                } else {
                    -config.exposed_penalty
                }
            }
            _ => config.covered_bonus,
        })
        .sum()
}

/// Pick the best placement for a hand.
///
/// Cells are scanned in ascending order and, for each cell, unused cards
/// in hand order. Only a strictly higher score replaces the current best,
/// so ties keep the first pair found. Returns `None` when no unused card
/// or no open cell exists.
#[must_use]
pub fn best_move(field: &Field, hand: &[Card], mode: MatchMode, config: &AiConfig) -> Option<MoveChoice> {
    let mut best: Option<MoveChoice> = None;

    for cell in field.open_cells() {
        for card in hand.iter().filter(|c| !c.used) {
            let score = evaluate_move(field, card, cell, mode, config);
            trace!(card = %card.id, %cell, score, "scored placement");

            if best.map_or(true, |b| score > b.score) {
                best = Some(MoveChoice {
                    card: card.id,
                    cell,
                    score,
                });
            }
        }
    }

    best
}
