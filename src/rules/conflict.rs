//! Conflict analysis for a freshly placed card.
//!
//! For each of the eight directions the placed card points at, an occupied
//! enemy neighbour is either captured outright (it has no arrow pointing
//! back) or must be battled (it does).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{CellIndex, Direction, Field};
use crate::cards::Card;

/// How a placed card relates to one neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// No interaction.
    None,
    /// Unopposed capture.
    Capture,
    /// Contested; resolved by rolls.
    Battle,
}

/// A capture or battle against one neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub direction: Direction,
    pub cell: CellIndex,
    pub kind: ConflictKind,
}

/// Conflicts of one placement in `Direction::ALL` order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictSet {
    conflicts: SmallVec<[Conflict; 8]>,
}

impl ConflictSet {
    /// All conflicts.
    #[must_use]
    pub fn as_slice(&self) -> &[Conflict] {
        &self.conflicts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Cells captured without a roll.
    pub fn captures(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.of_kind(ConflictKind::Capture)
    }

    /// Cells that must be battled.
    pub fn battles(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.of_kind(ConflictKind::Battle)
    }

    /// Battle candidates collected into a list.
    #[must_use]
    pub fn battle_cells(&self) -> SmallVec<[CellIndex; 8]> {
        self.battles().collect()
    }

    fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = CellIndex> + '_ {
        self.conflicts
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| c.cell)
    }
}

/// Classify the neighbour of `origin` in `direction` for `card` placed at `origin`.
#[must_use]
pub fn classify(field: &Field, origin: CellIndex, card: &Card, direction: Direction) -> ConflictKind {
    if !card.points(direction) {
        return ConflictKind::None;
    }
    let Some(neighbor) = origin.neighbor(direction) else {
        return ConflictKind::None;
    };
    match field.card(neighbor) {
        Some(other) if other.owner != card.owner => {
            if other.points(direction.opposite()) {
                ConflictKind::Battle
            } else {
                ConflictKind::Capture
            }
        }
        _ => ConflictKind::None,
    }
}

/// Analyze `card` as if it stood at `origin`. The field itself is not read at `origin`.
#[must_use]
pub fn analyze_card(field: &Field, origin: CellIndex, card: &Card) -> ConflictSet {
    let conflicts = Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let kind = classify(field, origin, card, direction);
            if kind == ConflictKind::None {
                return None;
            }
            origin.neighbor(direction).map(|cell| Conflict {
                direction,
                cell,
                kind,
            })
        })
        .collect();

    ConflictSet { conflicts }
}

/// Analyze the card already placed at `origin`. An empty cell has no conflicts.
#[must_use]
pub fn analyze(field: &Field, origin: CellIndex) -> ConflictSet {
    match field.card(origin) {
        Some(card) => analyze_card(field, origin, card),
        None => ConflictSet::default(),
    }
}
