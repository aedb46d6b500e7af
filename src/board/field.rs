//! The 4x4 field.
//!
//! The field is a fixed array of cells addressed by `CellIndex`
//! (row = idx / 4, col = idx % 4). Cards live inside their cell, so
//! neighbour lookups are pure index arithmetic with no wraparound.
//! Cell availability is fixed when the field is built.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::cards::Card;
use crate::core::{MoveRejection, Side};

/// Cells per row and per column.
pub const FIELD_WIDTH: u8 = 4;

/// Total number of cells.
pub const CELL_COUNT: usize = 16;

/// Index of a cell, always in `0..16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellIndex(u8);

impl CellIndex {
    /// Validate a raw index.
    ///
    /// ```
    /// use grid_duel::board::CellIndex;
    ///
    /// assert!(CellIndex::new(15).is_some());
    /// assert!(CellIndex::new(16).is_none());
    /// ```
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if (raw as usize) < CELL_COUNT {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Validate a raw index, returning a typed rejection when out of range.
    pub fn parse(raw: u8) -> Result<Self, MoveRejection> {
        Self::new(raw).ok_or(MoveRejection::CellOutOfRange(raw))
    }

    /// All cells in ascending order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8).map(CellIndex)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / FIELD_WIDTH
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % FIELD_WIDTH
    }

    /// Is this one of the four corner cells?
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self.0, 0 | 3 | 12 | 15)
    }

    /// The neighbouring cell in `direction`, if it is on the field.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellIndex> {
        let (dr, dc) = direction.offset();
        let row = i16::from(self.row()) + i16::from(dr);
        let col = i16::from(self.col()) + i16::from(dc);
        let width = i16::from(FIELD_WIDTH);

        if (0..width).contains(&row) && (0..width).contains(&col) {
            // In range by the check above.
            Some(CellIndex((row * width + col) as u8))
        } else {
            None
        }
    }

    /// Every on-field neighbour with the direction leading to it.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, CellIndex)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|n| (d, n)))
    }
}

impl TryFrom<u8> for CellIndex {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("cell index {raw} is outside 0..{CELL_COUNT}"))
    }
}

impl From<CellIndex> for u8 {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// One slot of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    /// Fixed for the whole match.
    pub available: bool,
    pub card: Option<Card>,
}

impl Cell {
    /// Available and empty.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.available && self.card.is_none()
    }
}

/// The 4x4 playing field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldCells")]
pub struct Field {
    cells: [Cell; CELL_COUNT],
}

/// Wire form of `Field`, checked on the way in.
#[derive(Deserialize)]
struct FieldCells {
    cells: [Cell; CELL_COUNT],
}

impl TryFrom<FieldCells> for Field {
    type Error = String;

    fn try_from(raw: FieldCells) -> Result<Self, Self::Error> {
        for (position, cell) in raw.cells.iter().enumerate() {
            if cell.index.index() != position {
                return Err(format!("cell at position {position} claims index {}", cell.index));
            }
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::open()
    }
}

impl Field {
    /// Build an empty field with the given availability mask.
    #[must_use]
    pub fn new(availability: [bool; CELL_COUNT]) -> Self {
        let mut cells = [Cell {
            index: CellIndex(0),
            available: true,
            card: None,
        }; CELL_COUNT];

        for (i, cell) in cells.iter_mut().enumerate() {
            cell.index = CellIndex(i as u8);
            cell.available = availability[i];
        }

        Self { cells }
    }

    /// An empty field with every cell available.
    #[must_use]
    pub fn open() -> Self {
        Self::new([true; CELL_COUNT])
    }

    #[must_use]
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.index()]
    }

    /// All cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The availability mask the field was built with.
    #[must_use]
    pub fn availability(&self) -> [bool; CELL_COUNT] {
        let mut mask = [false; CELL_COUNT];
        for (slot, cell) in mask.iter_mut().zip(&self.cells) {
            *slot = cell.available;
        }
        mask
    }

    #[must_use]
    pub fn card(&self, index: CellIndex) -> Option<&Card> {
        self.cells[index.index()].card.as_ref()
    }

    pub fn card_mut(&mut self, index: CellIndex) -> Option<&mut Card> {
        self.cells[index.index()].card.as_mut()
    }

    /// Owner of the card at `index`, if any.
    #[must_use]
    pub fn owner_at(&self, index: CellIndex) -> Option<Side> {
        self.card(index).map(|c| c.owner)
    }

    #[must_use]
    pub fn is_open(&self, index: CellIndex) -> bool {
        self.cells[index.index()].is_open()
    }

    /// Available empty cells in ascending order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().filter(|c| c.is_open()).map(|c| c.index)
    }

    #[must_use]
    pub fn has_open_cell(&self) -> bool {
        self.cells.iter().any(Cell::is_open)
    }

    /// Occupied cells in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellIndex, &Card)> + '_ {
        self.cells
            .iter()
            .filter_map(|c| c.card.as_ref().map(|card| (c.index, card)))
    }

    /// Number of cards on the field.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|c| c.card.is_some()).count()
    }

    /// Number of field cards owned by `side`.
    #[must_use]
    pub fn count_owned(&self, side: Side) -> u32 {
        self.occupied().filter(|(_, c)| c.owner == side).count() as u32
    }

    /// Check that a card may go to `index` without changing anything.
    pub fn check_placement(&self, index: CellIndex) -> Result<(), MoveRejection> {
        let cell = &self.cells[index.index()];
        if !cell.available {
            return Err(MoveRejection::CellUnavailable(index));
        }
        if cell.card.is_some() {
            return Err(MoveRejection::CellOccupied(index));
        }
        Ok(())
    }

    /// Put a card on the field, marking it used and out of hand.
    pub fn place(&mut self, index: CellIndex, mut card: Card) -> Result<(), MoveRejection> {
        self.check_placement(index)?;
        card.used = true;
        card.in_hand = false;
        self.cells[index.index()].card = Some(card);
        Ok(())
    }

    /// Hand the card at `index` to `side`.
    ///
    /// Returns the previous owner, or `None` if the cell is empty.
    pub fn set_owner(&mut self, index: CellIndex, side: Side) -> Option<Side> {
        let card = self.card_mut(index)?;
        let previous = card.owner;
        card.owner = side;
        Some(previous)
    }
}
