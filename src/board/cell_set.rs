//! Compact set of cells.

use serde::{Deserialize, Serialize};

use super::field::CellIndex;

/// A set of field cells stored as a 16-bit mask.
///
/// ```
/// use grid_duel::board::{CellIndex, CellSet};
///
/// let mut set = CellSet::new();
/// let five = CellIndex::new(5).unwrap();
/// assert!(set.insert(five));
/// assert!(!set.insert(five));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSet(u16);

impl CellSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a cell. Returns `false` if it was already present.
    pub fn insert(&mut self, cell: CellIndex) -> bool {
        let bit = 1u16 << cell.raw();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    #[must_use]
    pub const fn contains(self, cell: CellIndex) -> bool {
        self.0 & (1u16 << cell.raw()) != 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = CellIndex> {
        CellIndex::all().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<CellIndex> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        let mut set = Self::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}
