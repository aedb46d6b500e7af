//! Compass directions and the per-card arrow mask.

use serde::{Deserialize, Serialize};

/// One of the eight compass directions, clockwise from `Top`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl Direction {
    /// All directions in iteration order.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];

    /// Position in `ALL`, also the bit used in `Arrows`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// Row and column step.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::Top => (-1, 0),
            Direction::TopRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (1, 0),
            Direction::BottomLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::TopLeft => (-1, -1),
        }
    }
}

/// Eight arrow flags packed into a byte, one bit per `Direction`.
///
/// ```
/// use grid_duel::board::{Arrows, Direction};
///
/// let arrows = Arrows::from_directions(&[Direction::Top, Direction::Left]);
/// assert!(arrows.has(Direction::Top));
/// assert!(!arrows.has(Direction::Bottom));
/// assert_eq!(arrows.count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrows(pub u8);

impl Arrows {
    /// No arrows.
    pub const NONE: Arrows = Arrows(0);
    /// All eight arrows.
    pub const ALL: Arrows = Arrows(0xFF);

    /// Build a mask from a list of directions.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions.iter().fold(Self::NONE, |acc, &d| acc.with(d))
    }

    /// Build a mask from eight flags in `Direction::ALL` order.
    #[must_use]
    pub fn from_flags(flags: [bool; 8]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        Self(bits)
    }

    /// The eight flags in `Direction::ALL` order.
    #[must_use]
    pub fn flags(self) -> [bool; 8] {
        let mut flags = [false; 8];
        for d in Direction::ALL {
            flags[d.index()] = self.has(d);
        }
        flags
    }

    /// Is the arrow for `direction` set?
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    /// Copy with the arrow for `direction` set.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | (1 << direction.index()))
    }

    /// Number of arrows set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the set directions in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.has(d))
    }
}
