//! Field geometry: directions, arrows, cells and the 4x4 field.

pub mod cell_set;
pub mod direction;
pub mod field;

pub use cell_set::CellSet;
pub use direction::{Arrows, Direction};
pub use field::{Cell, CellIndex, Field, CELL_COUNT, FIELD_WIDTH};
