//! Card system: match cards, stat ratings and the catalog.
//!
//! ## Key Types
//!
//! - `Card`: a physical card with identity, stats and match flags
//! - `CardStats` / `StatRatings`: decoded stats and their catalog nibbles
//! - `CardCatalog`: per-level stat lookup used by progression
//! - `TableCatalog`: table-backed catalog

pub mod card;
pub mod catalog;
pub mod stats;

pub use card::{Card, CardId, CardTypeId};
pub use catalog::{CardCatalog, CatalogEntry, TableCatalog};
pub use stats::{AttackType, CardStats, StatRatings};
