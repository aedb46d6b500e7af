//! Card catalog lookup.
//!
//! The catalog maps a card type and level to that level's stats. The
//! engine only needs it for level-up regeneration; deck building lives
//! outside this crate.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardTypeId};
use super::stats::{CardStats, StatRatings};
use crate::core::{CatalogError, Side};

/// Source of per-level card stats.
pub trait CardCatalog {
    /// Stats for `type_id` at `level`.
    fn stats_for(&self, type_id: CardTypeId, level: u8) -> Result<CardStats, CatalogError>;

    /// Build a fresh card of `type_id` at `level`.
    fn create(&self, id: CardId, type_id: CardTypeId, level: u8, origin: Side) -> Result<Card, CatalogError> {
        let stats = self.stats_for(type_id, level)?;
        Ok(Card::from_stats(id, type_id, level, stats, origin))
    }
}

/// One catalog type with a rating row per level (index = level).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub type_id: CardTypeId,
    pub name: String,
    pub levels: Vec<StatRatings>,
}

impl CatalogEntry {
    /// Create an entry with no levels.
    pub fn new(type_id: CardTypeId, name: impl Into<String>) -> Self {
        Self {
            type_id,
            name: name.into(),
            levels: Vec::new(),
        }
    }

    /// Append the next level's ratings.
    #[must_use]
    pub fn with_level(mut self, ratings: StatRatings) -> Self {
        self.levels.push(ratings);
        self
    }
}

/// Table-backed catalog.
///
/// ## Example
///
/// ```
/// use grid_duel::board::Arrows;
/// use grid_duel::cards::{AttackType, CardCatalog, CardTypeId, CatalogEntry, StatRatings, TableCatalog};
///
/// let mut catalog = TableCatalog::new();
/// catalog.register(CatalogEntry::new(CardTypeId::new(1), "Drone").with_level(StatRatings {
///     arrows: Arrows(0b0001_0001),
///     attack_type: AttackType::Physical,
///     attack: 3,
///     mechanical: 2,
///     electrical: 1,
/// }));
///
/// let stats = catalog.stats_for(CardTypeId::new(1), 0).unwrap();
/// assert_eq!(stats.attack, 56);
/// assert!(catalog.stats_for(CardTypeId::new(1), 1).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TableCatalog {
    entries: FxHashMap<CardTypeId, CatalogEntry>,
}

impl TableCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of entries. Later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.register(entry);
        }
        catalog
    }

    /// Register an entry, returning the one it replaced.
    pub fn register(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(entry.type_id, entry)
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, type_id: CardTypeId) -> Option<&CatalogEntry> {
        self.entries.get(&type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CardCatalog for TableCatalog {
    fn stats_for(&self, type_id: CardTypeId, level: u8) -> Result<CardStats, CatalogError> {
        let entry = self
            .entries
            .get(&type_id)
            .ok_or(CatalogError::UnknownType(type_id))?;
        let ratings = entry
            .levels
            .get(usize::from(level))
            .ok_or(CatalogError::MissingLevel { type_id, level })?;

        if !ratings.in_range() {
            let rating = ratings.attack.max(ratings.mechanical).max(ratings.electrical);
            return Err(CatalogError::RatingOutOfRange { type_id, rating });
        }

        Ok(ratings.decode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Arrows;
    use crate::cards::AttackType;

    fn ratings(attack: u8) -> StatRatings {
        StatRatings {
            arrows: Arrows(0b0000_0011),
            attack_type: AttackType::Electric,
            attack,
            mechanical: 1,
            electrical: 2,
        }
    }

    fn catalog() -> TableCatalog {
        TableCatalog::from_entries([CatalogEntry::new(CardTypeId::new(7), "Sentry")
            .with_level(ratings(1))
            .with_level(ratings(4))])
    }

    #[test]
    fn test_stats_per_level() {
        let catalog = catalog();

        assert_eq!(catalog.stats_for(CardTypeId::new(7), 0).unwrap().attack, 24);
        assert_eq!(catalog.stats_for(CardTypeId::new(7), 1).unwrap().attack, 72);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_data() {
        let catalog = catalog();

        assert_eq!(
            catalog.stats_for(CardTypeId::new(8), 0),
            Err(CatalogError::UnknownType(CardTypeId::new(8)))
        );
        assert_eq!(
            catalog.stats_for(CardTypeId::new(7), 2),
            Err(CatalogError::MissingLevel {
                type_id: CardTypeId::new(7),
                level: 2
            })
        );
    }

    #[test]
    fn test_rating_out_of_range() {
        let catalog = TableCatalog::from_entries([
            CatalogEntry::new(CardTypeId::new(1), "Broken").with_level(ratings(20)),
        ]);

        assert!(matches!(
            catalog.stats_for(CardTypeId::new(1), 0),
            Err(CatalogError::RatingOutOfRange { rating: 20, .. })
        ));
    }

    #[test]
    fn test_create_card() {
        let card = catalog()
            .create(CardId::new(3), CardTypeId::new(7), 1, Side::Opponent)
            .unwrap();

        assert_eq!(card.level, 1);
        assert_eq!(card.attack, 72);
        assert_eq!(card.attack_type, AttackType::Electric);
        assert_eq!(card.origin, Side::Opponent);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = CatalogEntry::new(CardTypeId::new(2), "Walker").with_level(ratings(3));
        let json = serde_json::to_string(&entry).unwrap();
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
