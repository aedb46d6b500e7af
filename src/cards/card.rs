//! Match cards.
//!
//! A `Card` carries its catalog identity, the level-dependent stats and the
//! per-match flags. Identity never changes; `owner` and `used` change during
//! a match, level and stats only during progression.

use serde::{Deserialize, Serialize};

use super::stats::{rating_of, AttackType, CardStats};
use crate::board::{Arrows, Direction};
use crate::core::Side;

/// Unique identifier of a physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Catalog entry a card was generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardTypeId(pub u32);

impl CardTypeId {
    /// Create a new type ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardType({})", self.0)
    }
}

/// A card taking part in a match.
///
/// ## Example
///
/// ```
/// use grid_duel::board::{Arrows, Direction};
/// use grid_duel::cards::{AttackType, Card, CardId, CardTypeId};
/// use grid_duel::core::Side;
///
/// let card = Card::new(CardId::new(1), CardTypeId::new(4), Side::Player)
///     .with_arrows(Arrows::from_directions(&[Direction::Top]))
///     .with_attack(5, AttackType::Physical)
///     .with_defense(4, 2);
///
/// assert!(card.arrows.has(Direction::Top));
/// assert_eq!(card.owner, Side::Player);
/// assert!(card.in_hand && !card.used);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub type_id: CardTypeId,
    pub arrows: Arrows,
    /// 0 up to the configured max level.
    pub level: u8,
    pub attack: u16,
    pub attack_type: AttackType,
    pub mechanical_defense: u16,
    pub electrical_defense: u16,
    /// Side currently controlling the card.
    pub owner: Side,
    /// Side whose hand the card started the match in.
    pub origin: Side,
    /// Placed on the field this match.
    pub used: bool,
    /// Still waiting in a hand.
    pub in_hand: bool,
}

impl Card {
    /// Create a level-0 card with no arrows and zero stats, in `origin`'s hand.
    #[must_use]
    pub fn new(id: CardId, type_id: CardTypeId, origin: Side) -> Self {
        Self {
            id,
            type_id,
            arrows: Arrows::NONE,
            level: 0,
            attack: 0,
            attack_type: AttackType::Physical,
            mechanical_defense: 0,
            electrical_defense: 0,
            owner: origin,
            origin,
            used: false,
            in_hand: true,
        }
    }

    /// Create a card from catalog stats.
    #[must_use]
    pub fn from_stats(id: CardId, type_id: CardTypeId, level: u8, stats: CardStats, origin: Side) -> Self {
        let mut card = Self::new(id, type_id, origin);
        card.level = level;
        card.apply_stats(stats);
        card
    }

    /// Set the arrows.
    #[must_use]
    pub fn with_arrows(mut self, arrows: Arrows) -> Self {
        self.arrows = arrows;
        self
    }

    /// Set attack value and type.
    #[must_use]
    pub fn with_attack(mut self, attack: u16, attack_type: AttackType) -> Self {
        self.attack = attack;
        self.attack_type = attack_type;
        self
    }

    /// Set mechanical and electrical defense.
    #[must_use]
    pub fn with_defense(mut self, mechanical: u16, electrical: u16) -> Self {
        self.mechanical_defense = mechanical;
        self.electrical_defense = electrical;
        self
    }

    /// Set the level.
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// The level-dependent part of the card.
    #[must_use]
    pub fn stats(&self) -> CardStats {
        CardStats {
            arrows: self.arrows,
            attack: self.attack,
            attack_type: self.attack_type,
            mechanical_defense: self.mechanical_defense,
            electrical_defense: self.electrical_defense,
        }
    }

    /// Overwrite the level-dependent part of the card.
    pub fn apply_stats(&mut self, stats: CardStats) {
        self.arrows = stats.arrows;
        self.attack = stats.attack;
        self.attack_type = stats.attack_type;
        self.mechanical_defense = stats.mechanical_defense;
        self.electrical_defense = stats.electrical_defense;
    }

    /// Does the card have an arrow toward `direction`?
    #[must_use]
    pub fn points(&self, direction: Direction) -> bool {
        self.arrows.has(direction)
    }

    /// Defense this card rolls when attacked with `attack_type`.
    ///
    /// - Physical: mechanical defense
    /// - Electric: electrical defense
    /// - Flexible: the lower of both defenses
    /// - Assault: the lowest of both defenses and this card's attack
    #[must_use]
    pub fn defense_against(&self, attack_type: AttackType) -> u16 {
        match attack_type {
            AttackType::Physical => self.mechanical_defense,
            AttackType::Electric => self.electrical_defense,
            AttackType::Flexible => self.mechanical_defense.min(self.electrical_defense),
            AttackType::Assault => self
                .mechanical_defense
                .min(self.electrical_defense)
                .min(self.attack),
        }
    }

    /// Short label such as `5P3A`: attack rating, attack type letter,
    /// mechanical rating, electrical rating (hex digits).
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{:X}{}{:X}{:X}",
            rating_of(self.attack),
            self.attack_type.letter(),
            rating_of(self.mechanical_defense),
            rating_of(self.electrical_defense)
        )
    }
}
