//! Stat ratings and the canonical rating decode.
//!
//! Catalog tables store every stat as a rating nibble (0-15). Cards carry
//! the decoded value, and battle rolls, the move evaluator and the target
//! selector all read that stored value. `decode_rating` is the only place
//! a rating turns into a value.

use serde::{Deserialize, Serialize};

use crate::board::Arrows;

/// Highest rating a catalog entry may use.
pub const MAX_RATING: u8 = 15;

/// Decode a rating nibble into a stat value: `rating * 16 + 8`.
///
/// ```
/// use grid_duel::cards::stats::decode_rating;
///
/// assert_eq!(decode_rating(0), 8);
/// assert_eq!(decode_rating(15), 248);
/// ```
#[must_use]
pub const fn decode_rating(rating: u8) -> u16 {
    rating as u16 * 16 + 8
}

/// The rating nibble a stat value falls in.
#[must_use]
pub const fn rating_of(value: u16) -> u8 {
    let rating = value / 16;
    if rating > MAX_RATING as u16 {
        MAX_RATING
    } else {
        rating as u8
    }
}

/// How a card attacks, which picks the defense it rolls against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    /// Rolls against mechanical defense.
    #[default]
    Physical,
    /// Rolls against electrical defense.
    Electric,
    /// Rolls against the weaker defense.
    Flexible,
    /// Rolls against the weakest of both defenses and the defender's attack.
    Assault,
}

impl AttackType {
    /// Single-letter tag used in card labels.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            AttackType::Physical => 'P',
            AttackType::Electric => 'E',
            AttackType::Flexible => 'X',
            AttackType::Assault => 'A',
        }
    }
}

/// The level-dependent part of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStats {
    pub arrows: Arrows,
    pub attack: u16,
    pub attack_type: AttackType,
    pub mechanical_defense: u16,
    pub electrical_defense: u16,
}

impl CardStats {
    /// Plain sum of attack and both defenses.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::from(self.attack) + u32::from(self.mechanical_defense) + u32::from(self.electrical_defense)
    }
}

/// A catalog row: arrows, attack type and three rating nibbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRatings {
    pub arrows: Arrows,
    pub attack_type: AttackType,
    pub attack: u8,
    pub mechanical: u8,
    pub electrical: u8,
}

impl StatRatings {
    /// Are all three ratings within `0..=MAX_RATING`?
    #[must_use]
    pub fn in_range(&self) -> bool {
        [self.attack, self.mechanical, self.electrical]
            .iter()
            .all(|&r| r <= MAX_RATING)
    }

    /// Decode into card stats.
    #[must_use]
    pub fn decode(&self) -> CardStats {
        CardStats {
            arrows: self.arrows,
            attack: decode_rating(self.attack),
            attack_type: self.attack_type,
            mechanical_defense: decode_rating(self.mechanical),
            electrical_defense: decode_rating(self.electrical),
        }
    }
}
