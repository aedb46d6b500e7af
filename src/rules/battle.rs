//! Contested battle resolution.
//!
//! `attack_roll = uniform(0..=attack)` and `defense_roll = uniform(0..=defense)`,
//! where the defense is picked by the attacker's attack type. The attacker
//! wins ties. A won battle flips the defender; a lost battle flips the
//! attacker to the defender's side.

use serde::{Deserialize, Serialize};

use crate::board::{CellIndex, Field};
use crate::cards::Card;
use crate::core::{MatchRng, Side};

/// Result of one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub attacker_cell: CellIndex,
    pub defender_cell: CellIndex,
    pub attack_roll: u32,
    pub defense_roll: u32,
    pub winner: Side,
}

impl BattleOutcome {
    /// Side that lost the battle.
    #[must_use]
    pub fn loser(&self) -> Side {
        self.winner.other()
    }

    /// Cell whose card changed owner.
    #[must_use]
    pub fn flipped_cell(&self) -> CellIndex {
        if self.attack_roll >= self.defense_roll {
            self.defender_cell
        } else {
            self.attacker_cell
        }
    }

    /// Did the attacker win?
    #[must_use]
    pub fn attacker_won(&self) -> bool {
        self.attack_roll >= self.defense_roll
    }
}

/// Defense value `defender` rolls against `attacker`.
#[must_use]
pub fn defense_value(attacker: &Card, defender: &Card) -> u16 {
    defender.defense_against(attacker.attack_type)
}

/// Roll attack against defense. Returns `(attack_roll, defense_roll)`.
pub fn roll(attacker: &Card, defender: &Card, rng: &mut impl MatchRng) -> (u32, u32) {
    let attack_roll = rng.roll(u32::from(attacker.attack));
    let defense_roll = rng.roll(u32::from(defense_value(attacker, defender)));
    (attack_roll, defense_roll)
}

/// Resolve the battle between the cards at `attacker_cell` and `defender_cell`
/// and flip the loser's card.
///
/// Returns `None` without touching the field or the RNG if either cell is empty.
pub fn resolve(
    field: &mut Field,
    attacker_cell: CellIndex,
    defender_cell: CellIndex,
    rng: &mut impl MatchRng,
) -> Option<BattleOutcome> {
    let attacker = *field.card(attacker_cell)?;
    let defender = *field.card(defender_cell)?;

    let (attack_roll, defense_roll) = roll(&attacker, &defender, rng);
    let winner = if attack_roll >= defense_roll {
        field.set_owner(defender_cell, attacker.owner);
        attacker.owner
    } else {
        field.set_owner(attacker_cell, defender.owner);
        defender.owner
    };

    Some(BattleOutcome {
        attacker_cell,
        defender_cell,
        attack_roll,
        defense_roll,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AttackType, CardId, CardTypeId};
    use crate::core::{GameRng, ScriptedRng};

    fn idx(raw: u8) -> CellIndex {
        CellIndex::new(raw).unwrap()
    }

    fn setup(attack: u16, defense: u16) -> Field {
        let mut field = Field::open();
        let defender = Card::new(CardId::new(2), CardTypeId::new(0), Side::Opponent)
            .with_attack(10, AttackType::Physical)
            .with_defense(defense, 0);
        let attacker = Card::new(CardId::new(1), CardTypeId::new(0), Side::Player)
            .with_attack(attack, AttackType::Physical);
        field.place(idx(1), defender).unwrap();
        field.place(idx(5), attacker).unwrap();
        field
    }

    #[test]
    fn test_attacker_wins_flips_defender() {
        let mut field = setup(5, 4);
        let mut rng = ScriptedRng::new().with_rolls([3, 1]);

        let outcome = resolve(&mut field, idx(5), idx(1), &mut rng).unwrap();

        assert_eq!(outcome.attack_roll, 3);
        assert_eq!(outcome.defense_roll, 1);
        assert_eq!(outcome.winner, Side::Player);
        assert!(outcome.attacker_won());
        assert_eq!(field.owner_at(idx(1)), Some(Side::Player));
        assert_eq!(field.owner_at(idx(5)), Some(Side::Player));
    }

    #[test]
    fn test_tie_goes_to_attacker() {
        let mut field = setup(5, 4);
        let mut rng = ScriptedRng::new().with_rolls([2, 2]);

        let outcome = resolve(&mut field, idx(5), idx(1), &mut rng).unwrap();
        assert_eq!(outcome.winner, Side::Player);
    }

    #[test]
    fn test_attacker_loses_flips_itself() {
        let mut field = setup(5, 4);
        let mut rng = ScriptedRng::new().with_rolls([0, 4]);

        let outcome = resolve(&mut field, idx(5), idx(1), &mut rng).unwrap();

        assert_eq!(outcome.winner, Side::Opponent);
        assert_eq!(outcome.loser(), Side::Player);
        assert_eq!(outcome.flipped_cell(), idx(5));
        assert_eq!(field.owner_at(idx(5)), Some(Side::Opponent));
        assert_eq!(field.owner_at(idx(1)), Some(Side::Opponent));
    }

    #[test]
    fn test_rolls_stay_in_bounds() {
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let mut field = setup(7, 3);
            let outcome = resolve(&mut field, idx(5), idx(1), &mut rng).unwrap();
            assert!(outcome.attack_roll <= 7);
            assert!(outcome.defense_roll <= 3);
            assert_eq!(outcome.attacker_won(), outcome.attack_roll >= outcome.defense_roll);
        }
    }

    #[test]
    fn test_empty_cell_is_noop() {
        let mut field = setup(5, 4);
        let mut rng = ScriptedRng::new().with_rolls([1]);

        assert!(resolve(&mut field, idx(5), idx(9), &mut rng).is_none());
        assert_eq!(rng.remaining_rolls(), 1);
    }

    #[test]
    fn test_defense_value_by_type() {
        let defender = Card::new(CardId::new(2), CardTypeId::new(0), Side::Opponent)
            .with_attack(3, AttackType::Physical)
            .with_defense(9, 6);
        let mut attacker = Card::new(CardId::new(1), CardTypeId::new(0), Side::Player);

        for (kind, expected) in [
            (AttackType::Physical, 9),
            (AttackType::Electric, 6),
            (AttackType::Flexible, 6),
            (AttackType::Assault, 3),
        ] {
            attacker.attack_type = kind;
            assert_eq!(defense_value(&attacker, &defender), expected);
        }
    }
}
