//! Battle target and forfeit selection.

use tracing::trace;

use super::config::AiConfig;
use crate::board::{CellIndex, Field};
use crate::cards::{Card, CardId};
use crate::rules::defense_value;

/// Score one battle candidate for the card at `attacker_cell`.
///
/// `(attack - defense) * target_stat_weight`, plus one point for every
/// arrow of the candidate pointing at a card of the attacker's opponents
/// (those cards would fall in the follow-up combo).
#[must_use]
pub fn score_target(field: &Field, attacker_cell: CellIndex, candidate: CellIndex, config: &AiConfig) -> f64 {
    let (Some(attacker), Some(defender)) = (field.card(attacker_cell), field.card(candidate)) else {
        return f64::NEG_INFINITY;
    };

    let margin = f64::from(attacker.attack) - f64::from(defense_value(attacker, defender));
    let enemy = attacker.owner.other();
    let follow_up = candidate
        .neighbors()
        .filter(|&(direction, cell)| defender.points(direction) && field.owner_at(cell) == Some(enemy))
        .count();

    margin * config.target_stat_weight + follow_up as f64
}

/// Pick the battle target for the card at `attacker_cell`.
///
/// The highest score wins; ties go to the earliest candidate. Returns
/// `None` for an empty candidate list.
#[must_use]
pub fn select_target(
    field: &Field,
    attacker_cell: CellIndex,
    candidates: &[CellIndex],
    config: &AiConfig,
) -> Option<CellIndex> {
    let mut best: Option<(CellIndex, f64)> = None;
    for &candidate in candidates {
        let score = score_target(field, attacker_cell, candidate, config);
        trace!(%candidate, score, "scored battle target");
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((candidate, score));
        }
    }
    best.map(|(cell, _)| cell)
}

/// Pick the card the losing side hands over.
///
/// Maximises the weighted stat total; ties are broken by the higher raw
/// attack, then by list order.
#[must_use]
pub fn select_forfeit(cards: &[Card], config: &AiConfig) -> Option<CardId> {
    let weighted = |card: &Card| {
        f64::from(card.attack) * config.forfeit_attack_weight
            + f64::from(card.mechanical_defense) * config.forfeit_mechanical_weight
            + f64::from(card.electrical_defense) * config.forfeit_electrical_weight
    };

    let mut best: Option<&Card> = None;
    for card in cards {
        let better = match best {
            None => true,
            Some(current) => {
                let (a, b) = (weighted(card), weighted(current));
                a > b || (a == b && card.attack > current.attack)
            }
        };
        if better {
            best = Some(card);
        }
    }
    best.map(|c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Arrows, Direction};
    use crate::cards::{AttackType, CardTypeId};
    use crate::core::Side;

    fn idx(raw: u8) -> CellIndex {
        CellIndex::new(raw).unwrap()
    }

    fn card(id: u32, side: Side, dirs: &[Direction], attack: u16, defense: u16) -> Card {
        Card::new(CardId::new(id), CardTypeId::new(0), side)
            .with_arrows(Arrows::from_directions(dirs))
            .with_attack(attack, AttackType::Physical)
            .with_defense(defense, defense)
    }

    #[test]
    fn test_weaker_defender_preferred() {
        let mut field = Field::open();
        field.place(idx(5), card(1, Side::Opponent, &[Direction::Top, Direction::Left], 60, 40)).unwrap();
        field.place(idx(1), card(10, Side::Player, &[Direction::Bottom], 30, 50)).unwrap();
        field.place(idx(4), card(11, Side::Player, &[Direction::Right], 30, 20)).unwrap();

        let target = select_target(&field, idx(5), &[idx(1), idx(4)], &AiConfig::default());
        assert_eq!(target, Some(idx(4)));
    }

    #[test]
    fn test_follow_up_breaks_stat_tie() {
        let mut field = Field::open();
        field.place(idx(5), card(1, Side::Opponent, &[Direction::Top, Direction::Left], 60, 40)).unwrap();
        field.place(idx(1), card(10, Side::Player, &[Direction::Bottom], 30, 50)).unwrap();
        // Cell 4 also points Top at cell 0, held by the player.
        field
            .place(idx(4), card(11, Side::Player, &[Direction::Right, Direction::Top], 30, 50))
            .unwrap();
        field.place(idx(0), card(12, Side::Player, &[], 10, 10)).unwrap();

        let config = AiConfig::default();
        assert!((score_target(&field, idx(5), idx(4), &config) - 101.0).abs() < f64::EPSILON);
        assert_eq!(select_target(&field, idx(5), &[idx(1), idx(4)], &config), Some(idx(4)));
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let mut field = Field::open();
        field.place(idx(5), card(1, Side::Opponent, &[Direction::Top, Direction::Left], 60, 40)).unwrap();
        field.place(idx(1), card(10, Side::Player, &[Direction::Bottom], 30, 50)).unwrap();
        field.place(idx(4), card(11, Side::Player, &[Direction::Right], 30, 50)).unwrap();

        let target = select_target(&field, idx(5), &[idx(4), idx(1)], &AiConfig::default());
        assert_eq!(target, Some(idx(4)));
        assert_eq!(select_target(&field, idx(5), &[], &AiConfig::default()), None);
    }

    #[test]
    fn test_forfeit_prefers_strongest() {
        let cards = [
            card(1, Side::Player, &[], 40, 40),
            card(2, Side::Player, &[], 100, 20),
            card(3, Side::Player, &[], 20, 60),
        ];
        // Weighted: 140, 190, 150.
        assert_eq!(select_forfeit(&cards, &AiConfig::default()), Some(CardId::new(2)));
    }

    #[test]
    fn test_forfeit_tie_breaks_on_attack_then_order() {
        let config = AiConfig::default();
        // 60*1.5 + 2*30 = 150 versus 40*1.5 + 2*45 = 150.
        let cards = [card(1, Side::Player, &[], 40, 45), card(2, Side::Player, &[], 60, 30)];
        assert_eq!(select_forfeit(&cards, &config), Some(CardId::new(2)));

        let twins = [card(3, Side::Player, &[], 50, 50), card(4, Side::Player, &[], 50, 50)];
        assert_eq!(select_forfeit(&twins, &config), Some(CardId::new(3)));
        assert_eq!(select_forfeit(&[], &config), None);
    }
}
