//! Combo propagation.
//!
//! Each freshly captured card captures every enemy card its own arrows
//! point at, with no arrow-back check. Newly captured cards form the next
//! wave. A visited set keeps any cell from being processed twice, so the
//! cascade ends after at most 16 captures.

use serde::{Deserialize, Serialize};

use crate::board::{CellIndex, CellSet, Field};
use crate::core::Side;

/// Cells captured by a cascade, one list per wave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboChain {
    pub waves: Vec<Vec<CellIndex>>,
}

impl ComboChain {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Every captured cell in capture order.
    pub fn captured(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.waves.iter().flatten().copied()
    }

    /// Number of captured cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }
}

/// Spread captures for `side` starting from `seeds`.
///
/// `visited` should already hold every cell that must not be captured by
/// the cascade (the placed card and the seeds are added here).
pub fn propagate(field: &mut Field, seeds: &[CellIndex], side: Side, mut visited: CellSet) -> ComboChain {
    for &seed in seeds {
        visited.insert(seed);
    }

    let mut chain = ComboChain::default();
    let mut wave: Vec<CellIndex> = seeds.to_vec();

    while !wave.is_empty() {
        let mut next = Vec::new();

        for cell in wave {
            let Some(card) = field.card(cell).copied() else {
                continue;
            };
            for direction in card.arrows.iter() {
                let Some(neighbor) = cell.neighbor(direction) else {
                    continue;
                };
                if visited.contains(neighbor) || field.owner_at(neighbor) != Some(side.other()) {
                    continue;
                }
                field.set_owner(neighbor, side);
                visited.insert(neighbor);
                next.push(neighbor);
            }
        }

        if !next.is_empty() {
            chain.waves.push(next.clone());
        }
        wave = next;
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Arrows, Direction};
    use crate::cards::{Card, CardId, CardTypeId};

    fn idx(raw: u8) -> CellIndex {
        CellIndex::new(raw).unwrap()
    }

    fn put(field: &mut Field, cell: u8, side: Side, dirs: &[Direction]) {
        let card = Card::new(CardId::new(u32::from(cell) + 100), CardTypeId::new(0), side)
            .with_arrows(Arrows::from_directions(dirs));
        field.place(idx(cell), card).unwrap();
    }

    #[test]
    fn test_chain_across_row() {
        let mut field = Field::open();
        put(&mut field, 0, Side::Player, &[Direction::Right]);
        put(&mut field, 1, Side::Player, &[Direction::Right]);
        put(&mut field, 2, Side::Opponent, &[Direction::Right, Direction::Left]);
        put(&mut field, 3, Side::Opponent, &[]);

        // Cell 1 was just captured by the player.
        let chain = propagate(&mut field, &[idx(1)], Side::Player, CellSet::new());

        assert_eq!(chain.waves, vec![vec![idx(2)], vec![idx(3)]]);
        assert_eq!(field.count_owned(Side::Player), 4);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_no_arrow_back_required() {
        let mut field = Field::open();
        put(&mut field, 5, Side::Player, &[Direction::Bottom]);
        put(&mut field, 9, Side::Opponent, &Direction::ALL);

        let chain = propagate(&mut field, &[idx(5)], Side::Player, CellSet::new());
        assert_eq!(chain.captured().collect::<Vec<_>>(), vec![idx(9)]);
    }

    #[test]
    fn test_visited_cells_are_never_recaptured() {
        let mut field = Field::open();
        // The placed card at 4 lost its battle and now belongs to the opponent.
        put(&mut field, 4, Side::Opponent, &[]);
        put(&mut field, 5, Side::Player, &[Direction::Left, Direction::Right]);
        put(&mut field, 6, Side::Opponent, &[]);

        let visited: CellSet = [idx(4)].into_iter().collect();
        let chain = propagate(&mut field, &[idx(5)], Side::Player, visited);

        assert_eq!(chain.captured().collect::<Vec<_>>(), vec![idx(6)]);
        assert_eq!(field.owner_at(idx(4)), Some(Side::Opponent));
    }

    #[test]
    fn test_full_board_cascade_terminates() {
        let mut field = Field::open();
        put(&mut field, 0, Side::Player, &Direction::ALL);
        for cell in 1..16 {
            put(&mut field, cell, Side::Opponent, &Direction::ALL);
        }

        let chain = propagate(&mut field, &[idx(0)], Side::Player, CellSet::new());

        assert_eq!(chain.len(), 15);
        assert_eq!(field.count_owned(Side::Opponent), 0);
        assert!(chain.waves.len() <= 16);
    }

    #[test]
    fn test_empty_seed_list() {
        let mut field = Field::open();
        put(&mut field, 0, Side::Opponent, &[]);
        assert!(propagate(&mut field, &[], Side::Player, CellSet::new()).is_empty());
    }
}
