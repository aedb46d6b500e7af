//! The player's persistent card collection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::leveling::{apply_level_up, LevelUp};
use crate::cards::{Card, CardId};
use crate::core::Side;
use crate::rules::MatchResult;

/// Everything a finished match changes in the player's collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// `None` until the match has ended.
    pub result: Option<MatchResult>,
    pub level_ups: Vec<LevelUp>,
    /// Opponent card the player won.
    pub gained: Option<Card>,
    /// Player card handed to the opponent.
    pub lost: Option<CardId>,
}

/// Cards the player owns between matches.
///
/// ## Example
///
/// ```
/// use grid_duel::cards::{Card, CardId, CardTypeId};
/// use grid_duel::core::Side;
/// use grid_duel::progression::{Collection, MatchOutcome};
///
/// let mut collection = Collection::from_cards(vec![
///     Card::new(CardId::new(1), CardTypeId::new(1), Side::Player),
/// ]);
/// collection.apply(&MatchOutcome {
///     lost: Some(CardId::new(1)),
///     ..MatchOutcome::default()
/// });
/// assert!(collection.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    cards: Vec<Card>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Apply level-ups, drop the lost card and add the won one.
    ///
    /// A won card joins as a fresh, unplayed player card. Ids already in
    /// the collection are not added twice.
    pub fn apply(&mut self, outcome: &MatchOutcome) {
        for level_up in &outcome.level_ups {
            if let Some(card) = self.cards.iter_mut().find(|c| c.id == level_up.card) {
                apply_level_up(card, level_up);
            }
        }

        if let Some(lost) = outcome.lost {
            self.cards.retain(|c| c.id != lost);
            debug!(card = %lost, "card removed from collection");
        }

        if let Some(mut gained) = outcome.gained {
            if !self.contains(gained.id) {
                gained.owner = Side::Player;
                gained.origin = Side::Player;
                gained.used = false;
                gained.in_hand = true;
                debug!(card = %gained.id, "card added to collection");
                self.cards.push(gained);
            }
        }
    }
}
