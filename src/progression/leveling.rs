//! Post-match level-ups.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{Card, CardCatalog, CardId, CardStats};
use crate::core::{MatchRng, Side};

/// A card that gained a level, with its regenerated stats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub card: CardId,
    pub new_level: u8,
    pub stats: CardStats,
}

/// Can this card level up after the match?
///
/// Only cards that started in the player's hand, were placed, and sit
/// below `max_level` qualify. Current ownership does not matter.
#[must_use]
pub fn is_eligible(card: &Card, max_level: u8) -> bool {
    card.origin == Side::Player && card.used && card.level < max_level
}

/// Roll an independent level-up for every eligible card.
///
/// One `chance` draw is consumed per eligible card, in iteration order.
/// A card whose next level is missing from the catalog keeps its level.
pub fn roll_level_ups<'a>(
    cards: impl IntoIterator<Item = &'a Card>,
    catalog: &dyn CardCatalog,
    rng: &mut impl MatchRng,
    chance: f64,
    max_level: u8,
) -> Vec<LevelUp> {
    let mut level_ups = Vec::new();

    for card in cards.into_iter().filter(|c| is_eligible(c, max_level)) {
        if !rng.chance(chance) {
            continue;
        }
        let new_level = card.level + 1;
        match catalog.stats_for(card.type_id, new_level) {
            Ok(stats) => {
                debug!(card = %card.id, new_level, "card leveled up");
                level_ups.push(LevelUp {
                    card: card.id,
                    new_level,
                    stats,
                });
            }
            Err(err) => warn!(card = %card.id, %err, "level-up skipped"),
        }
    }

    level_ups
}

/// Apply a level-up to a card with the matching id. Returns `false` on an id mismatch.
pub fn apply_level_up(card: &mut Card, level_up: &LevelUp) -> bool {
    if card.id != level_up.card {
        return false;
    }
    card.level = level_up.new_level;
    card.apply_stats(level_up.stats);
    true
}
