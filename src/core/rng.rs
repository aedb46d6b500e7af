//! Deterministic random number generation for match resolution.
//!
//! ## Key Features
//!
//! - **Injectable**: the engine only sees the [`MatchRng`] trait
//! - **Deterministic**: same seed produces identical battle rolls
//! - **Serializable**: O(1) state capture and restore via [`GameRngState`]
//! - **Scriptable**: [`ScriptedRng`] replays a fixed list of draws
//!
//! ## Usage
//!
//! ```
//! use grid_duel::core::{GameRng, MatchRng};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll(10);
//! assert!(roll <= 10);
//!
//! // Same seed, same sequence
//! let mut again = GameRng::new(42);
//! assert_eq!(again.roll(10), roll);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by the engine.
///
/// Coin flip, battle rolls and level-up chances are the only consumers.
pub trait MatchRng {
    /// Uniform integer in `0..=max`.
    fn roll(&mut self, max: u32) -> u32;

    /// `true` with the given probability (clamped to `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl MatchRng for GameRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.inner.gen_range(0..=max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so the cost does not depend on
/// how many numbers were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of draws.
///
/// Rolls are clamped to the requested maximum. Once a queue runs dry,
/// rolls return 0 and chances return `false`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
    chances: VecDeque<bool>,
}

impl ScriptedRng {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue roll results, consumed front to back.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue chance outcomes, consumed front to back.
    #[must_use]
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl MatchRng for ScriptedRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.rolls.pop_front().map_or(0, |r| r.min(max))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

impl<R: MatchRng + ?Sized> MatchRng for &mut R {
    fn roll(&mut self, max: u32) -> u32 {
        (**self).roll(max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(1000), rng2.roll(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.roll(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.roll(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_is_inclusive_and_bounded() {
        let mut rng = GameRng::new(7);
        let mut saw_max = false;

        for _ in 0..500 {
            let r = rng.roll(3);
            assert!(r <= 3);
            saw_max |= r == 3;
        }
        assert!(saw_max);
        assert_eq!(rng.roll(0), 0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(9);
        for _ in 0..50 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(rng.chance(2.5));
        }
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.roll(1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_rng() {
        let mut rng = ScriptedRng::new()
            .with_rolls([3, 9, 1])
            .with_chances([true]);

        assert_eq!(rng.roll(5), 3);
        assert_eq!(rng.roll(4), 4); // clamped
        assert_eq!(rng.remaining_rolls(), 1);
        assert_eq!(rng.roll(4), 1);
        assert_eq!(rng.roll(4), 0); // exhausted

        assert!(rng.chance(0.0));
        assert!(!rng.chance(1.0));
    }
}
