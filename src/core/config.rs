//! Match configuration.
//!
//! A host configures a match by providing:
//! - `MatchMode`: the ruleset variant
//! - `MatchConfig`: mode, seed, progression tuning and AI weights
//!
//! Configs are plain serde data and can be loaded from TOML.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::ai::AiConfig;

/// Ruleset variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Both capture origins seed combos; coin flip decides who starts.
    #[default]
    Standard,
    /// Only captures won in battle seed combos.
    Hard,
    /// The player always starts.
    Hardcore,
}

impl MatchMode {
    /// Does an unopposed instant capture seed a combo chain?
    #[must_use]
    pub const fn instant_captures_seed_combos(self) -> bool {
        !matches!(self, MatchMode::Hard)
    }

    /// Is the opening coin flip fixed in the player's favour?
    #[must_use]
    pub const fn player_always_first(self) -> bool {
        matches!(self, MatchMode::Hardcore)
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Standard => write!(f, "Standard"),
            MatchMode::Hard => write!(f, "Hard"),
            MatchMode::Hardcore => write!(f, "Hardcore"),
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Ruleset variant.
    pub mode: MatchMode,

    /// Seed for the default `GameRng`.
    pub seed: u64,

    /// Independent probability that a used card levels up after a match.
    pub level_up_chance: f64,

    /// Highest card level.
    pub max_level: u8,

    /// Opponent AI weights.
    pub ai: AiConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Standard,
            seed: 42,
            level_up_chance: 0.1,
            max_level: 2,
            ai: AiConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Create a default config for the given mode.
    #[must_use]
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the level-up probability.
    #[must_use]
    pub fn with_level_up_chance(mut self, chance: f64) -> Self {
        self.level_up_chance = chance;
        self
    }

    /// Replace the AI weights.
    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    ///
    /// ```
    /// use grid_duel::core::{MatchConfig, MatchMode};
    ///
    /// let config = MatchConfig::from_toml_str("mode = \"Hard\"\nseed = 7").unwrap();
    /// assert_eq!(config.mode, MatchMode::Hard);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.max_level, 2);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.level_up_chance) {
            return Err(ConfigError::Invalid(format!(
                "level_up_chance {} is outside [0, 1]",
                self.level_up_chance
            )));
        }
        if self.ai.combo_depth == 0 {
            return Err(ConfigError::Invalid("ai.combo_depth must be at least 1".into()));
        }
        Ok(())
    }
}
