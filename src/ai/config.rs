//! Opponent AI weights.

use serde::{Deserialize, Serialize};

/// Weights used by the move evaluator, target selector and forfeit choice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Score per unopposed capture.
    pub capture_score: f64,

    /// Score per contested neighbour, multiplied by the win probability.
    pub battle_score: f64,

    /// Win probability below which a battle counts as a long shot.
    pub long_shot_threshold: f64,

    /// Penalty for each long-shot battle.
    pub long_shot_penalty: f64,

    /// Win probability from which a battle's combo potential counts.
    pub combo_threshold: f64,

    /// How many cascade levels the combo simulation looks ahead.
    pub combo_depth: u32,

    /// Score per card captured at each cascade level. The last entry
    /// repeats for deeper levels.
    pub combo_weights: Vec<f64>,

    /// Penalty per open neighbour the card has no arrow toward.
    pub exposed_penalty: f64,

    /// Bonus per direction with no open neighbour.
    pub covered_bonus: f64,

    /// Bonus per open neighbour the card does point at.
    pub guarded_bonus: f64,

    /// Bonus for a corner cell with enough arrows onto the field.
    pub corner_bonus: f64,

    /// On-field arrows needed for the corner bonus.
    pub corner_min_arrows: u32,

    /// Captures needed before the stat bonus applies.
    pub multi_capture_min: u32,

    /// Stat-total multiplier for moves with several captures.
    pub stat_bonus_factor: f64,

    /// Target selector multiplier on `attack - defense`.
    pub target_stat_weight: f64,

    /// Forfeit choice weight on attack.
    pub forfeit_attack_weight: f64,

    /// Forfeit choice weight on mechanical defense.
    pub forfeit_mechanical_weight: f64,

    /// Forfeit choice weight on electrical defense.
    pub forfeit_electrical_weight: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            capture_score: 100.0,
            battle_score: 100.0,
            long_shot_threshold: 0.2,
            long_shot_penalty: 30.0,
            combo_threshold: 0.5,
            combo_depth: 5,
            combo_weights: vec![60.0, 80.0, 100.0],
            exposed_penalty: 30.0,
            covered_bonus: 10.0,
            guarded_bonus: 5.0,
            corner_bonus: 15.0,
            corner_min_arrows: 2,
            multi_capture_min: 2,
            stat_bonus_factor: 0.05,
            target_stat_weight: 10.0,
            forfeit_attack_weight: 1.5,
            forfeit_mechanical_weight: 1.0,
            forfeit_electrical_weight: 1.0,
        }
    }
}

impl AiConfig {
    /// Score for one card captured at cascade level `depth` (1-based).
    #[must_use]
    pub fn combo_weight(&self, depth: u32) -> f64 {
        let Some(&last) = self.combo_weights.last() else {
            return 0.0;
        };
        let slot = depth.saturating_sub(1) as usize;
        self.combo_weights.get(slot).copied().unwrap_or(last)
    }

    /// Set the combo look-ahead depth.
    #[must_use]
    pub fn with_combo_depth(mut self, depth: u32) -> Self {
        self.combo_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.combo_depth, 5);
        assert!((config.capture_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_combo_weight_by_depth() {
        let config = AiConfig::default();
        assert!((config.combo_weight(1) - 60.0).abs() < f64::EPSILON);
        assert!((config.combo_weight(2) - 80.0).abs() < f64::EPSILON);
        assert!((config.combo_weight(3) - 100.0).abs() < f64::EPSILON);
        assert!((config.combo_weight(5) - 100.0).abs() < f64::EPSILON);

        let empty = AiConfig {
            combo_weights: Vec::new(),
            ..AiConfig::default()
        };
        assert!(empty.combo_weight(1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serialization() {
        let config = AiConfig::default().with_combo_depth(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
