//! MatchSettings - the knobs a match is created with
//!
//! Validated once when the engine is built; a fixed seed with zero pacing
//! makes a scripted match fully reproducible.

use serde::{Deserialize, Serialize};

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSettings {
    /// Points a side needs to win the match
    pub target_score: u16,
    /// Cards dealt to each seat at the start of a hand (1-3)
    pub hand_size: u8,
    /// Chance that a scripted seat spontaneously yells Truco when its hand
    /// is strong, rolled once per turn at base stake (0.0-1.0)
    pub truco_call_chance: f64,
    /// Pause after scripted moves and after round resolution, in
    /// milliseconds; 0 disables pacing
    pub pacing_ms: u64,
    /// RNG seed for deterministic shuffles and bot dice; None draws entropy
    pub seed: Option<u64>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            target_score: 12,
            hand_size: 3,
            truco_call_chance: 0.2,
            pacing_ms: 1000,
            seed: None,
        }
    }
}

impl MatchSettings {
    /// Deterministic settings for simulations and tests: fixed seed, no pacing.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            pacing_ms: 0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.target_score == 0 {
            return Err("Target score must be at least 1");
        }
        if self.hand_size == 0 || self.hand_size > 3 {
            return Err("Hand size must be between 1 and 3");
        }
        if !(0.0..=1.0).contains(&self.truco_call_chance) {
            return Err("Truco call chance must be between 0 and 1");
        }
        Ok(())
    }
}
