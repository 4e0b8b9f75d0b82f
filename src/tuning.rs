//! Data-driven game balance
//!
//! Defaults mirror the release values. Overrides persist to LocalStorage
//! separately from the leaderboard, so a tweaked build keeps its balance
//! across reloads.

use serde::{Deserialize, Serialize};

/// Game balance knobs. Speeds are px/s at the logical 60 Hz tick rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ambient fish spawned at start
    pub fish_count: u32,
    pub obstacle_count: u32,
    /// Cans spawned at start; each also rolls for a bonus barrel
    pub can_count: u32,
    /// Chance of a bonus barrel per spawned can
    pub barrel_chance: f32,
    pub powerup_count: u32,

    pub player_speed: f32,
    pub obstacle_speed: f32,
    pub collectible_speed: f32,
    pub powerup_speed: f32,

    /// Added to the shared fall speeds per difficulty trigger
    pub speed_step: f32,
    /// Unconditional ramp period (logical seconds)
    pub difficulty_interval_secs: u32,
    /// Score divisor for the inline ramp trigger
    pub score_milestone: u32,

    /// Player speed multiplier while boosted
    pub boost_factor: f32,
    /// Boost duration (logical seconds)
    pub boost_secs: u32,

    /// Central fraction of the player box used for hit tests
    pub overlap_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fish_count: 20,
            obstacle_count: 7,
            can_count: 10,
            barrel_chance: 0.33,
            powerup_count: 1,

            player_speed: 600.0,
            obstacle_speed: 120.0,
            collectible_speed: 180.0,
            powerup_speed: 120.0,

            speed_step: 30.0,
            difficulty_interval_secs: 15,
            score_milestone: 10,

            boost_factor: 2.0,
            boost_secs: 5,

            overlap_ratio: 0.6,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ocean_dash_tuning";

    /// Load tuning overrides from LocalStorage (WASM only).
    /// Missing or corrupt data falls back to the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning overrides from LocalStorage");
                    return tuning;
                }
                log::warn!("Ignoring corrupt tuning overrides");
            }
        }

        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        // 600 px/s is 10 px per tick at the 60 Hz logical rate
        assert_eq!(t.player_speed, 600.0);
        assert_eq!(t.obstacle_speed, 120.0);
        assert_eq!(t.collectible_speed, 180.0);
        assert_eq!(t.speed_step, 30.0);
        assert_eq!(t.overlap_ratio, 0.6);
    }

    #[test]
    fn test_partial_override_fills_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"obstacle_count": 3}"#).unwrap();
        assert_eq!(t.obstacle_count, 3);
        assert_eq!(t.fish_count, Tuning::default().fish_count);
    }

    #[test]
    fn test_round_trip() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
