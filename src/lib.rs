//! Ocean Dash - an ocean-cleanup arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Canvas-2d scene painting and sprite loading
//! - `platform`: Browser/native platform helpers
//! - `leaderboard`: Top-10 score persistence
//! - `tuning`: Data-driven game balance

pub mod leaderboard;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;
pub mod tuning;

pub use leaderboard::Leaderboard;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (logical 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Player sprite dimensions (square, pixels)
    pub const PLAYER_SIZE: f32 = 83.0;
    /// Obstacle sprite dimensions
    pub const OBSTACLE_SIZE: f32 = 100.0;
    /// Ambient fish dimensions
    pub const FISH_SIZE: f32 = 40.0;
    /// Collectible (can/barrel) dimensions
    pub const COLLECTIBLE_SIZE: f32 = 40.0;
    /// Power-up dimensions
    pub const POWERUP_SIZE: f32 = 40.0;

    /// Player spawn offset from the bottom edge of the field
    pub const PLAYER_BOTTOM_MARGIN: f32 = 100.0;
}
