//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{overlaps, player_hits};
pub use rect::Rect;
pub use scheduler::{Scheduler, TimerHandle, TimerKind};
pub use state::{
    CollectibleKind, Direction, GameEvent, GamePhase, GameState, Mover, MoverKind, Player,
    PowerUpKind,
};
pub use tick::{TickInput, raise_speeds, secs_to_ticks, start, tick};
