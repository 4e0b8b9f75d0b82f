//! Game state and core simulation types
//!
//! One `GameState` owns everything mutable in a session: the player, the
//! movers, the timers, the RNG. Restart discards it and builds a fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::scheduler::Scheduler;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Session created, waiting for start (assets still loading)
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended by an obstacle hit
    GameOver,
}

/// A directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The player-controlled whale
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Movement speed in px/s; doubled while a boost is active
    pub speed: f32,
    pub vel: Vec2,
}

impl Player {
    /// Spawn centered near the bottom of the field
    pub fn new(field: Vec2, speed: f32) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let pos = Vec2::new((field.x - size.x) / 2.0, field.y - PLAYER_BOTTOM_MARGIN);
        Self {
            rect: Rect::from_pos_size(pos, size),
            speed,
            vel: Vec2::ZERO,
        }
    }

    /// Set the matching velocity component to the current speed
    pub fn steer(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.vel.y = -self.speed,
            Direction::Down => self.vel.y = self.speed,
            Direction::Left => self.vel.x = -self.speed,
            Direction::Right => self.vel.x = self.speed,
        }
    }

    /// Zero both velocity components
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Integrate velocity and clamp the rect to the field
    pub fn update(&mut self, dt: f32, field: Vec2) {
        self.rect.pos += self.vel * dt;
        self.rect.pos = self.rect.pos.clamp(Vec2::ZERO, field - self.rect.size);
    }
}

/// Collectible variants, scored differently on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Common piece of trash, worth one point
    Can,
    /// Rare barrel, worth five
    Barrel,
}

impl CollectibleKind {
    /// Score awarded on collection
    pub fn points(&self) -> u32 {
        match self {
            CollectibleKind::Can => 1,
            CollectibleKind::Barrel => 5,
        }
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    SpeedBoost,
}

/// What a falling rectangle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverKind {
    Obstacle,
    /// Ambient decoration, never collision-tested
    Fish,
    Collectible(CollectibleKind),
    PowerUp(PowerUpKind),
}

/// Any entity that falls on its own each tick
#[derive(Debug, Clone)]
pub struct Mover {
    pub id: u32,
    pub kind: MoverKind,
    pub rect: Rect,
    /// Fall speed in px/s, raised by the difficulty controller
    pub speed: f32,
}

impl Mover {
    /// Fall, wrapping to the top at a random x once past the bottom edge
    pub fn update(&mut self, dt: f32, field: Vec2, rng: &mut Pcg32) {
        self.rect.pos.y += self.speed * dt;
        if self.rect.pos.y > field.y {
            self.respawn_at_top(field, rng);
        }
    }

    /// Move to just above the field at a uniformly random x
    pub fn respawn_at_top(&mut self, field: Vec2, rng: &mut Pcg32) {
        self.rect.pos.y = -self.rect.size.y;
        self.rect.pos.x = rng.random_range(0.0..=(field.x - self.rect.size.x));
    }
}

/// Things that happened during a tick, for the embedder (HUD, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Collected {
        kind: CollectibleKind,
        points: u32,
        score: u32,
    },
    BoostActivated,
    BoostExpired,
    SpeedsRaised,
    Ended {
        score: u32,
        time: u32,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Play field size, fixed at session start
    pub field: Vec2,
    pub phase: GamePhase,
    pub score: u32,
    /// Whole seconds since start, driven by the scheduler
    pub elapsed_secs: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Shared obstacle fall speed (px/s, non-decreasing while Playing)
    pub obstacle_speed: f32,
    /// Shared fish/collectible fall speed (px/s, non-decreasing while Playing)
    pub collectible_speed: f32,
    pub player: Player,
    /// All movers, sorted by id for deterministic iteration
    pub movers: Vec<Mover>,
    /// Tick-driven timers (elapsed seconds, difficulty ramp, boost expiry)
    pub scheduler: Scheduler,
    /// Game balance for this session
    pub tuning: Tuning,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session in `Ready` with no movers spawned yet
    pub fn new(seed: u64, field: Vec2, tuning: Tuning) -> Self {
        Self {
            seed,
            field,
            phase: GamePhase::Ready,
            score: 0,
            elapsed_secs: 0,
            time_ticks: 0,
            obstacle_speed: tuning.obstacle_speed,
            collectible_speed: tuning.collectible_speed,
            player: Player::new(field, tuning.player_speed),
            movers: Vec::new(),
            scheduler: Scheduler::new(),
            tuning,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a mover of the given kind at a random x, scattered through one
    /// field-height above the top edge so entry is staggered
    pub fn spawn_mover(&mut self, kind: MoverKind, size: f32, speed: f32) {
        let id = self.next_entity_id();
        let x = self.rng.random_range(0.0..=(self.field.x - size));
        let y = self.rng.random_range(-self.field.y..0.0);
        self.movers.push(Mover {
            id,
            kind,
            rect: Rect::new(x, y, size, size),
            speed,
        });
    }

    /// Advance every mover one step (fall + wrap)
    pub fn update_movers(&mut self, dt: f32) {
        let field = self.field;
        for i in 0..self.movers.len() {
            self.movers[i].update(dt, field, &mut self.rng);
        }
    }

    /// Respawn mover `i` just above the field at a random x
    pub fn respawn_mover(&mut self, i: usize) {
        let field = self.field;
        self.movers[i].respawn_at_top(field, &mut self.rng);
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure movers are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.movers.sort_by_key(|m| m.id);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_field() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_player_spawns_bottom_center() {
        let player = Player::new(test_field(), 600.0);
        assert_eq!(player.rect.pos.y, 600.0 - PLAYER_BOTTOM_MARGIN);
        assert!((player.rect.center().x - 400.0).abs() < 0.001);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_steer_and_halt() {
        let mut player = Player::new(test_field(), 600.0);
        player.steer(Direction::Left);
        player.steer(Direction::Up);
        assert_eq!(player.vel, Vec2::new(-600.0, -600.0));
        player.halt();
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let field = test_field();
        let mut player = Player::new(field, 600.0);
        player.steer(Direction::Right);
        player.steer(Direction::Down);
        for _ in 0..600 {
            player.update(1.0 / 60.0, field);
        }
        assert_eq!(player.rect.right(), field.x);
        assert_eq!(player.rect.bottom(), field.y);

        player.halt();
        player.steer(Direction::Left);
        player.steer(Direction::Up);
        for _ in 0..600 {
            player.update(1.0 / 60.0, field);
        }
        assert_eq!(player.rect.pos, Vec2::ZERO);
    }

    #[test]
    fn test_mover_wraps_at_bottom() {
        let field = test_field();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut mover = Mover {
            id: 1,
            kind: MoverKind::Obstacle,
            rect: Rect::new(100.0, field.y + 1.0, 40.0, 40.0),
            speed: 120.0,
        };
        mover.update(1.0 / 60.0, field, &mut rng);
        assert_eq!(mover.rect.pos.y, -40.0);
        assert!(mover.rect.pos.x >= 0.0);
        assert!(mover.rect.pos.x <= field.x - 40.0);
    }

    #[test]
    fn test_collectible_points() {
        assert_eq!(CollectibleKind::Can.points(), 1);
        assert_eq!(CollectibleKind::Barrel.points(), 5);
    }

    proptest! {
        #[test]
        fn prop_player_update_stays_in_bounds(
            px in 0.0f32..700.0,
            py in 0.0f32..500.0,
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
        ) {
            let field = test_field();
            let mut player = Player::new(field, 600.0);
            player.rect.pos = Vec2::new(px.min(field.x - PLAYER_SIZE), py.min(field.y - PLAYER_SIZE));
            player.vel = Vec2::new(vx, vy);
            player.update(1.0 / 60.0, field);
            prop_assert!(player.rect.left() >= 0.0);
            prop_assert!(player.rect.top() >= 0.0);
            prop_assert!(player.rect.right() <= field.x);
            prop_assert!(player.rect.bottom() <= field.y);
        }
    }
}
