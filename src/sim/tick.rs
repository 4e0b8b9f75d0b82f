//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Each tick fires
//! due timers, moves the player, advances every mover, and resolves
//! collisions against the player.

use rand::Rng;

use super::collision::player_hits;
use super::scheduler::TimerKind;
use super::state::{
    CollectibleKind, Direction, GameEvent, GamePhase, GameState, MoverKind, Player, PowerUpKind,
};
use crate::consts::*;

/// Held directional input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Convert logical seconds to simulation ticks
pub fn secs_to_ticks(secs: u32) -> u32 {
    ((secs as f32) / SIM_DT).round() as u32
}

/// Populate the field and start the session
pub fn start(state: &mut GameState) {
    spawn_field(state);

    let ticks_per_sec = secs_to_ticks(1);
    state
        .scheduler
        .schedule_every(ticks_per_sec, TimerKind::SecondElapsed);
    state.scheduler.schedule_every(
        ticks_per_sec * state.tuning.difficulty_interval_secs,
        TimerKind::DifficultyRamp,
    );

    state.phase = GamePhase::Playing;
    log::info!(
        "session started (seed {}, field {}x{}, {} movers)",
        state.seed,
        state.field.x,
        state.field.y,
        state.movers.len()
    );
}

/// Spawn the initial mover population from the session's tuning
fn spawn_field(state: &mut GameState) {
    let tuning = state.tuning.clone();

    for _ in 0..tuning.fish_count {
        state.spawn_mover(MoverKind::Fish, FISH_SIZE, state.collectible_speed);
    }
    for _ in 0..tuning.obstacle_count {
        state.spawn_mover(MoverKind::Obstacle, OBSTACLE_SIZE, state.obstacle_speed);
    }
    for _ in 0..tuning.can_count {
        state.spawn_mover(
            MoverKind::Collectible(CollectibleKind::Can),
            COLLECTIBLE_SIZE,
            state.collectible_speed,
        );
        // Each can rolls for a rarer bonus barrel
        if state.rng.random::<f32>() < tuning.barrel_chance {
            state.spawn_mover(
                MoverKind::Collectible(CollectibleKind::Barrel),
                COLLECTIBLE_SIZE,
                state.collectible_speed,
            );
        }
    }
    for _ in 0..tuning.powerup_count {
        state.spawn_mover(
            MoverKind::PowerUp(PowerUpKind::SpeedBoost),
            POWERUP_SIZE,
            tuning.powerup_speed,
        );
    }

    state.normalize_order();
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Timers first, so a boost expiry lands before this tick's movement
    for kind in state.scheduler.fire() {
        match kind {
            TimerKind::SecondElapsed => state.elapsed_secs += 1,
            TimerKind::DifficultyRamp => raise_speeds(state),
            TimerKind::BoostExpiry => {
                state.player.speed /= state.tuning.boost_factor;
                state.events.push(GameEvent::BoostExpired);
                log::info!("speed boost expired");
            }
        }
    }

    // Player movement from held directions
    apply_input(&mut state.player, input);
    let field = state.field;
    state.player.update(dt, field);

    // Movers fall and wrap
    state.update_movers(dt);

    // Collision pass against the player
    let keep_ratio = state.tuning.overlap_ratio;
    let mut ended = false;

    for i in 0..state.movers.len() {
        let (kind, rect) = (state.movers[i].kind, state.movers[i].rect);
        match kind {
            MoverKind::Fish => {}
            MoverKind::Obstacle => {
                if player_hits(&state.player.rect, &rect, keep_ratio) {
                    ended = true;
                    break;
                }
            }
            MoverKind::Collectible(collectible) => {
                if player_hits(&state.player.rect, &rect, keep_ratio) {
                    let points = collectible.points();
                    state.score += points;
                    state.events.push(GameEvent::Collected {
                        kind: collectible,
                        points,
                        score: state.score,
                    });
                    state.respawn_mover(i);

                    // Landing exactly on a milestone also ramps difficulty
                    if state.score % state.tuning.score_milestone == 0 {
                        raise_speeds(state);
                    }
                }
            }
            MoverKind::PowerUp(PowerUpKind::SpeedBoost) => {
                if player_hits(&state.player.rect, &rect, keep_ratio) {
                    activate_boost(state);
                    state.respawn_mover(i);
                }
            }
        }
    }

    if ended {
        end_game(state);
    }
}

fn apply_input(player: &mut Player, input: &TickInput) {
    player.halt();
    if input.up {
        player.steer(Direction::Up);
    }
    if input.down {
        player.steer(Direction::Down);
    }
    if input.left {
        player.steer(Direction::Left);
    }
    if input.right {
        player.steer(Direction::Right);
    }
}

/// Raise the shared fall speeds by one step and propagate to live movers.
/// Power-ups keep their fixed speed.
pub fn raise_speeds(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.obstacle_speed += state.tuning.speed_step;
    state.collectible_speed += state.tuning.speed_step;

    for mover in &mut state.movers {
        match mover.kind {
            MoverKind::Obstacle => mover.speed = state.obstacle_speed,
            MoverKind::Fish | MoverKind::Collectible(_) => mover.speed = state.collectible_speed,
            MoverKind::PowerUp(_) => {}
        }
    }

    state.events.push(GameEvent::SpeedsRaised);
    log::debug!(
        "difficulty up: obstacles {} px/s, collectibles {} px/s",
        state.obstacle_speed,
        state.collectible_speed
    );
}

/// Double player speed and schedule the halving
fn activate_boost(state: &mut GameState) {
    state.player.speed *= state.tuning.boost_factor;
    state
        .scheduler
        .schedule_once(secs_to_ticks(state.tuning.boost_secs), TimerKind::BoostExpiry);
    state.events.push(GameEvent::BoostActivated);
    log::info!("speed boost active for {}s", state.tuning.boost_secs);
}

/// Freeze the session: cancel every timer, emit the final score
fn end_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.scheduler.cancel_all();
    state.player.halt();
    state.events.push(GameEvent::Ended {
        score: state.score,
        time: state.elapsed_secs,
    });
    log::info!(
        "game over: {} points in {}s",
        state.score,
        state.elapsed_secs
    );
}
