//! Frame-cadence spawning
//!
//! A kind spawns on ticks where `frame_count % interval == 0`. Rescuees are
//! held back for the opening seconds of a session and, when due, only appear
//! some of the time; a missed roll is simply skipped.

use rand::Rng;

use super::state::{Entity, EntityKind, ObstacleKind, SessionState};
use crate::consts::*;

/// Spawn an obstacle if the cadence fires this tick
pub fn maybe_spawn_obstacle(state: &mut SessionState) -> Option<u32> {
    if !state.clock.on_cadence(state.ramp.obstacle_interval()) {
        return None;
    }
    let kind = if state.rng.random_bool(TREE_CHANCE) {
        ObstacleKind::Tree
    } else {
        ObstacleKind::Rock
    };
    let speed = state.scroll_speed();
    Some(spawn_at_top(state, EntityKind::Obstacle(kind), speed))
}

/// Spawn a flag if the cadence fires this tick
pub fn maybe_spawn_flag(state: &mut SessionState) -> Option<u32> {
    if !state.clock.on_cadence(state.ramp.flag_interval()) {
        return None;
    }
    let speed = state.scroll_speed();
    Some(spawn_at_top(state, EntityKind::Flag, speed))
}

/// Spawn a rescuee if past the grace period, the cadence fires, and the
/// scarcity roll succeeds
pub fn maybe_spawn_rescuee(state: &mut SessionState) -> Option<u32> {
    let grace_ticks = RESCUE_GRACE_SECONDS * state.clock.rate() as u64;
    if state.frame_count() < grace_ticks {
        return None;
    }
    if !state.clock.on_cadence(state.ramp.rescue_interval()) {
        return None;
    }
    if !state.rng.random_bool(RESCUE_SPAWN_CHANCE) {
        log::debug!("Rescue roll missed at frame {}", state.frame_count());
        return None;
    }
    let speed = state.scroll_speed() * RESCUEE_SPEED_FACTOR;
    Some(spawn_at_top(state, EntityKind::Rescuee, speed))
}

/// Run all three spawners in order
pub fn spawn_tick(state: &mut SessionState) {
    maybe_spawn_obstacle(state);
    maybe_spawn_flag(state);
    maybe_spawn_rescuee(state);
}

fn spawn_at_top(state: &mut SessionState, kind: EntityKind, speed_y: f32) -> u32 {
    let x = state
        .rng
        .random_range(SPAWN_INSET..=SCREEN_WIDTH - SPAWN_INSET)
        .round();
    let id = state.next_entity_id();
    log::debug!("Spawn #{} {:?} at x={} frame {}", id, kind, x, state.frame_count());
    state.push_entity(Entity::at_top(id, kind, x, speed_y));
    id
}
