//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count timing for spawns and difficulty
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use difficulty::DifficultyController;
pub use spawn::{maybe_spawn_flag, maybe_spawn_obstacle, maybe_spawn_rescuee, spawn_tick};
pub use state::{
    Entity, EntityKind, GameEvent, ObstacleKind, SessionState, Skier, Steer,
};
pub use tick::{TickInput, TickOutcome, tick};
