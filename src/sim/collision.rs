//! Collision detection and resolution
//!
//! Axis-aligned footprints only. Each tick runs three independent passes
//! (obstacles, flags, rescuees) against the skier; every matched entity is
//! consumed and its effect applied once per match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityKind, GameEvent, SessionState};
use crate::consts::*;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What one resolution pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub obstacles_hit: u32,
    pub flags_collected: u32,
    pub rescued: u32,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolve skier-vs-entity overlaps for this tick
pub fn resolve_collisions(state: &mut SessionState) -> CollisionReport {
    let report = CollisionReport {
        obstacles_hit: consume_overlapping(state, EntityKind::is_obstacle),
        flags_collected: consume_overlapping(state, |k| *k == EntityKind::Flag),
        rescued: consume_overlapping(state, |k| *k == EntityKind::Rescuee),
    };

    for _ in 0..report.obstacles_hit {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::ObstacleHit {
            lives_left: state.lives,
        });
    }

    if report.flags_collected > 0 {
        state.score += POINTS_PER_FLAG * report.flags_collected as u64;
        state.events.push(GameEvent::FlagCollected {
            count: report.flags_collected,
        });
    }

    if report.rescued > 0 {
        let count = report.rescued;
        state.rescued_count += count;
        state.score += POINTS_PER_RESCUE * count as u64;
        let gained = count.min(MAX_LIVES as u32) as u8;
        state.lives = state.lives.saturating_add(gained).min(MAX_LIVES);
        state.events.push(GameEvent::Rescued { count });
    }

    if !report.is_empty() {
        log::debug!(
            "Collisions at frame {}: {:?} (lives={}, score={})",
            state.frame_count(),
            report,
            state.lives,
            state.score
        );
    }

    report
}

/// Remove every entity matching `pred` that overlaps the skier
fn consume_overlapping(state: &mut SessionState, pred: impl Fn(&EntityKind) -> bool) -> u32 {
    let skier = state.skier.footprint();
    let mut matched = 0;
    for entity in state.entities.iter_mut() {
        if entity.alive && pred(&entity.kind) && entity.footprint().overlaps(&skier) {
            entity.alive = false;
            matched += 1;
        }
    }
    if matched > 0 {
        state.entities.retain(|e| e.alive);
    }
    matched
}
