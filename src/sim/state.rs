//! Session state and entity types
//!
//! Everything a single play-through mutates lives in [`SessionState`]; a new
//! one is built on every reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::collision::Aabb;
use super::difficulty::DifficultyController;
use crate::consts::*;
use crate::settings::Difficulty;

/// Cosmetic obstacle variants (identical gameplay)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
}

/// What a scrolling entity does when the skier touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Costs a life
    Obstacle(ObstacleKind),
    /// Bonus points
    Flag,
    /// Points, a rescue, and a life back
    Rescuee,
}

impl EntityKind {
    /// Collision footprint (width, height)
    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            EntityKind::Obstacle(_) => OBSTACLE_SIZE,
            EntityKind::Flag => FLAG_SIZE,
            EntityKind::Rescuee => RESCUEE_SIZE,
        };
        Vec2::new(w, h)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Obstacle(_))
    }
}

/// A scrolling entity (obstacle, flag or rescuee)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Center of the footprint
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Entity {
    /// Entity whose bottom edge sits on the top of the screen at `x`
    pub fn at_top(id: u32, kind: EntityKind, x: f32, speed_y: f32) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            pos: Vec2::new(x, -size.y / 2.0),
            vel: Vec2::new(0.0, speed_y),
            size,
            alive: true,
        }
    }

    pub fn footprint(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Move by one tick of velocity; marks the entity dead once it has
    /// scrolled fully past the bottom edge.
    pub fn advance(&mut self) {
        self.pos += self.vel;
        if self.footprint().min.y > SCREEN_HEIGHT {
            self.alive = false;
        }
    }
}

/// Horizontal steering for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skier {
    /// Center of the footprint
    pub pos: Vec2,
    /// Horizontal speed applied this tick (pixels per tick)
    pub speed_x: f32,
    pub size: Vec2,
}

impl Default for Skier {
    fn default() -> Self {
        let size = Vec2::new(SKIER_SIZE.0, SKIER_SIZE.1);
        Self {
            pos: Vec2::new(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT - SKIER_BOTTOM_MARGIN - size.y / 2.0,
            ),
            speed_x: 0.0,
            size,
        }
    }
}

impl Skier {
    pub fn footprint(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Apply steering and keep the skier on screen
    pub fn steer(&mut self, steer: Steer) {
        self.speed_x = match steer {
            Steer::None => 0.0,
            Steer::Left => -SKIER_MOVE_SPEED,
            Steer::Right => SKIER_MOVE_SPEED,
        };
        let half_w = self.size.x / 2.0;
        self.pos.x = (self.pos.x + self.speed_x).clamp(half_w, SCREEN_WIDTH - half_w);
    }
}

/// Things that happened during a tick, for sound/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityKind },
    ObstacleHit { lives_left: u8 },
    FlagCollected { count: u32 },
    Rescued { count: u32 },
    DifficultyUp { level: u32, scroll_speed: f32 },
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct SessionState {
    pub difficulty: Difficulty,
    pub score: u64,
    /// Always within `0..=MAX_LIVES`
    pub lives: u8,
    pub rescued_count: u32,
    pub clock: SimClock,
    /// Whole simulated seconds, refreshed every tick
    pub elapsed_seconds: u64,
    pub paused: bool,
    /// Background scroll offset in pixels (visual only)
    pub background_phase: f32,
    pub ramp: DifficultyController,
    pub skier: Skier,
    /// Live entities, in id order
    pub entities: Vec<Entity>,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl SessionState {
    /// Fresh session seeded from a difficulty preset
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            score: 0,
            lives: STARTING_LIVES,
            rescued_count: 0,
            clock: SimClock::new(TICK_RATE),
            elapsed_seconds: 0,
            paused: false,
            background_phase: 0.0,
            ramp: DifficultyController::new(difficulty.preset()),
            skier: Skier::default(),
            entities: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    pub fn scroll_speed(&self) -> f32 {
        self.ramp.scroll_speed()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity, raising a spawn event
    pub fn push_entity(&mut self, entity: Entity) {
        self.events.push(GameEvent::Spawned {
            id: entity.id,
            kind: entity.kind,
        });
        self.entities.push(entity);
    }

    /// Live entities of one kind class
    pub fn count_where(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.kind)).count()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = SessionState::new(Difficulty::Hard, 1);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.score, 0);
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.scroll_speed(), 5.0);
        assert!(session.entities.is_empty());
        assert!(!session.paused);
    }

    #[test]
    fn test_skier_starts_centered_above_bottom_margin() {
        let skier = Skier::default();
        let fp = skier.footprint();
        assert_eq!(skier.pos.x, SCREEN_WIDTH / 2.0);
        assert_eq!(fp.max.y, SCREEN_HEIGHT - SKIER_BOTTOM_MARGIN);
    }

    #[test]
    fn test_skier_clamped_to_screen() {
        let mut skier = Skier::default();
        for _ in 0..500 {
            skier.steer(Steer::Left);
        }
        assert_eq!(skier.footprint().min.x, 0.0);
        for _ in 0..500 {
            skier.steer(Steer::Right);
        }
        assert_eq!(skier.footprint().max.x, SCREEN_WIDTH);
        skier.steer(Steer::None);
        assert_eq!(skier.speed_x, 0.0);
    }

    #[test]
    fn test_entity_dies_after_leaving_bottom() {
        let mut entity = Entity::at_top(1, EntityKind::Flag, 100.0, 10.0);
        assert_eq!(entity.footprint().max.y, 0.0);

        let mut ticks = 0;
        while entity.alive {
            entity.advance();
            ticks += 1;
        }
        assert!(entity.footprint().min.y > SCREEN_HEIGHT);
        // bottom starts at 0, top must pass 600 + 36
        assert_eq!(ticks, 64);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut session = SessionState::new(Difficulty::Easy, 1);
        let a = session.next_entity_id();
        let b = session.next_entity_id();
        assert!(b > a);
    }
}
