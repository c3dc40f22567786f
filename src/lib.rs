//! Ski Patrol - an endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, difficulty)
//! - `game`: Mode machine (menu, tutorial, playing, game over) and render view
//! - `highscores`: Persistent ranked score ledger
//! - `platform`: Host loop, input sources and frame pacing
//! - `persistence`: Plain-text file helpers
//! - `settings`: Difficulty presets and runtime settings

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{FrameView, Game, Hud, Intent, Mode};
pub use highscores::ScoreLedger;
pub use settings::{Difficulty, DifficultySettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Simulation ticks per simulated second
    pub const TICK_RATE: u32 = 60;
    /// Nominal duration of one tick in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Scoring
    pub const POINTS_PER_SECOND: f32 = 10.0;
    pub const POINTS_PER_FLAG: u64 = 100;
    pub const POINTS_PER_RESCUE: u64 = 300;

    /// Difficulty ramp: escalate every N simulated seconds
    pub const DIFFICULTY_SCALE_INTERVAL_SECONDS: u64 = 10;
    /// Scroll speed growth per escalation (multiplicative)
    pub const SCROLL_SPEED_MULTIPLIER: f32 = 1.05;
    /// Spawn interval decay per escalation (multiplicative)
    pub const SPAWN_INTERVAL_MULTIPLIER: f32 = 0.93;
    /// Spawn interval floors (ticks)
    pub const MIN_OBSTACLE_INTERVAL: u32 = 15;
    pub const MIN_FLAG_INTERVAL: u32 = 20;

    /// Rescue targets: base cadence (~8s), grace period and scarcity
    pub const RESCUE_BASE_INTERVAL: u32 = 480;
    pub const MIN_RESCUE_INTERVAL: u32 = RESCUE_BASE_INTERVAL / 2;
    pub const RESCUE_GRACE_SECONDS: u64 = 5;
    pub const RESCUE_SPAWN_CHANCE: f64 = 0.85;
    /// Rescuees drift slightly slower than the slope
    pub const RESCUEE_SPEED_FACTOR: f32 = 0.9;

    /// Obstacles: share of trees (rest are rocks)
    pub const TREE_CHANCE: f64 = 0.7;
    /// Horizontal inset from the screen edges for spawned entities
    pub const SPAWN_INSET: f32 = 20.0;

    /// Collision footprints (width, height)
    pub const SKIER_SIZE: (f32, f32) = (40.0, 50.0);
    pub const OBSTACLE_SIZE: (f32, f32) = (32.0, 48.0);
    pub const FLAG_SIZE: (f32, f32) = (18.0, 36.0);
    pub const RESCUEE_SIZE: (f32, f32) = (30.0, 34.0);

    /// Skier horizontal speed (pixels per tick)
    pub const SKIER_MOVE_SPEED: f32 = 6.0;
    /// Gap between skier's feet and the bottom of the screen
    pub const SKIER_BOTTOM_MARGIN: f32 = 60.0;

    /// Score ledger
    pub const MAX_HIGH_SCORES: usize = 5;
    pub const HIGH_SCORE_FILE: &str = "highscores.txt";
}
