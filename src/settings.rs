//! Difficulty presets and runtime settings
//!
//! Settings are persisted as JSON next to the executable; a missing or
//! unreadable file falls back to defaults.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{HIGH_SCORE_FILE, MAX_HIGH_SCORES, SIM_DT};
use crate::persistence;

/// Default settings file name
pub const SETTINGS_FILE: &str = "ski_patrol.json";

/// Difficulty tiers selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Immutable seed values for a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub label: &'static str,
    /// Pixels per tick
    pub scroll_speed: f32,
    /// Ticks between obstacle spawns
    pub obstacle_interval: u32,
    /// Ticks between flag spawns
    pub flag_interval: u32,
}

const EASY: DifficultySettings = DifficultySettings {
    label: "Easy",
    scroll_speed: 3.0,
    obstacle_interval: 70,
    flag_interval: 110,
};

const MEDIUM: DifficultySettings = DifficultySettings {
    label: "Medium",
    scroll_speed: 4.0,
    obstacle_interval: 55,
    flag_interval: 90,
};

const HARD: DifficultySettings = DifficultySettings {
    label: "Hard",
    scroll_speed: 5.0,
    obstacle_interval: 40,
    flag_interval: 70,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        self.preset().label
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Menu choice 1..=3
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn choice(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn preset(&self) -> &'static DifficultySettings {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the score ledger lives
    pub ledger_path: PathBuf,
    /// Number of ledger entries kept and shown
    pub ledger_limit: usize,
    /// Fixed seed for reproducible runs (random if unset)
    pub seed: Option<u64>,
    /// Upper bound on a single frame's dt (seconds)
    pub max_frame_dt: f32,
    /// Pace frames against the wall clock instead of stepping instantly
    pub realtime: bool,

    // === Headless demo ===
    /// Difficulty the demo autopilot selects
    pub demo_difficulty: Difficulty,
    /// Frames before the demo quits on its own
    pub demo_max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(HIGH_SCORE_FILE),
            ledger_limit: MAX_HIGH_SCORES,
            seed: None,
            max_frame_dt: 0.1,
            realtime: false,
            demo_difficulty: Difficulty::Medium,
            demo_max_frames: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Load from [`SETTINGS_FILE`] in the working directory
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        match Self::try_load_from(path.as_ref()) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist
    pub fn try_load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let text = persistence::read_text(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(text) = text else {
            return Ok(None);
        };
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(settings))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        persistence::write_atomic(path, &json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values that would break the simulation
    fn sanitized(mut self) -> Self {
        if !self.max_frame_dt.is_finite() || self.max_frame_dt < SIM_DT {
            self.max_frame_dt = Self::default().max_frame_dt;
        }
        self
    }
}
