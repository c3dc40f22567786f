//! Built-in input sources
//!
//! Device bindings live in the host; these sources exist for replays,
//! tests and the headless demo.

use std::collections::VecDeque;

use super::InputSource;
use crate::consts::*;
use crate::game::{FrameView, Intent, Mode};
use crate::settings::Difficulty;
use crate::sim::{Entity, EntityKind};

/// Replays intents at fixed frame indices (0-based poll count)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, Intent)>,
    frame: u64,
}

impl ScriptedInput {
    /// `script` entries are `(frame, intent)`; they are sorted by frame,
    /// keeping the given order within a frame.
    pub fn new(mut script: Vec<(u64, Intent)>) -> Self {
        script.sort_by_key(|(frame, _)| *frame);
        Self {
            script: script.into(),
            frame: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _frame: &FrameView<'_>, out: &mut Vec<Intent>) {
        while let Some(&(at, intent)) = self.script.front() {
            if at > self.frame {
                break;
            }
            out.push(intent);
            self.script.pop_front();
        }
        self.frame += 1;
    }
}

/// How far ahead (pixels above the skier) the autopilot looks for trouble
const LOOKAHEAD: f32 = 240.0;
/// Extra clearance on each side of the skier when judging a threat
const CLEARANCE: f32 = 12.0;

/// Demo player: picks a difficulty, skips the tutorial, dodges obstacles,
/// chases flags and rescuees, and quits at game over or after a frame cap.
#[derive(Debug, Clone)]
pub struct Autopilot {
    difficulty: Difficulty,
    max_frames: u64,
    frames: u64,
}

impl Autopilot {
    pub fn new(difficulty: Difficulty, max_frames: u64) -> Self {
        Self {
            difficulty,
            max_frames,
            frames: 0,
        }
    }

    fn steer(&self, frame: &FrameView<'_>) -> Option<Intent> {
        let skier = frame.skier.footprint();
        let skier_x = frame.skier.pos.x;
        let ahead = |e: &&Entity| {
            let fp = e.footprint();
            fp.min.y < skier.max.y && skier.min.y - fp.max.y < LOOKAHEAD
        };

        // Closest obstacle in (or near) our lane
        let threat = frame
            .entities
            .iter()
            .filter(ahead)
            .filter(|e| e.kind.is_obstacle())
            .filter(|e| {
                let fp = e.footprint();
                fp.min.x < skier.max.x + CLEARANCE && fp.max.x > skier.min.x - CLEARANCE
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(obstacle) = threat {
            let half_w = frame.skier.size.x / 2.0;
            let pinned_left = skier_x - half_w <= SKIER_MOVE_SPEED;
            let pinned_right = skier_x + half_w >= SCREEN_WIDTH - SKIER_MOVE_SPEED;
            let go_left = if pinned_left {
                false
            } else if pinned_right {
                true
            } else {
                obstacle.pos.x >= skier_x
            };
            return Some(if go_left { Intent::MoveLeft } else { Intent::MoveRight });
        }

        // Lane is clear: chase the nearest pickup, rescuees first
        let target_x = frame
            .entities
            .iter()
            .filter(ahead)
            .filter(|e| !e.kind.is_obstacle())
            .max_by(|a, b| {
                let rank = |e: &Entity| (e.kind == EntityKind::Rescuee) as u8;
                rank(*a).cmp(&rank(*b)).then(a.pos.y.total_cmp(&b.pos.y))
            })
            .map(|e| e.pos.x)
            .unwrap_or(SCREEN_WIDTH / 2.0);

        let dx = target_x - skier_x;
        if dx.abs() <= SKIER_MOVE_SPEED {
            None
        } else if dx < 0.0 {
            Some(Intent::MoveLeft)
        } else {
            Some(Intent::MoveRight)
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: &FrameView<'_>, out: &mut Vec<Intent>) {
        self.frames += 1;
        if self.frames >= self.max_frames {
            out.push(Intent::Quit);
            return;
        }

        match frame.hud.mode {
            Mode::Menu => out.push(Intent::SelectDifficulty(self.difficulty.choice())),
            Mode::Tutorial => out.push(Intent::Confirm),
            Mode::Playing if frame.hud.paused => out.push(Intent::Pause),
            Mode::Playing => out.extend(self.steer(frame)),
            Mode::GameOver => out.push(Intent::Quit),
        }
    }
}
