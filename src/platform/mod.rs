//! Platform abstraction layer
//!
//! The core never talks to devices directly. A host supplies:
//! - an [`InputSource`] that turns device state into [`Intent`]s
//! - a [`RenderSurface`] that draws a [`FrameView`]
//! - a [`FrameClock`] that paces frames and reports real frame time
//!
//! [`run`] ties them together: poll → apply intents → one tick → render.

pub mod input;
pub mod time;

pub use input::{Autopilot, ScriptedInput};
pub use time::{FixedStep, Realtime};

use crate::game::{FrameView, Game, Intent};
use crate::sim::GameEvent;

/// Produces intents for the coming frame
pub trait InputSource {
    /// Push this frame's intents, in the order they happened
    fn poll(&mut self, frame: &FrameView<'_>, out: &mut Vec<Intent>);
}

/// Draws a frame
pub trait RenderSurface {
    fn present(&mut self, frame: &FrameView<'_>, events: &[GameEvent]);
}

/// Paces the loop
pub trait FrameClock {
    /// Block until the next frame boundary; returns elapsed seconds
    fn next_frame(&mut self) -> f32;
}

/// Summary of a finished [`run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub ticks: u64,
    pub games_over: u32,
}

/// Drive the game until a quit intent is handled.
///
/// Frame time is clamped to `max_frame_dt` so a stall never produces a
/// huge score jump.
pub fn run(
    game: &mut Game,
    input: &mut impl InputSource,
    surface: &mut impl RenderSurface,
    clock: &mut impl FrameClock,
    max_frame_dt: f32,
) -> RunStats {
    let mut stats = RunStats::default();
    let mut pending = Vec::new();

    while game.is_running() {
        let dt = clock.next_frame().clamp(0.0, max_frame_dt);
        stats.frames += 1;

        input.poll(&game.frame(), &mut pending);
        for intent in pending.drain(..) {
            game.handle_intent(intent);
        }
        if !game.is_running() {
            break;
        }

        let ticks_before = game.session().frame_count();
        let outcome = game.update(dt);
        if game.session().frame_count() > ticks_before {
            stats.ticks += 1;
        }
        if outcome.is_game_over() {
            stats.games_over += 1;
        }

        let events = game.drain_events();
        surface.present(&game.frame(), &events);
    }

    log::info!(
        "Host loop finished after {} frames ({} ticks, {} game overs)",
        stats.frames,
        stats.ticks,
        stats.games_over
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Hud, Mode};
    use crate::settings::Settings;

    #[derive(Default)]
    struct Recorder {
        huds: Vec<Hud>,
        events: usize,
    }

    impl RenderSurface for Recorder {
        fn present(&mut self, frame: &FrameView<'_>, events: &[GameEvent]) {
            self.huds.push(frame.hud.clone());
            self.events += events.len();
        }
    }

    fn game_in(dir: &tempfile::TempDir) -> Game {
        Game::new(&Settings {
            ledger_path: dir.path().join("scores.txt"),
            seed: Some(11),
            ..Default::default()
        })
    }

    #[test]
    fn test_scripted_session_through_modes() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(&dir);
        let mut input = ScriptedInput::new(vec![
            (0, Intent::SelectDifficulty(1)),
            (1, Intent::Confirm),
            (50, Intent::Pause),
            (60, Intent::Pause),
            (100, Intent::Cancel),
            (101, Intent::Quit),
        ]);
        let mut surface = Recorder::default();
        let mut clock = FixedStep::default();

        let stats = run(&mut game, &mut input, &mut surface, &mut clock, 0.1);

        // Frame 101 quits before rendering
        assert_eq!(stats.frames, 102);
        assert_eq!(surface.huds.len(), 101);
        // Ticks on frames 1..=99 except the 10 paused ones
        assert_eq!(stats.ticks, 89);
        assert_eq!(surface.huds[0].mode, Mode::Tutorial);
        assert_eq!(surface.huds[1].mode, Mode::Playing);
        assert!(surface.huds[55].paused);
        assert_eq!(surface.huds[100].mode, Mode::Menu);
        assert!(surface.events > 0);
        assert!(!game.is_running());
    }

    #[test]
    fn test_frame_dt_is_clamped() {
        struct Stall;
        impl FrameClock for Stall {
            fn next_frame(&mut self) -> f32 {
                30.0
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(&dir);
        let mut input = ScriptedInput::new(vec![
            (0, Intent::SelectDifficulty(2)),
            (0, Intent::Confirm),
            (1, Intent::Quit),
        ]);
        let mut surface = Recorder::default();

        run(&mut game, &mut input, &mut surface, &mut Stall, 0.5);

        // One tick at 0.5s: floor(10 * 0.5)
        assert_eq!(game.session().score, 5);
    }

    #[test]
    fn test_autopilot_plays_to_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(&dir);
        let mut pilot = Autopilot::new(crate::settings::Difficulty::Hard, 60 * 60 * 20);
        let mut surface = Recorder::default();
        let mut clock = FixedStep::default();

        let stats = run(&mut game, &mut pilot, &mut surface, &mut clock, 0.1);

        assert!(!game.is_running());
        assert!(stats.ticks > 0);
        if stats.games_over == 1 {
            assert_eq!(game.mode(), Mode::GameOver);
            assert_eq!(game.top_scores().len(), 1);
        } else {
            assert_eq!(stats.frames, 60 * 60 * 20);
        }
    }
}
