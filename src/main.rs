//! Ski Patrol entry point
//!
//! Headless demo: loads settings, lets the autopilot play one session through
//! the host loop, and prints the final HUD as JSON. Rendering is left to
//! real front ends; here frames are only logged.

use ski_patrol::game::{FrameView, Mode};
use ski_patrol::platform::{self, Autopilot, FixedStep, Realtime, RenderSurface};
use ski_patrol::sim::GameEvent;
use ski_patrol::{Game, Settings};

/// Logs mode changes, game events and a once-per-second HUD line
#[derive(Default)]
struct LogSurface {
    last_mode: Option<Mode>,
    last_second: u64,
}

impl RenderSurface for LogSurface {
    fn present(&mut self, frame: &FrameView<'_>, events: &[GameEvent]) {
        let hud = &frame.hud;
        if self.last_mode != Some(hud.mode) {
            log::info!("[{}] top scores: {:?}", hud.mode.as_str(), hud.top_scores);
            self.last_mode = Some(hud.mode);
            self.last_second = 0;
        }

        for event in events {
            match event {
                GameEvent::Spawned { .. } => log::trace!("{:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }

        if hud.mode == Mode::Playing && hud.elapsed_seconds > self.last_second {
            self.last_second = hud.elapsed_seconds;
            log::info!(
                "t={}s score={} lives={} rescued={} on screen={}",
                hud.elapsed_seconds,
                hud.score,
                hud.lives,
                hud.rescued,
                frame.entities.len()
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ski Patrol (headless) starting...");

    let settings = Settings::load();
    let mut game = Game::new(&settings);
    let mut pilot = Autopilot::new(settings.demo_difficulty, settings.demo_max_frames);
    let mut surface = LogSurface::default();

    let stats = if settings.realtime {
        platform::run(
            &mut game,
            &mut pilot,
            &mut surface,
            &mut Realtime::default(),
            settings.max_frame_dt,
        )
    } else {
        platform::run(
            &mut game,
            &mut pilot,
            &mut surface,
            &mut FixedStep::default(),
            settings.max_frame_dt,
        )
    };

    log::info!("Ran {} frames ({} ticks)", stats.frames, stats.ticks);
    match serde_json::to_string_pretty(&game.hud()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}
