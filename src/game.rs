//! Game mode machine
//!
//! Menu → Tutorial → Playing → GameOver, driven by abstract input intents.
//! Owns the active session and the score ledger; the ledger is only touched
//! on transitions into Menu (read) and GameOver (write, then read).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::highscores::ScoreLedger;
use crate::settings::{Difficulty, Settings};
use crate::sim::{Entity, GameEvent, SessionState, Skier, Steer, TickInput, TickOutcome, tick};

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Menu,
    Tutorial,
    Playing,
    GameOver,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Menu => "Menu",
            Mode::Tutorial => "Tutorial",
            Mode::Playing => "Playing",
            Mode::GameOver => "GameOver",
        }
    }
}

/// Device-independent player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Confirm,
    Cancel,
    Pause,
    /// Menu choice 1..=3
    SelectDifficulty(u8),
    Restart,
    ReturnToMenu,
    Quit,
}

/// HUD scalars for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub mode: Mode,
    pub paused: bool,
    pub difficulty: String,
    pub score: u64,
    pub lives: u8,
    pub rescued: u32,
    pub elapsed_seconds: u64,
    /// Ledger snapshot taken on entering Menu/GameOver
    pub top_scores: Vec<u64>,
    /// Final score beat the previous record (GameOver only)
    pub new_high_score: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub hud: Hud,
    pub skier: &'a Skier,
    pub entities: &'a [Entity],
    pub background_phase: f32,
}

/// The game: mode machine plus the current session
#[derive(Debug)]
pub struct Game {
    mode: Mode,
    running: bool,
    difficulty: Difficulty,
    session: SessionState,
    ledger: ScoreLedger,
    ledger_limit: usize,
    top_scores: Vec<u64>,
    new_high_score: bool,
    /// Steering requested for the next tick
    steer: Steer,
    /// Source of per-session seeds
    seeds: Pcg32,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game seed: {}", seed);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let difficulty = settings.demo_difficulty;
        let session = SessionState::new(difficulty, seeds.random());

        let mut game = Self {
            mode: Mode::Menu,
            running: true,
            difficulty,
            session,
            ledger: ScoreLedger::new(settings.ledger_path.clone()),
            ledger_limit: settings.ledger_limit,
            top_scores: Vec::new(),
            new_high_score: false,
            steer: Steer::None,
            seeds,
        };
        game.enter_menu();
        game
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// False once a quit intent has been handled
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session access for hosts and tests that script scenarios
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn top_scores(&self) -> &[u64] {
        &self.top_scores
    }

    /// Apply one intent. Intents that mean nothing in the current mode are
    /// ignored.
    pub fn handle_intent(&mut self, intent: Intent) {
        if !self.running {
            return;
        }

        match (self.mode, intent) {
            (_, Intent::Quit) => {
                log::info!("Quit requested in {}", self.mode.as_str());
                self.running = false;
            }

            (Mode::Menu, Intent::SelectDifficulty(choice)) => match Difficulty::from_choice(choice) {
                Some(difficulty) => {
                    self.difficulty = difficulty;
                    self.reset_session();
                    self.set_mode(Mode::Tutorial);
                }
                None => log::debug!("Ignoring difficulty choice {}", choice),
            },

            (Mode::Tutorial, Intent::Confirm) => self.set_mode(Mode::Playing),
            (Mode::Tutorial, Intent::Cancel) => self.enter_menu(),

            (Mode::Playing, Intent::Pause) => {
                self.session.paused = !self.session.paused;
                log::info!("{}", if self.session.paused { "Paused" } else { "Resumed" });
            }
            (Mode::Playing, Intent::Cancel) => {
                log::info!("Session abandoned at score {}", self.session.score);
                self.enter_menu();
            }
            (Mode::Playing, Intent::MoveLeft) => self.steer = Steer::Left,
            (Mode::Playing, Intent::MoveRight) => self.steer = Steer::Right,

            (Mode::GameOver, Intent::Restart) => {
                self.reset_session();
                self.set_mode(Mode::Tutorial);
            }
            (Mode::GameOver, Intent::ReturnToMenu | Intent::Cancel) => self.enter_menu(),

            (mode, intent) => log::debug!("Ignoring {:?} in {}", intent, mode.as_str()),
        }
    }

    /// Run one frame of simulation. Only advances while Playing.
    pub fn update(&mut self, dt: f32) -> TickOutcome {
        let steer = std::mem::take(&mut self.steer);
        if self.mode != Mode::Playing || !self.running {
            return TickOutcome::Paused;
        }

        let outcome = tick(&mut self.session, &TickInput { steer }, dt);
        if outcome.is_game_over() {
            self.enter_game_over();
        }
        outcome
    }

    /// One fixed-duration frame; convenience for hosts without a clock
    pub fn step(&mut self) -> TickOutcome {
        self.update(SIM_DT)
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            mode: self.mode,
            paused: self.session.paused,
            difficulty: self.difficulty.as_str().to_string(),
            score: self.session.score,
            lives: self.session.lives,
            rescued: self.session.rescued_count,
            elapsed_seconds: self.session.elapsed_seconds,
            top_scores: self.top_scores.clone(),
            new_high_score: self.new_high_score,
        }
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            hud: self.hud(),
            skier: &self.session.skier,
            entities: &self.session.entities,
            background_phase: self.session.background_phase,
        }
    }

    fn reset_session(&mut self) {
        self.session = SessionState::new(self.difficulty, self.seeds.random());
        self.steer = Steer::None;
        self.new_high_score = false;
        log::info!("New session on {}", self.difficulty.as_str());
    }

    fn enter_menu(&mut self) {
        self.session.paused = false;
        self.new_high_score = false;
        self.top_scores = self.ledger.load(self.ledger_limit);
        self.set_mode(Mode::Menu);
    }

    fn enter_game_over(&mut self) {
        let score = self.session.score;
        self.new_high_score = self.ledger.is_new_high(score);
        self.ledger.save(score, self.ledger_limit);
        self.top_scores = self.ledger.load(self.ledger_limit);
        log::info!(
            "Game over: score {} rescued {}{}",
            score,
            self.session.rescued_count,
            if self.new_high_score { " (new high score)" } else { "" }
        );
        self.set_mode(Mode::GameOver);
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::info!("Mode {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
    }
}
