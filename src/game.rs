//! Session state machine and UI boundary
//!
//! `Game` is what the render/UI layer talks to. It owns at most one
//! [`Session`] and the input controller:
//!
//! ```text
//! Start --start--> Playing --win/loss--> GameOver --restart--> Playing
//! ```
//!
//! The UI calls [`Game::on_tick`] on its timer (see
//! [`Game::tick_interval`]), forwards key events, and reads
//! [`Game::snapshot`] to draw.

use std::time::Duration;

use crate::settings::Settings;
use crate::sim::input::{Action, InputController, Key};
use crate::sim::scoring::Score;
use crate::sim::snapshot::Snapshot;
use crate::sim::state::{GameEvent, GameKind, GamePhase, Session};
use crate::sim::tick;

/// Seed stride between consecutive sessions of one game
const SESSION_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// One game, driven by the UI layer
#[derive(Debug)]
pub struct Game {
    kind: GameKind,
    tick_interval: Duration,
    input: InputController,
    /// `None` while on the start screen
    session: Option<Session>,
    base_seed: u64,
    sessions_started: u64,
}

impl Game {
    /// New game on its start screen
    pub fn new(kind: GameKind, settings: &Settings) -> Self {
        let variant = settings.variant(kind);
        let base_seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("{} ready (seed {}, tick {:?})", kind.title(), base_seed, variant.tick_interval());
        Self {
            kind,
            tick_interval: variant.tick_interval(),
            input: InputController::new(variant.keys.clone()),
            session: None,
            base_seed,
            sessions_started: 0,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// How often the driver should call `on_tick`
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn phase(&self) -> GamePhase {
        self.session.as_ref().map_or(GamePhase::Start, |s| s.phase)
    }

    pub fn score(&self) -> Option<Score> {
        self.session.as_ref().map(|s| s.score)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Direct session access for scripted setups
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Advance one frame. Does nothing outside of Playing.
    pub fn on_tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            tick::tick(session, &mut self.input);
        }
    }

    /// Forward a key press; unknown or unbound keys are ignored
    pub fn on_key_down(&mut self, key: Key) {
        let action = self.input.key_down(key);
        if self.phase() != GamePhase::Playing {
            // Turret commands only count during play
            self.input.discard_commands();
        }
        if action == Some(Action::Restart) {
            self.on_restart_command();
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Raw key-symbol variant of `on_key_down`
    pub fn on_keysym_down(&mut self, sym: &str) {
        match Key::from_keysym(sym) {
            Some(key) => self.on_key_down(key),
            None => log::trace!("Ignoring unknown key {:?}", sym),
        }
    }

    pub fn on_keysym_up(&mut self, sym: &str) {
        if let Some(key) = Key::from_keysym(sym) {
            self.on_key_up(key);
        }
    }

    /// Leave the start screen. Ignored in any other phase.
    pub fn on_start_command(&mut self) {
        if self.phase() != GamePhase::Start {
            log::debug!("Start ignored in {:?}", self.phase());
            return;
        }
        self.begin_session();
    }

    /// Begin a fresh session after a game over. Ignored in any other phase.
    pub fn on_restart_command(&mut self) {
        if self.phase() != GamePhase::GameOver {
            log::debug!("Restart ignored in {:?}", self.phase());
            return;
        }
        self.begin_session();
    }

    /// Events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session
            .as_mut()
            .map(|s| std::mem::take(&mut s.events))
            .unwrap_or_default()
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        match &self.session {
            Some(session) => Snapshot::of(session),
            None => Snapshot::start_screen(self.kind),
        }
    }

    fn begin_session(&mut self) {
        let seed = self
            .base_seed
            .wrapping_add(self.sessions_started.wrapping_mul(SESSION_SEED_STRIDE));
        self.sessions_started += 1;
        self.input.reset();
        // The old session and its entities are dropped here
        self.session = Some(Session::new(self.kind, seed));
        log::info!("{} session {} started (seed {})", self.kind.title(), self.sessions_started, seed);
    }
}
