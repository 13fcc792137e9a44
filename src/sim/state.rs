//! Session state and core simulation types
//!
//! A `Session` is one run of one game: arena, live entities, score and the
//! RNG that feeds serves and target spawns. Restarting builds a new one.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Side, TargetKind};
use super::scoring::{Outcome, Score};
use super::world::{Arena, World};
use crate::consts::*;

/// Which game is being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Two paddles, one ball, first to five
    Pong,
    /// Center turret against homing targets
    Shooter,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Pong => "pong",
            GameKind::Shooter => "shooter",
        }
    }

    /// Default interval between ticks
    pub fn tick_interval(&self) -> Duration {
        match self {
            GameKind::Pong => Duration::from_millis(PONG_TICK_MS),
            GameKind::Shooter => Duration::from_millis(SHOOTER_TICK_MS),
        }
    }

    /// Title shown on the start screen
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Pong => "Pong Game",
            GameKind::Shooter => "Shooting Game",
        }
    }
}

/// Presentation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Start screen, no session
    Start,
    /// Tick loop active
    Playing,
    /// Tick loop halted until restart
    GameOver,
}

/// Things that happened during a tick, for sound/flash hooks in the UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    WallBounce,
    PaddleHit { side: Side },
    Scored { side: Side },
    BulletFired,
    TargetSpawned { kind: TargetKind },
    TargetDestroyed { kind: TargetKind, points: u32 },
    Won { side: Side },
    Lost,
}

/// One run of a game
#[derive(Debug, Clone)]
pub struct Session {
    pub kind: GameKind,
    pub arena: Arena,
    pub world: World,
    pub score: Score,
    pub phase: GamePhase,
    /// Set when the session ends
    pub outcome: Option<Outcome>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seed the RNG was built from
    pub seed: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Fresh session in the Playing phase with the starting layout
    pub fn new(kind: GameKind, seed: u64) -> Self {
        let mut session = Self {
            kind,
            arena: Arena::default(),
            world: World::new(),
            score: Score::new(kind),
            phase: GamePhase::Playing,
            outcome: None,
            time_ticks: 0,
            seed,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        match kind {
            GameKind::Pong => {
                session.world.add_entity(Entity::paddle(Side::Left));
                session.world.add_entity(Entity::paddle(Side::Right));
                let vel = session.serve_velocity();
                session
                    .world
                    .add_entity(Entity::ball(session.arena.center(), vel));
            }
            GameKind::Shooter => {
                session.world.add_entity(Entity::turret(session.arena.center()));
            }
        }

        session
    }

    /// Random diagonal serve: (+-5, +-5)
    pub fn serve_velocity(&mut self) -> Vec2 {
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Vec2::new(sx, sy) * BALL_SERVE_SPEED
    }

    /// Terminal text for the game-over screen
    pub fn message(&self) -> Option<String> {
        match self.outcome? {
            Outcome::Won(side) => Some(format!("{} player wins!", side.as_str())),
            Outcome::Lost => Some("GAME OVER".to_string()),
        }
    }

    /// Hint shown under the terminal message
    pub fn restart_hint(&self) -> Option<&'static str> {
        match (self.phase, self.kind) {
            (GamePhase::GameOver, GameKind::Pong) => Some("Press 'R' to restart"),
            (GamePhase::GameOver, GameKind::Shooter) => Some("Play again"),
            _ => None,
        }
    }

    /// Turret angle, if this session has one
    pub fn turret_angle(&self) -> Option<f32> {
        self.world
            .entities_of_kind(EntityKind::Turret)
            .find_map(|e| e.as_turret().map(|t| t.angle))
    }
}
