//! Arcade Sim - fixed-tick simulation core for two small arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, scoring)
//! - `game`: Session state machine and the boundary the UI layer drives
//! - `settings`: Tick intervals, key bindings and seed
//! - `autopilot`: Demo-mode player that feeds key events from a snapshot

pub mod autopilot;
pub mod game;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{KeyBindings, Settings, VariantSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (both games)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Tick intervals in milliseconds, per game
    pub const PONG_TICK_MS: u64 = 20;
    pub const SHOOTER_TICK_MS: u64 = 50;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 5.0;
    /// Distance from the arena side to the paddle's near edge
    pub const PADDLE_INSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Serve speed per axis (units/tick)
    pub const BALL_SERVE_SPEED: f32 = 5.0;
    /// Vertical speed cap applied after a paddle hit
    pub const BALL_MAX_VY: f32 = 10.0;

    /// First side to this many points wins
    pub const WIN_SCORE: u32 = 5;

    /// Turret rotation per key press (degrees)
    pub const TURRET_STEP_DEG: f32 = 10.0;
    /// Turret body radius (for rendering/snapshots)
    pub const TURRET_RADIUS: f32 = 20.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Target defaults
    pub const TARGET_SIZE: f32 = 20.0;
    pub const TARGET_MIN_SPEED: f32 = 3.0;
    pub const TARGET_MAX_SPEED: f32 = 6.0;
    /// Chance per tick that a new target appears
    pub const TARGET_SPAWN_CHANCE: f64 = 0.2;

    /// Bullet/target center distance that counts as a hit
    pub const HIT_RADIUS: f32 = 15.0;
    /// Target distance from the arena center that ends the run
    pub const CENTER_LOSS_RADIUS: f32 = 20.0;

    /// Points per target kind
    pub const CIRCLE_POINTS: u32 = 1;
    pub const SQUARE_POINTS: u32 = 5;
}

/// Arena center point
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading for an angle in degrees, in screen space (y grows downward)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
