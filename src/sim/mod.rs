//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick, units per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionReport, paddle_bounce};
pub use entity::{Body, Entity, EntityId, EntityKind, Paddle, Side, Target, TargetKind, Turret};
pub use geometry::{Aabb, Shape};
pub use input::{Action, Command, InputController, Key};
pub use scoring::{Outcome, Score};
pub use snapshot::{EntityView, Snapshot};
pub use state::{GameEvent, GameKind, GamePhase, Session};
pub use tick::tick;
pub use world::{Arena, World};
