//! Physics stepper
//!
//! Owns position/velocity writes during the integration phase. Units are per
//! tick; there is no dt.

use super::entity::Body;
use super::world::{Arena, World};
use crate::consts::PADDLE_SPEED;

/// Advance every live entity by one tick.
///
/// - Paddles move by `move_intent * PADDLE_SPEED` and are clamped to the arena
///   vertically by direct correction.
/// - Targets re-aim at the arena center before moving (homing).
/// - Balls and bullets move freely; leaving the arena is handled downstream.
/// - The turret never moves.
pub fn step(world: &mut World, arena: &Arena) {
    let center = arena.center();

    for entity in world.iter_alive_mut() {
        match entity.body {
            Body::Paddle(paddle) => {
                entity.vel.x = 0.0;
                entity.vel.y = f32::from(paddle.move_intent) * PADDLE_SPEED;
                entity.pos += entity.vel;
                let half_h = entity.shape.half_extents().y;
                entity.pos.y = entity.pos.y.clamp(half_h, arena.height - half_h);
            }
            Body::Target(target) => {
                entity.vel = homing_velocity(entity.pos, center, target.speed);
                entity.pos += entity.vel;
            }
            Body::Ball | Body::Bullet => {
                entity.pos += entity.vel;
            }
            Body::Turret(_) => {}
        }
    }
}

/// Velocity of length `speed` pointing from `from` toward `to`.
/// Zero when already at the destination.
pub fn homing_velocity(from: glam::Vec2, to: glam::Vec2, speed: f32) -> glam::Vec2 {
    (to - from).normalize_or_zero() * speed
}
