//! Fixed tick simulation step
//!
//! One call advances a Playing session by exactly one frame:
//! input -> physics -> collisions -> scoring, then end-of-tick work (serves,
//! target spawns, removal sweep). A tick that ends the session flips the
//! phase before returning, and later ticks are no-ops until restart.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::entity::{Body, Entity, EntityId, TargetKind};
use super::input::InputController;
use super::physics;
use super::scoring::{self, Outcome};
use super::state::{GameEvent, GameKind, GamePhase, Session};
use crate::consts::*;

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &mut InputController) {
    if session.phase != GamePhase::Playing {
        return;
    }
    debug_assert_eq!(session.world.pending_removals(), 0, "previous tick left removals unswept");

    session.time_ticks += 1;

    input.apply(&mut session.world, &mut session.events);
    physics::step(&mut session.world, &session.arena);
    let report = collision::resolve(&mut session.world, &session.arena, &mut session.events);
    let outcome = scoring::apply(&mut session.score, &report, &mut session.events);

    match outcome {
        Some(outcome) => finish(session, outcome),
        None => {
            for &(ball_id, _) in &report.ball_exits {
                reserve_ball(session, ball_id);
            }
            if session.kind == GameKind::Shooter {
                maybe_spawn_target(session);
            }
        }
    }

    session.world.flush_removals();
}

/// End the session on this tick
fn finish(session: &mut Session, outcome: Outcome) {
    session.outcome = Some(outcome);
    session.phase = GamePhase::GameOver;
    log::info!(
        "{} over after {} ticks: {} ({})",
        session.kind.as_str(),
        session.time_ticks,
        session.message().unwrap_or_default(),
        session.score
    );
}

/// Put a ball back at the center with a fresh random serve
fn reserve_ball(session: &mut Session, ball_id: EntityId) {
    let vel = session.serve_velocity();
    let center = session.arena.center();
    if let Some(ball) = session.world.get_mut(ball_id) {
        debug_assert!(matches!(ball.body, Body::Ball));
        ball.pos = center;
        ball.vel = vel;
    }
}

/// Roll for a new target on a random arena edge
fn maybe_spawn_target(session: &mut Session) {
    if !session.rng.random_bool(TARGET_SPAWN_CHANCE) {
        return;
    }
    let (kind, speed, pos) = roll_target(session);
    let mut target = Entity::target(kind, speed, pos);
    target.vel = physics::homing_velocity(pos, session.arena.center(), speed);
    let id = session.world.add_entity(target);
    log::debug!("Spawned {:?} target {:?} at {} (speed {:.2})", kind, id, pos, speed);
    session.events.push(GameEvent::TargetSpawned { kind });
}

fn roll_target(session: &mut Session) -> (TargetKind, f32, Vec2) {
    let rng = &mut session.rng;
    let kind = if rng.random_bool(0.5) {
        TargetKind::Circle
    } else {
        TargetKind::Square
    };
    let speed = rng.random_range(TARGET_MIN_SPEED..=TARGET_MAX_SPEED);

    let (w, h) = (session.arena.width, session.arena.height);
    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..=w), 0.0),
        1 => Vec2::new(rng.random_range(0.0..=w), h),
        2 => Vec2::new(0.0, rng.random_range(0.0..=h)),
        _ => Vec2::new(w, rng.random_range(0.0..=h)),
    };
    (kind, speed, pos)
}
