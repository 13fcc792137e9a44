//! Collision detection and response
//!
//! Runs once per tick after integration. Box tests for Pong, center-distance
//! tests for the shooter. Entity deaths go through `World::remove_entity`, so
//! a target already hit this tick cannot be hit (or scored) again.

use glam::Vec2;

use super::entity::{Body, EntityId, EntityKind, Side, TargetKind};
use super::geometry::{Aabb, within_radius};
use super::state::GameEvent;
use super::world::{Arena, World};
use crate::consts::{BALL_MAX_VY, CENTER_LOSS_RADIUS, HIT_RADIUS};

/// Everything scoring needs to know about this tick's contacts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Balls that left the arena, with the side that scores
    pub ball_exits: Vec<(EntityId, Side)>,
    /// Targets destroyed by bullets (one entry per destroyed target)
    pub targets_hit: Vec<TargetKind>,
    /// A target reached the center
    pub center_breached: bool,
}

/// Resolve all contacts for this tick
pub fn resolve(world: &mut World, arena: &Arena, events: &mut Vec<GameEvent>) -> CollisionReport {
    let mut report = CollisionReport::default();
    resolve_ball_contacts(world, arena, events, &mut report);
    remove_stray_bullets(world, arena);
    resolve_bullet_hits(world, events, &mut report);
    report.center_breached = check_center_breach(world, arena);
    report
}

/// Ball vs walls, paddles, and side exits
fn resolve_ball_contacts(
    world: &mut World,
    arena: &Arena,
    events: &mut Vec<GameEvent>,
    report: &mut CollisionReport,
) {
    let paddles: Vec<(Side, Aabb, i8)> = world
        .entities_of_kind(EntityKind::Paddle)
        .filter_map(|e| e.as_paddle().map(|p| (p.side, e.aabb(), p.move_intent)))
        .collect();

    for ball in world.iter_alive_mut() {
        if !matches!(ball.body, Body::Ball) {
            continue;
        }
        let bounds = ball.aabb();

        if bounds.top() <= 0.0 || bounds.bottom() >= arena.height {
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::WallBounce);
        }

        // Only a paddle the ball is moving toward can be hit
        for &(side, paddle_box, intent) in &paddles {
            let approaching = match side {
                Side::Left => ball.vel.x < 0.0,
                Side::Right => ball.vel.x > 0.0,
            };
            if approaching && bounds.overlaps(&paddle_box) {
                ball.vel = paddle_bounce(ball.vel, side, intent);
                events.push(GameEvent::PaddleHit { side });
                break;
            }
        }

        if bounds.left() <= 0.0 {
            report.ball_exits.push((ball.id, Side::Right));
        } else if bounds.right() >= arena.width {
            report.ball_exits.push((ball.id, Side::Left));
        }
    }
}

/// Ball velocity after hitting a paddle: face away from the paddle, pick up
/// the paddle's intent as spin, and cap the vertical speed.
pub fn paddle_bounce(vel: Vec2, side: Side, intent: i8) -> Vec2 {
    let vx = match side {
        Side::Left => vel.x.abs(),
        Side::Right => -vel.x.abs(),
    };
    let vy = (vel.y + f32::from(intent)).clamp(-BALL_MAX_VY, BALL_MAX_VY);
    Vec2::new(vx, vy)
}

/// Bullets whose center left the arena
fn remove_stray_bullets(world: &mut World, arena: &Arena) {
    let strays: Vec<EntityId> = world
        .entities_of_kind(EntityKind::Bullet)
        .filter(|b| !arena.contains(b.pos))
        .map(|b| b.id)
        .collect();
    for id in strays {
        world.remove_entity(id);
    }
}

/// Bullet vs target. Each colliding pair kills both; a bullet may take out
/// several targets in one tick, a target only scores once.
fn resolve_bullet_hits(world: &mut World, events: &mut Vec<GameEvent>, report: &mut CollisionReport) {
    let bullets: Vec<(EntityId, Vec2)> = world
        .entities_of_kind(EntityKind::Bullet)
        .map(|b| (b.id, b.pos))
        .collect();
    let targets: Vec<(EntityId, Vec2, TargetKind)> = world
        .entities_of_kind(EntityKind::Target)
        .filter_map(|t| t.as_target().map(|data| (t.id, t.pos, data.kind)))
        .collect();

    for &(bullet_id, bullet_pos) in &bullets {
        for &(target_id, target_pos, kind) in &targets {
            if !within_radius(bullet_pos, target_pos, HIT_RADIUS) {
                continue;
            }
            // Already destroyed by an earlier bullet this tick
            if !world.remove_entity(target_id) {
                continue;
            }
            world.remove_entity(bullet_id);
            report.targets_hit.push(kind);
            events.push(GameEvent::TargetDestroyed {
                kind,
                points: kind.points(),
            });
        }
    }
}

/// Any surviving target within the loss radius of the center
fn check_center_breach(world: &World, arena: &Arena) -> bool {
    let center = arena.center();
    world
        .entities_of_kind(EntityKind::Target)
        .any(|t| within_radius(t.pos, center, CENTER_LOSS_RADIUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;
    use proptest::prelude::*;

    fn resolve_once(world: &mut World) -> (CollisionReport, Vec<GameEvent>) {
        let mut events = Vec::new();
        let report = resolve(world, &Arena::default(), &mut events);
        (report, events)
    }

    #[test]
    fn test_ball_reflects_off_top_wall() {
        let mut world = World::new();
        let id = world.add_entity(Entity::ball(Vec2::new(400.0, 10.0), Vec2::new(5.0, -5.0)));
        let (_, events) = resolve_once(&mut world);
        assert_eq!(world.get(id).map(|b| b.vel), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_wall_bounce_does_not_cap_vy() {
        let mut world = World::new();
        let id = world.add_entity(Entity::ball(Vec2::new(400.0, 595.0), Vec2::new(5.0, 12.0)));
        resolve_once(&mut world);
        assert_eq!(world.get(id).map(|b| b.vel.y), Some(-12.0));
    }

    #[test]
    fn test_left_paddle_hit_adds_spin() {
        let mut world = World::new();
        let paddle = world.add_entity(Entity::paddle(Side::Left));
        if let Some(Body::Paddle(p)) = world.get_mut(paddle).map(|e| &mut e.body) {
            p.move_intent = 1;
        }
        let ball = world.add_entity(Entity::ball(Vec2::new(68.0, 300.0), Vec2::new(-5.0, 5.0)));
        let (_, events) = resolve_once(&mut world);
        assert_eq!(world.get(ball).map(|b| b.vel), Some(Vec2::new(5.0, 6.0)));
        assert_eq!(events, vec![GameEvent::PaddleHit { side: Side::Left }]);
    }

    #[test]
    fn test_paddle_ignored_when_ball_moving_away() {
        let mut world = World::new();
        world.add_entity(Entity::paddle(Side::Right));
        let ball = world.add_entity(Entity::ball(Vec2::new(735.0, 300.0), Vec2::new(-5.0, 5.0)));
        let (_, events) = resolve_once(&mut world);
        assert_eq!(world.get(ball).map(|b| b.vel), Some(Vec2::new(-5.0, 5.0)));
        assert!(events.is_empty());
    }

    #[test]
    fn test_ball_exit_reports_scoring_side() {
        let mut world = World::new();
        let left_exit = world.add_entity(Entity::ball(Vec2::new(8.0, 300.0), Vec2::new(-5.0, 5.0)));
        let right_exit = world.add_entity(Entity::ball(Vec2::new(792.0, 300.0), Vec2::new(5.0, 5.0)));
        let (report, _) = resolve_once(&mut world);
        assert_eq!(report.ball_exits, vec![(left_exit, Side::Right), (right_exit, Side::Left)]);
    }

    #[test]
    fn test_stray_bullet_removed() {
        let mut world = World::new();
        let id = world.add_entity(Entity::bullet(Vec2::new(805.0, 300.0), 0.0));
        resolve_once(&mut world);
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_stray_bullet_cannot_hit_target() {
        let mut world = World::new();
        let bullet = world.add_entity(Entity::bullet(Vec2::new(805.0, 300.0), 0.0));
        let target = world.add_entity(Entity::target(TargetKind::Circle, 3.0, Vec2::new(795.0, 300.0)));
        let (report, events) = resolve_once(&mut world);
        assert!(report.targets_hit.is_empty());
        assert!(events.is_empty());
        assert!(!world.is_alive(bullet));
        assert!(world.is_alive(target));
    }

    #[test]
    fn test_bullet_hits_target() {
        let mut world = World::new();
        let bullet = world.add_entity(Entity::bullet(Vec2::new(100.0, 100.0), 0.0));
        let target = world.add_entity(Entity::target(TargetKind::Square, 4.0, Vec2::new(110.0, 100.0)));
        let (report, events) = resolve_once(&mut world);
        assert!(!world.is_alive(bullet));
        assert!(!world.is_alive(target));
        assert_eq!(report.targets_hit, vec![TargetKind::Square]);
        assert_eq!(events, vec![GameEvent::TargetDestroyed {
            kind: TargetKind::Square,
            points: 5,
        }]);
    }

    #[test]
    fn test_target_hit_by_two_bullets_counts_once() {
        let mut world = World::new();
        world.add_entity(Entity::bullet(Vec2::new(100.0, 100.0), 0.0));
        world.add_entity(Entity::bullet(Vec2::new(104.0, 100.0), 0.0));
        world.add_entity(Entity::target(TargetKind::Circle, 4.0, Vec2::new(110.0, 100.0)));
        let (report, _) = resolve_once(&mut world);
        assert_eq!(report.targets_hit, vec![TargetKind::Circle]);
    }

    #[test]
    fn test_one_bullet_two_targets_scores_both() {
        let mut world = World::new();
        world.add_entity(Entity::bullet(Vec2::new(100.0, 100.0), 0.0));
        world.add_entity(Entity::target(TargetKind::Circle, 4.0, Vec2::new(110.0, 100.0)));
        world.add_entity(Entity::target(TargetKind::Square, 4.0, Vec2::new(90.0, 100.0)));
        let (report, _) = resolve_once(&mut world);
        assert_eq!(report.targets_hit, vec![TargetKind::Circle, TargetKind::Square]);
    }

    #[test]
    fn test_dead_entities_do_not_collide() {
        let mut world = World::new();
        let bullet = world.add_entity(Entity::bullet(Vec2::new(100.0, 100.0), 0.0));
        world.add_entity(Entity::target(TargetKind::Circle, 4.0, Vec2::new(105.0, 100.0)));
        world.remove_entity(bullet);
        let (report, _) = resolve_once(&mut world);
        assert!(report.targets_hit.is_empty());
    }

    #[test]
    fn test_center_breach() {
        let mut world = World::new();
        world.add_entity(Entity::target(TargetKind::Circle, 4.0, Vec2::new(415.0, 300.0)));
        let (report, _) = resolve_once(&mut world);
        assert!(report.center_breached);
    }

    #[test]
    fn test_destroyed_target_cannot_breach() {
        let mut world = World::new();
        world.add_entity(Entity::bullet(Vec2::new(405.0, 300.0), 0.0));
        world.add_entity(Entity::target(TargetKind::Circle, 4.0, Vec2::new(410.0, 300.0)));
        let (report, _) = resolve_once(&mut world);
        assert_eq!(report.targets_hit.len(), 1);
        assert!(!report.center_breached);
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_caps_vy(
            vx in -20.0f32..20.0,
            vy in -10.0f32..=10.0,
            intents in proptest::collection::vec(-1i8..=1, 1..64),
            left in any::<bool>(),
        ) {
            let mut vel = Vec2::new(vx, vy);
            let side = if left { Side::Left } else { Side::Right };
            for intent in intents {
                vel = paddle_bounce(vel, side, intent);
                prop_assert!(vel.y.abs() <= BALL_MAX_VY);
            }
        }
    }
}
