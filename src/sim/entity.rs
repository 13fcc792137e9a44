//! Entity types for both games
//!
//! Every entity shares position/velocity/shape/alive; the variant-specific
//! data lives in [`Body`] so the collision code can match exhaustively.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Shape};
use crate::consts::*;

/// Stable per-session entity identifier (ascending = spawn order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Entity kind tag, used for queries and snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Paddle,
    Ball,
    Turret,
    Bullet,
    Target,
}

/// Which side of the Pong arena a paddle or point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Target flavor; decides the point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Circle,
    Square,
}

impl TargetKind {
    pub fn points(self) -> u32 {
        match self {
            TargetKind::Circle => CIRCLE_POINTS,
            TargetKind::Square => SQUARE_POINTS,
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            TargetKind::Circle => Shape::Circle {
                radius: TARGET_SIZE / 2.0,
            },
            TargetKind::Square => Shape::Rect {
                width: TARGET_SIZE,
                height: TARGET_SIZE,
            },
        }
    }
}

/// A player paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// -1 = up, 0 = still, 1 = down; written by input, read by physics
    pub move_intent: i8,
}

/// The shooter's rotating turret
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    /// Firing angle in degrees, [0, 360)
    pub angle: f32,
}

/// A homing target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    /// Fixed speed, units/tick
    pub speed: f32,
}

/// Variant data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Body {
    Paddle(Paddle),
    Ball,
    Turret(Turret),
    Bullet,
    Target(Target),
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Center position
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub shape: Shape,
    pub alive: bool,
    pub body: Body,
}

impl Entity {
    /// Build an entity; the world assigns the real id on insertion
    pub fn new(body: Body, pos: Vec2, vel: Vec2, shape: Shape) -> Self {
        Self {
            id: EntityId(0),
            pos,
            vel,
            shape,
            alive: true,
            body,
        }
    }

    pub fn paddle(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET + PADDLE_WIDTH / 2.0,
            Side::Right => ARENA_WIDTH - PADDLE_INSET - PADDLE_WIDTH / 2.0,
        };
        Self::new(
            Body::Paddle(Paddle {
                side,
                move_intent: 0,
            }),
            Vec2::new(x, ARENA_HEIGHT / 2.0),
            Vec2::ZERO,
            Shape::Rect {
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
        )
    }

    pub fn ball(pos: Vec2, vel: Vec2) -> Self {
        Self::new(Body::Ball, pos, vel, Shape::Circle {
            radius: BALL_RADIUS,
        })
    }

    pub fn turret(pos: Vec2) -> Self {
        Self::new(Body::Turret(Turret { angle: 0.0 }), pos, Vec2::ZERO, Shape::Circle {
            radius: TURRET_RADIUS,
        })
    }

    /// Bullet leaving `origin` along `angle` (degrees)
    pub fn bullet(origin: Vec2, angle: f32) -> Self {
        Self::new(
            Body::Bullet,
            origin,
            crate::heading(angle) * BULLET_SPEED,
            Shape::Circle {
                radius: BULLET_RADIUS,
            },
        )
    }

    /// Target at `pos`; velocity is set by the stepper each tick
    pub fn target(kind: TargetKind, speed: f32, pos: Vec2) -> Self {
        Self::new(Body::Target(Target { kind, speed }), pos, Vec2::ZERO, kind.shape())
    }

    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Paddle(_) => EntityKind::Paddle,
            Body::Ball => EntityKind::Ball,
            Body::Turret(_) => EntityKind::Turret,
            Body::Bullet => EntityKind::Bullet,
            Body::Target(_) => EntityKind::Target,
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.shape.aabb_at(self.pos)
    }

    /// Paddle data, if this is a paddle
    pub fn as_paddle(&self) -> Option<&Paddle> {
        match &self.body {
            Body::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_turret(&self) -> Option<&Turret> {
        match &self.body {
            Body::Turret(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_target(&self) -> Option<&Target> {
        match &self.body {
            Body::Target(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_layout() {
        let left = Entity::paddle(Side::Left).aabb();
        assert_eq!((left.left(), left.right()), (50.0, 60.0));
        assert_eq!((left.top(), left.bottom()), (250.0, 350.0));

        let right = Entity::paddle(Side::Right).aabb();
        assert_eq!((right.left(), right.right()), (740.0, 750.0));
    }

    #[test]
    fn test_bullet_velocity_follows_angle() {
        let bullet = Entity::bullet(Vec2::new(400.0, 300.0), 0.0);
        assert!((bullet.vel - Vec2::new(10.0, 0.0)).length() < 1e-5);

        let bullet = Entity::bullet(Vec2::new(400.0, 300.0), 90.0);
        assert!((bullet.vel - Vec2::new(0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn test_target_points_and_kind() {
        let square = Entity::target(TargetKind::Square, 4.0, Vec2::ZERO);
        assert_eq!(square.kind(), EntityKind::Target);
        assert_eq!(square.as_target().map(|t| t.kind.points()), Some(5));
        assert_eq!(TargetKind::Circle.points(), 1);
        assert!(matches!(TargetKind::Circle.shape(), Shape::Circle { .. }));
    }
}
