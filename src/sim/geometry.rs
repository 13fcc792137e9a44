//! Shapes and bounding boxes for collision tests
//!
//! Entities are positioned by their center. Rectangles are axis aligned, so
//! every shape reduces to an `Aabb` for box tests, and circle-ish tests use
//! center distance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision/render shape of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    /// Half extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { width, height } => Vec2::new(width / 2.0, height / 2.0),
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }

    /// Bounding box when centered at `center`
    pub fn aabb_at(&self, center: Vec2) -> Aabb {
        Aabb::from_center(center, self.half_extents())
    }
}

/// Axis-aligned bounding box (screen space: min is top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Closed-interval overlap (touching edges count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Center-distance test: strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}
