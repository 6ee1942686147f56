//! Collision detection for axis-aligned rectangles
//!
//! Everything that can touch in Hungry Cat is a box: the cat, the fish, the
//! water drops. Touching edges do not count; boxes must share interior area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test on all four sides
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// Shared region of two rectangles, if they overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.min.max(other.min);
        let max = self.max().min(other.max());
        Some(Rect::new(min, max - min))
    }
}

/// Result of a player-vs-item check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the boxes overlap
    pub hit: bool,
    /// Center of the overlapping region (effects spawn here)
    pub point: Vec2,
    /// Overlap depth along each axis
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            penetration: Vec2::ZERO,
        }
    }
}

/// Check two boxes and describe the contact
pub fn rect_collision(a: &Rect, b: &Rect) -> CollisionResult {
    match a.intersection(b) {
        Some(overlap) => CollisionResult {
            hit: true,
            point: overlap.center(),
            penetration: overlap.size,
        },
        None => CollisionResult::miss(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_rects_miss() {
        let player = Rect::from_xywh(0.0, 0.0, 96.0, 72.0);
        let item = Rect::from_xywh(200.0, 0.0, 48.0, 48.0);
        assert!(!player.intersects(&item));
        assert!(!rect_collision(&player, &item).hit);
    }

    #[test]
    fn test_identical_rects_hit() {
        let a = Rect::from_xywh(10.0, 10.0, 50.0, 50.0);
        let result = rect_collision(&a, &a);
        assert!(result.hit);
        assert_eq!(result.penetration, Vec2::new(50.0, 50.0));
        assert_eq!(result.point, Vec2::new(35.0, 35.0));
    }

    #[test]
    fn test_touching_edges_do_not_count() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let right = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        let below = Rect::from_xywh(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::from_xywh(10.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn test_partial_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(8.0, 5.0, 10.0, 10.0);
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::from_xywh(8.0, 5.0, 2.0, 5.0));
        // Symmetric
        assert_eq!(b.intersection(&a), Some(overlap));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::from_xywh(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }
}
