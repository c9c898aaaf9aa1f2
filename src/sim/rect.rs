//! Axis-aligned rectangle geometry
//!
//! Screen space: origin top-left, +x right, +y down. Most minigame entities
//! are rectangles; circles are handled in `collision`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    /// Screen of the given dimensions at the origin
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Point containment (right/bottom edges exclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Move inside `bounds`; a rect larger than `bounds` is centered on that axis
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = if self.w >= bounds.w {
            bounds.x + (bounds.w - self.w) / 2.0
        } else {
            self.x.clamp(bounds.x, bounds.right() - self.w)
        };
        self.y = if self.h >= bounds.h {
            bounds.y + (bounds.h - self.h) / 2.0
        } else {
            self.y.clamp(bounds.y, bounds.bottom() - self.h)
        };
    }

    /// Distance between the centers of two rectangles
    pub fn center_distance(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));

        let c = Rect::from_center(Vec2::new(25.0, 40.0), Vec2::new(30.0, 40.0));
        assert_eq!(c, r);
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edge
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::screen(800.0, 600.0);
        let mut r = Rect::new(-20.0, 590.0, 50.0, 50.0);
        r.clamp_within(&bounds);
        assert_eq!((r.x, r.y), (0.0, 550.0));

        let mut huge = Rect::new(0.0, 0.0, 1000.0, 50.0);
        huge.clamp_within(&bounds);
        assert_eq!(huge.x, -100.0);
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 9.9)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
    }
}
