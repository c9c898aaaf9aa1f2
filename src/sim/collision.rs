//! Overlap tests between circles and rectangles

use glam::Vec2;

use super::rect::Rect;

/// Closest point of `rect` to `p`
#[inline]
pub fn closest_point(rect: &Rect, p: Vec2) -> Vec2 {
    Vec2::new(p.x.clamp(rect.x, rect.right()), p.y.clamp(rect.y, rect.bottom()))
}

/// Circle overlaps rectangle (strict)
pub fn circle_hits_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    closest_point(rect, center).distance_squared(center) < radius * radius
}

/// True once a circle is entirely outside `bounds`
pub fn circle_outside(center: Vec2, radius: f32, bounds: &Rect) -> bool {
    center.x + radius < bounds.x
        || center.x - radius > bounds.right()
        || center.y + radius < bounds.y
        || center.y - radius > bounds.bottom()
}
