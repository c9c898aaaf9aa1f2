//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Segments used for circles and rings
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(rect: Rect, color: Color) -> Vec<Vertex> {
    quad(
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.right(), rect.y),
        Vec2::new(rect.x, rect.bottom()),
        Vec2::new(rect.right(), rect.bottom()),
        color,
    )
}

/// Generate vertices for a rectangle outline of the given width (drawn inside the rect)
pub fn rect_outline(r: Rect, width: f32, color: Color) -> Vec<Vertex> {
    let w = width.min(r.w / 2.0).min(r.h / 2.0);
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right bands
    vertices.extend(rect(Rect::new(r.x, r.y, r.w, w), color));
    vertices.extend(rect(Rect::new(r.x, r.bottom() - w, r.w, w), color));
    vertices.extend(rect(Rect::new(r.x, r.y + w, w, r.h - 2.0 * w), color));
    vertices.extend(rect(Rect::new(r.right() - w, r.y + w, w, r.h - 2.0 * w), color));
    vertices
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(from + perp, to + perp, from - perp, to - perp, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        vertices.extend(quad(
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * inner_radius,
            center + dir2 * outer_radius,
            color,
        ));
    }

    vertices
}

/// Two triangles covering the quad a-b-c-d (a/b one edge, c/d the opposite edge)
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
