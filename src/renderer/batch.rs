//! Frame batching canvas
//!
//! Collects one frame of triangles and text runs. The host uploads
//! `vertices()` to its GPU pipeline and hands `texts()` to its font renderer.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Color, Vertex};
use super::{Align, Canvas, FontSize};
use crate::sim::Rect;

/// A string to rasterize at a position
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub size: FontSize,
    pub align: Align,
    pub color: Color,
}

/// Canvas that records a frame as vertices and text runs
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    size: Vec2,
    clear_color: Color,
    vertices: Vec<Vertex>,
    texts: Vec<TextRun>,
}

impl ShapeBatch {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Drop the previous frame
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// True if any recorded text run contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

impl Canvas for ShapeBatch {
    fn clear(&mut self, color: Color) {
        // Later shapes are drawn over whatever came before
        self.begin_frame();
        self.clear_color = color;
    }

    fn overlay(&mut self, color: Color) {
        let full = Rect::new(0.0, 0.0, self.size.x, self.size.y);
        self.vertices.extend(shapes::rect(full, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.vertices.extend(shapes::rect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.vertices.extend(shapes::rect_outline(rect, width, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.vertices.extend(shapes::ring(
            center,
            (radius - width).max(0.0),
            radius,
            color,
            CIRCLE_SEGMENTS,
        ));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    fn text(&mut self, text: &str, pos: Vec2, size: FontSize, align: Align, color: Color) {
        self.texts.push(TextRun {
            text: text.to_string(),
            pos,
            size,
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_clear_resets_frame() {
        let mut batch = ShapeBatch::new(Vec2::new(800.0, 600.0));
        batch.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), colors::RED);
        batch.text("hi", Vec2::ZERO, FontSize::Small, Align::Left, colors::WHITE);
        assert_eq!(batch.vertices().len(), 6);

        batch.clear(colors::BLUE);
        assert!(batch.vertices().is_empty());
        assert!(batch.texts().is_empty());
        assert_eq!(batch.clear_color(), colors::BLUE);
    }

    #[test]
    fn test_records_text_runs() {
        let mut batch = ShapeBatch::new(Vec2::new(800.0, 600.0));
        batch.text(
            "Score: 4",
            Vec2::new(20.0, 20.0),
            FontSize::Large,
            Align::Left,
            colors::WHITE,
        );
        assert!(batch.has_text("Score"));
        assert_eq!(batch.texts()[0].size, FontSize::Large);
    }

    #[test]
    fn test_overlay_covers_surface() {
        let mut batch = ShapeBatch::new(Vec2::new(800.0, 600.0));
        batch.overlay([0.0, 0.0, 0.0, 0.5]);
        let max_x = batch
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(0.0, f32::max);
        assert_eq!(max_x, 800.0);
    }
}
