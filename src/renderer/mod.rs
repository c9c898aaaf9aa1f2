//! Rendering collaborator
//!
//! Game code draws through the [`Canvas`] trait only. [`ShapeBatch`] is the
//! CPU-side implementation: it tessellates shapes into triangle vertices ready
//! for a GPU upload and records text runs for an external text rasterizer.

pub mod batch;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::Rect;

pub use batch::{ShapeBatch, TextRun};
pub use vertex::{Color, Vertex, colors};

/// Font sizes available to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// Headlines and outcome banners
    Large,
    Small,
    Tiny,
}

impl FontSize {
    /// Nominal pixel height
    pub fn px(&self) -> f32 {
        match self {
            FontSize::Large => 74.0,
            FontSize::Small => 36.0,
            FontSize::Tiny => 24.0,
        }
    }
}

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Narrow drawing surface consumed by the game
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Translucent full-surface fill (fades)
    fn overlay(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, size: FontSize, align: Align, color: Color);
}
