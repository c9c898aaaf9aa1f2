//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Raw bytes of a vertex slice, ready for a buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Build a color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with a new alpha
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    pub const WHITE: Color = rgb(255, 255, 255);
    pub const BLACK: Color = rgb(0, 0, 0);
    pub const RED: Color = rgb(255, 0, 0);
    pub const GREEN: Color = rgb(0, 255, 0);
    pub const BLUE: Color = rgb(0, 0, 255);
    pub const PURPLE: Color = rgb(128, 0, 128);
    pub const YELLOW: Color = rgb(255, 255, 0);
    pub const ORANGE: Color = rgb(255, 165, 0);
    pub const GREY: Color = rgb(100, 100, 100);
    pub const CYAN: Color = rgb(0, 255, 255);

    pub const BOARD: Color = rgb(20, 20, 40);
    pub const ARENA: Color = rgb(50, 50, 50);
    pub const GRASS: Color = rgb(30, 100, 30);
    pub const DUSK: Color = rgb(20, 0, 20);
    pub const TEAL: Color = rgb(0, 100, 100);
    pub const BOSS: Color = rgb(100, 0, 0);
    pub const MAZE_WALL: Color = rgb(30, 30, 160);

    /// Player slot colors (P1..P4)
    pub const PLAYERS: [Color; 4] = [BLUE, RED, GREEN, YELLOW];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes() {
        let verts = [Vertex::new(1.0, 2.0, colors::RED); 3];
        // 2 position floats + 4 color floats
        assert_eq!(Vertex::as_bytes(&verts).len(), 3 * 6 * 4);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(255, 0, 255), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(with_alpha(colors::BLACK, 0.5)[3], 0.5);
    }
}
