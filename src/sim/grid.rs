//! Tile-grid helpers for the grid-based variants

use glam::Vec2;

/// A tile coordinate (column, row)
pub type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn offset(self) -> Cell {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Dominant axis of a movement vector; `None` when idle
    pub fn from_movement(movement: Vec2) -> Option<Dir> {
        if movement == Vec2::ZERO {
            return None;
        }
        Some(if movement.x.abs() >= movement.y.abs() {
            if movement.x > 0.0 { Dir::Right } else { Dir::Left }
        } else if movement.y > 0.0 {
            Dir::Down
        } else {
            Dir::Up
        })
    }
}

#[inline]
pub fn step(cell: Cell, dir: Dir) -> Cell {
    let (dx, dy) = dir.offset();
    (cell.0 + dx, cell.1 + dy)
}

#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}
