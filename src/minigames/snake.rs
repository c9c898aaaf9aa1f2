//! Snake: eat food on a tile grid without hitting a wall or yourself

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw_banner;
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::grid::step;
use crate::sim::{Cell, Dir, Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

const CELL_SIZE: f32 = 20.0;
/// Ticks between moves
const STEP_TICKS: u32 = 6;
const START_LENGTH: i32 = 3;
/// Food eaten to win
pub const FOOD_TO_WIN: u32 = 10;

#[derive(Debug, Clone)]
pub struct SnakeGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    cols: i32,
    rows: i32,
    /// Head first
    body: VecDeque<Cell>,
    dir: Dir,
    /// Turn applied on the next move
    queued: Dir,
    food: Cell,
    step_timer: u32,
    score: u32,
    referee: Referee,
}

impl SnakeGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        let cols = (bounds.w / CELL_SIZE) as i32;
        let rows = (bounds.h / CELL_SIZE) as i32;
        let head = (cols / 2, rows / 2);
        let body = (0..START_LENGTH).map(|i| (head.0 - i, head.1)).collect();

        let mut game = Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cols,
            rows,
            body,
            dir: Dir::Right,
            queued: Dir::Right,
            food: head,
            step_timer: 0,
            score: 0,
            referee: Referee::new(),
        };
        game.place_food();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    fn in_grid(&self, c: Cell) -> bool {
        c.0 >= 0 && c.0 < self.cols && c.1 >= 0 && c.1 < self.rows
    }

    /// Drop food on a random cell the snake does not occupy
    fn place_food(&mut self) {
        let free: Vec<Cell> = (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (c, r)))
            .filter(|c| !self.body.contains(c))
            .collect();
        if free.is_empty() {
            return;
        }
        self.food = free[self.rng.random_range(0..free.len())];
    }

    /// Advance one cell. Returns false on a crash.
    fn advance(&mut self) -> bool {
        self.dir = self.queued;
        let next = step(self.head(), self.dir);
        let eating = next == self.food;

        // The tail moves out of the way unless the snake is growing
        let body_len = if eating { self.body.len() } else { self.body.len() - 1 };
        if !self.in_grid(next) || self.body.iter().take(body_len).any(|&c| c == next) {
            return false;
        }

        self.body.push_front(next);
        if eating {
            self.score += 1;
            self.place_food();
        } else {
            self.body.pop_back();
        }
        true
    }

    fn cell_rect(&self, c: Cell) -> Rect {
        Rect::new(
            self.bounds.x + c.0 as f32 * CELL_SIZE,
            self.bounds.y + c.1 as f32 * CELL_SIZE,
            CELL_SIZE,
            CELL_SIZE,
        )
    }
}

impl Minigame for SnakeGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Snake
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        if let Some(dir) = Dir::from_movement(input.movement) {
            // No reversing into the neck
            if dir != self.dir.opposite() {
                self.queued = dir;
            }
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.step_timer += 1;
        if self.step_timer >= STEP_TICKS {
            self.step_timer = 0;
            if !self.advance() {
                log::debug!("Snake crashed at {:?} with {} food", self.head(), self.score);
                self.referee.decide(Outcome::OpponentVictory {
                    score: Some(self.score),
                });
            } else if self.score >= FOOD_TO_WIN {
                self.referee.decide(Outcome::PlayerVictory {
                    score: Some(self.score),
                });
            }
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);

        canvas.fill_rect(self.cell_rect(self.food), colors::RED);
        for (i, &c) in self.body.iter().enumerate() {
            let color = if i == 0 { colors::YELLOW } else { colors::GREEN };
            canvas.fill_rect(self.cell_rect(c), color);
        }

        let b = &self.bounds;
        canvas.text(
            &format!("Food: {}/{}", self.score, FOOD_TO_WIN),
            Vec2::new(b.x + 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Left,
            colors::WHITE,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}
