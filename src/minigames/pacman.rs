//! Maze chase: clear every pellet while two ghosts hunt you down
//!
//! Movement is tile to tile. The player's last steering input is buffered
//! and taken at the first tile where that way is open. Ghosts pick, at
//! every tile, the open non-reversing direction that brings them closest
//! (Manhattan) to the player, breaking ties at random.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw_banner;
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::grid::{manhattan, step};
use crate::sim::{Cell, Dir, Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

/// `#` wall, `.` pellet, `P` player start, `G` ghost start, space open floor
const LAYOUT: [&str; 15] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "#.......G G.......#",
    "####.#.#####.#.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#.....P.....#..#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "###################",
];

/// Ticks per tile
const PLAYER_STEP_TICKS: u32 = 8;
const GHOST_STEP_TICKS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Maze {
    cols: i32,
    rows: i32,
    walls: HashSet<Cell>,
    pellets: HashSet<Cell>,
    player_start: Cell,
    ghost_starts: Vec<Cell>,
}

impl Maze {
    fn parse(layout: &[&str]) -> Self {
        let mut maze = Maze {
            cols: layout.iter().map(|r| r.len()).max().unwrap_or(0) as i32,
            rows: layout.len() as i32,
            walls: HashSet::new(),
            pellets: HashSet::new(),
            player_start: (1, 1),
            ghost_starts: Vec::new(),
        };
        for (r, line) in layout.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let cell = (c as i32, r as i32);
                match ch {
                    '#' => {
                        maze.walls.insert(cell);
                    }
                    '.' => {
                        maze.pellets.insert(cell);
                    }
                    'P' => maze.player_start = cell,
                    'G' => maze.ghost_starts.push(cell),
                    _ => {}
                }
            }
        }
        maze
    }

    /// Inside the grid and not a wall
    pub fn is_open(&self, c: Cell) -> bool {
        c.0 >= 0 && c.0 < self.cols && c.1 >= 0 && c.1 < self.rows && !self.walls.contains(&c)
    }
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub cell: Cell,
    pub dir: Option<Dir>,
}

#[derive(Debug, Clone)]
pub struct PacmanGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    maze: Maze,
    /// Screen size of one tile and the maze's top-left corner
    tile: f32,
    origin: Vec2,
    player: Cell,
    dir: Option<Dir>,
    buffered: Option<Dir>,
    ghosts: Vec<Ghost>,
    player_timer: u32,
    ghost_timer: u32,
    score: u32,
    referee: Referee,
}

impl PacmanGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        let maze = Maze::parse(&LAYOUT);
        // Largest square tile that fits, maze centered
        let tile = (bounds.w / maze.cols as f32).min(bounds.h / maze.rows as f32);
        let origin = Vec2::new(
            bounds.x + (bounds.w - tile * maze.cols as f32) / 2.0,
            bounds.y + (bounds.h - tile * maze.rows as f32) / 2.0,
        );
        let ghosts = maze
            .ghost_starts
            .iter()
            .map(|&cell| Ghost { cell, dir: None })
            .collect();

        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tile,
            origin,
            player: maze.player_start,
            dir: None,
            buffered: None,
            ghosts,
            maze,
            player_timer: 0,
            ghost_timer: 0,
            score: 0,
            referee: Referee::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pellets_left(&self) -> usize {
        self.maze.pellets.len()
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    fn move_player(&mut self) {
        if let Some(turn) = self.buffered {
            if self.maze.is_open(step(self.player, turn)) {
                self.dir = Some(turn);
                self.buffered = None;
            }
        }

        let Some(dir) = self.dir else {
            return;
        };
        let next = step(self.player, dir);
        if self.maze.is_open(next) {
            self.player = next;
            if self.maze.pellets.remove(&next) {
                self.score += 1;
            }
        }
    }

    /// Open, non-reversing direction closest to the player; reverses only at dead ends
    fn choose_ghost_dir(&mut self, ghost: &Ghost) -> Option<Dir> {
        let open: Vec<Dir> = Dir::ALL
            .into_iter()
            .filter(|&d| self.maze.is_open(step(ghost.cell, d)))
            .collect();
        let forward: Vec<Dir> = open
            .iter()
            .copied()
            .filter(|&d| Some(d.opposite()) != ghost.dir)
            .collect();
        let candidates = if forward.is_empty() { open } else { forward };

        let best = candidates
            .iter()
            .map(|&d| manhattan(step(ghost.cell, d), self.player))
            .min()?;
        let tied: Vec<Dir> = candidates
            .into_iter()
            .filter(|&d| manhattan(step(ghost.cell, d), self.player) == best)
            .collect();
        Some(tied[self.rng.random_range(0..tied.len())])
    }

    fn move_ghosts(&mut self) {
        for i in 0..self.ghosts.len() {
            let ghost = self.ghosts[i].clone();
            if let Some(dir) = self.choose_ghost_dir(&ghost) {
                self.ghosts[i].cell = step(ghost.cell, dir);
                self.ghosts[i].dir = Some(dir);
            }
        }
    }

    fn caught(&self) -> bool {
        self.ghosts.iter().any(|g| g.cell == self.player)
    }

    fn cell_center(&self, c: Cell) -> Vec2 {
        self.origin + (Vec2::new(c.0 as f32, c.1 as f32) + 0.5) * self.tile
    }
}

impl Minigame for PacmanGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Pacman
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        if let Some(dir) = Dir::from_movement(input.movement) {
            self.buffered = Some(dir);
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.player_timer += 1;
        if self.player_timer >= PLAYER_STEP_TICKS {
            self.player_timer = 0;
            self.move_player();
        }

        // Walking into a ghost counts before the ghosts move
        if !self.caught() {
            self.ghost_timer += 1;
            if self.ghost_timer >= GHOST_STEP_TICKS {
                self.ghost_timer = 0;
                self.move_ghosts();
            }
        }

        if self.caught() {
            log::debug!("Caught at {:?} with {} pellets", self.player, self.score);
            self.referee.decide(Outcome::OpponentVictory {
                score: Some(self.score),
            });
        } else if self.maze.pellets.is_empty() {
            self.referee.decide(Outcome::PlayerVictory {
                score: Some(self.score),
            });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);

        let size = Vec2::splat(self.tile);
        for &wall in &self.maze.walls {
            canvas.fill_rect(Rect::from_center(self.cell_center(wall), size), colors::MAZE_WALL);
        }
        for &pellet in &self.maze.pellets {
            canvas.fill_circle(self.cell_center(pellet), self.tile * 0.1, colors::WHITE);
        }

        canvas.fill_circle(self.cell_center(self.player), self.tile * 0.4, colors::YELLOW);
        let ghost_colors = [colors::RED, colors::PURPLE];
        for (i, g) in self.ghosts.iter().enumerate() {
            let color = ghost_colors[i % ghost_colors.len()];
            let body = Rect::from_center(self.cell_center(g.cell), size * 0.8);
            canvas.fill_rect(body, color);
        }

        let b = &self.bounds;
        canvas.text(
            &format!("Pellets: {}", self.maze.pellets.len()),
            Vec2::new(b.x + 10.0, b.y + 4.0),
            FontSize::Small,
            Align::Left,
            colors::WHITE,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::bounds;

    fn run_player_step(game: &mut PacmanGame) -> Option<Verdict> {
        let mut last = None;
        for _ in 0..PLAYER_STEP_TICKS {
            last = game.update();
        }
        last
    }

    /// Park the ghosts far away in a corner
    fn banish_ghosts(game: &mut PacmanGame) {
        for g in game.ghosts.iter_mut() {
            g.cell = (1, 1);
            g.dir = None;
        }
        game.ghost_timer = 0;
    }

    #[test]
    fn test_layout_parses() {
        let game = PacmanGame::new(bounds(), 1);
        assert_eq!(game.player(), (9, 11));
        assert_eq!(game.ghosts.len(), 2);
        assert!(game.pellets_left() > 100);
        assert!(game.maze.is_open(game.player()));
    }

    #[test]
    fn test_maze_fits_bounds() {
        let game = PacmanGame::new(bounds(), 1);
        let b = bounds();
        assert!(game.origin.x >= b.x && game.origin.y >= b.y);
        assert!(game.origin.x + game.tile * game.maze.cols as f32 <= b.right() + 0.001);
        assert!(game.origin.y + game.tile * game.maze.rows as f32 <= b.bottom() + 0.001);
    }

    #[test]
    fn test_player_eats_pellets() {
        let mut game = PacmanGame::new(bounds(), 1);
        banish_ghosts(&mut game);
        let before = game.pellets_left();
        game.handle_input(&InputSnapshot::moving(Vec2::new(1.0, 0.0)));
        run_player_step(&mut game);
        assert_eq!(game.player(), (10, 11));
        assert_eq!(game.score(), 1);
        assert_eq!(game.pellets_left(), before - 1);
    }

    #[test]
    fn test_walls_block_and_turn_stays_buffered() {
        let mut game = PacmanGame::new(bounds(), 1);
        banish_ghosts(&mut game);
        // Straight down from the start is a wall
        game.handle_input(&InputSnapshot::moving(Vec2::new(0.0, 1.0)));
        run_player_step(&mut game);
        assert_eq!(game.player(), (9, 11));
        assert_eq!(game.buffered, Some(Dir::Down));

        // Head left; the buffered turn waits for an opening
        game.dir = Some(Dir::Left);
        game.buffered = Some(Dir::Up);
        run_player_step(&mut game);
        assert_eq!(game.player(), (8, 11));
        run_player_step(&mut game);
        // (8, 10) is open, so the turn is taken here
        assert_eq!(game.player(), (8, 10));
        assert_eq!(game.dir, Some(Dir::Up));
    }

    #[test]
    fn test_ghost_heads_toward_player_without_reversing() {
        let mut game = PacmanGame::new(bounds(), 1);
        game.player = (17, 1);
        let ghost = Ghost {
            cell: (4, 3),
            dir: Some(Dir::Left),
        };
        // Right would reverse; of the rest, Up gets closest
        assert_eq!(game.choose_ghost_dir(&ghost), Some(Dir::Up));

        game.player = (17, 3);
        let ghost = Ghost {
            cell: (4, 3),
            dir: Some(Dir::Right),
        };
        assert_eq!(game.choose_ghost_dir(&ghost), Some(Dir::Right));
    }

    #[test]
    fn test_ghost_ties_break_both_ways() {
        let mut game = PacmanGame::new(bounds(), 1);
        // Up (4, 2) and Right (5, 3) are both 3 away from (6, 1)
        game.player = (6, 1);
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let ghost = Ghost {
                cell: (4, 3),
                dir: Some(Dir::Up),
            };
            seen.insert(game.choose_ghost_dir(&ghost));
        }
        assert_eq!(seen, HashSet::from([Some(Dir::Up), Some(Dir::Right)]));
    }

    #[test]
    fn test_ghost_reverses_at_dead_end() {
        let mut game = PacmanGame::new(bounds(), 1);
        let ghost = Ghost {
            cell: (1, 7),
            dir: Some(Dir::Left),
        };
        assert_eq!(game.choose_ghost_dir(&ghost), Some(Dir::Right));
    }

    #[test]
    fn test_caught_loses_with_score() {
        let mut game = PacmanGame::new(bounds(), 1);
        game.score = 12;
        game.ghosts[0].cell = game.player;
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::OpponentVictory { score: Some(12) });
    }

    #[test]
    fn test_last_pellet_wins() {
        let mut game = PacmanGame::new(bounds(), 1);
        banish_ghosts(&mut game);
        game.maze.pellets.clear();
        game.maze.pellets.insert((10, 11));
        game.handle_input(&InputSnapshot::moving(Vec2::new(1.0, 0.0)));
        let verdict = run_player_step(&mut game).unwrap();
        assert!(matches!(verdict.outcome, Outcome::PlayerVictory { .. }));
    }
}
