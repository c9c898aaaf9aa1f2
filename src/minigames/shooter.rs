//! Space shooter: hold the bottom row against descending waves
//!
//! Enemies spawn along the top edge and drift down while swaying side to
//! side. Every enemy that lands or rams the ship costs a life.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{draw_banner, move_clamped, random_span};
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

pub const STARTING_LIVES: u32 = 3;
pub const KILLS_TO_WIN: u32 = 15;

const SHIP_WIDTH: f32 = 40.0;
const SHIP_HEIGHT: f32 = 20.0;
const SHIP_SPEED: f32 = 6.0;
/// Ship distance from the bottom edge
const SHIP_INSET: f32 = 40.0;

const SHOT_WIDTH: f32 = 4.0;
const SHOT_HEIGHT: f32 = 12.0;
const SHOT_SPEED: f32 = 10.0;
const FIRE_COOLDOWN_TICKS: u32 = 10;

const ENEMY_WIDTH: f32 = 30.0;
const ENEMY_HEIGHT: f32 = 24.0;
const ENEMY_SPAWN_TICKS: u32 = 45;
const ENEMY_DESCENT: f32 = 1.5;
/// Horizontal sway amplitude and angular rate (radians per tick)
const SWAY_AMPLITUDE: f32 = 40.0;
const SWAY_RATE: f32 = 0.05;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    /// Left edge at the center of the sway
    pub home_x: f32,
    pub age: u32,
}

impl Enemy {
    fn advance(&mut self) {
        self.age += 1;
        self.rect.y += ENEMY_DESCENT;
        self.rect.x = self.home_x + (self.age as f32 * SWAY_RATE).sin() * SWAY_AMPLITUDE;
    }
}

#[derive(Debug, Clone)]
pub struct ShooterGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    ship: Rect,
    shots: Vec<Rect>,
    enemies: Vec<Enemy>,
    fire_cooldown: u32,
    spawn_timer: u32,
    kills: u32,
    lives: u32,
    referee: Referee,
}

impl ShooterGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Rect::new(
                bounds.center().x - SHIP_WIDTH / 2.0,
                bounds.bottom() - SHIP_INSET - SHIP_HEIGHT,
                SHIP_WIDTH,
                SHIP_HEIGHT,
            ),
            shots: Vec::new(),
            enemies: Vec::new(),
            fire_cooldown: 0,
            spawn_timer: 0,
            kills: 0,
            lives: STARTING_LIVES,
            referee: Referee::new(),
        }
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    fn fire(&mut self) {
        self.shots.push(Rect::new(
            self.ship.center().x - SHOT_WIDTH / 2.0,
            self.ship.y - SHOT_HEIGHT,
            SHOT_WIDTH,
            SHOT_HEIGHT,
        ));
        self.fire_cooldown = FIRE_COOLDOWN_TICKS;
    }

    fn spawn(&mut self) {
        let b = &self.bounds;
        let home_x = random_span(
            &mut self.rng,
            b.x + SWAY_AMPLITUDE,
            b.right() - SWAY_AMPLITUDE - ENEMY_WIDTH,
        );
        self.enemies.push(Enemy {
            rect: Rect::new(home_x, b.y - ENEMY_HEIGHT, ENEMY_WIDTH, ENEMY_HEIGHT),
            home_x,
            age: 0,
        });
    }

    /// Move shots up, drop dead ones, and resolve kills
    fn resolve_shots(&mut self) {
        let top = self.bounds.y;
        for shot in self.shots.iter_mut() {
            shot.y -= SHOT_SPEED;
        }
        self.shots.retain(|s| s.bottom() >= top);

        let mut i = 0;
        while i < self.shots.len() {
            let shot = self.shots[i];
            if let Some(hit) = self.enemies.iter().position(|e| e.rect.intersects(&shot)) {
                self.enemies.swap_remove(hit);
                self.shots.swap_remove(i);
                self.kills += 1;
            } else {
                i += 1;
            }
        }
    }

    /// Move enemies; each one that lands or rams the ship costs a life
    fn resolve_enemies(&mut self) {
        let ship = self.ship;
        let floor = self.bounds.bottom();
        let mut breaches = 0;

        self.enemies.retain_mut(|e| {
            e.advance();
            if e.rect.intersects(&ship) || e.rect.y > floor {
                breaches += 1;
                false
            } else {
                true
            }
        });

        self.lives = self.lives.saturating_sub(breaches);
    }
}

impl Minigame for ShooterGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Shooter
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        let sideways = Vec2::new(input.movement.x, 0.0);
        move_clamped(&mut self.ship, sideways, SHIP_SPEED, &self.bounds);

        if input.action_pressed && self.fire_cooldown == 0 {
            self.fire();
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        self.spawn_timer += 1;
        if self.spawn_timer >= ENEMY_SPAWN_TICKS {
            self.spawn();
            self.spawn_timer = 0;
        }

        self.resolve_shots();
        self.resolve_enemies();

        if self.lives == 0 {
            self.referee.decide(Outcome::OpponentVictory {
                score: Some(self.kills),
            });
        } else if self.kills >= KILLS_TO_WIN {
            self.referee.decide(Outcome::PlayerVictory {
                score: Some(self.kills),
            });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);

        // Ship body and nose
        canvas.fill_rect(self.ship, colors::CYAN);
        canvas.fill_rect(
            Rect::new(self.ship.center().x - 4.0, self.ship.y - 8.0, 8.0, 8.0),
            colors::CYAN,
        );

        for s in &self.shots {
            canvas.fill_rect(*s, colors::YELLOW);
        }
        for e in &self.enemies {
            canvas.fill_rect(e.rect, colors::PURPLE);
        }

        let b = &self.bounds;
        canvas.text(
            &format!("Kills: {}/{}", self.kills, KILLS_TO_WIN),
            Vec2::new(b.x + 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Left,
            colors::WHITE,
        );
        canvas.text(
            &format!("Lives: {}", self.lives),
            Vec2::new(b.right() - 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Right,
            colors::RED,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::bounds;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            home_x: x,
            age: 0,
        }
    }

    #[test]
    fn test_fire_is_edge_triggered_with_cooldown() {
        let mut game = ShooterGame::new(bounds(), 5);
        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.shots.len(), 1);

        // Another press during the cooldown does nothing
        game.update();
        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.shots.len(), 1);

        // Holding after the cooldown does nothing either
        for _ in 0..FIRE_COOLDOWN_TICKS {
            game.update();
        }
        let held = InputSnapshot {
            action: true,
            ..Default::default()
        };
        game.handle_input(&held);
        assert_eq!(game.shots.len(), 1);

        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.shots.len(), 2);
    }

    #[test]
    fn test_shot_kills_enemy() {
        let mut game = ShooterGame::new(bounds(), 5);
        let x = game.ship.center().x - ENEMY_WIDTH / 2.0;
        game.enemies.push(enemy_at(x, 300.0));
        game.shots.push(Rect::new(game.ship.center().x - 2.0, 330.0, SHOT_WIDTH, SHOT_HEIGHT));
        game.update();
        assert_eq!(game.kills(), 1);
        assert!(game.enemies.is_empty());
        assert!(game.shots.is_empty());
    }

    #[test]
    fn test_enemy_landing_costs_life() {
        let mut game = ShooterGame::new(bounds(), 5);
        // Well away from the ship
        game.enemies.push(enemy_at(bounds().x + 50.0, bounds().bottom()));
        game.update();
        assert_eq!(game.lives(), STARTING_LIVES - 1);
        assert!(game.enemies.is_empty());
    }

    #[test]
    fn test_ramming_ship_costs_life() {
        let mut game = ShooterGame::new(bounds(), 5);
        let ship = game.ship;
        game.enemies.push(enemy_at(ship.x, ship.y - 5.0));
        game.update();
        assert_eq!(game.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_last_life_loses_with_kills() {
        let mut game = ShooterGame::new(bounds(), 5);
        game.lives = 1;
        game.kills = 6;
        game.enemies.push(enemy_at(bounds().x + 50.0, bounds().bottom()));
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::OpponentVictory { score: Some(6) });
    }

    #[test]
    fn test_kill_target_wins() {
        let mut game = ShooterGame::new(bounds(), 5);
        game.kills = KILLS_TO_WIN;
        let verdict = game.update().unwrap();
        assert!(verdict.outcome.awards_star());
    }

    #[test]
    fn test_enemies_spawn_and_sway_within_bounds() {
        let mut game = ShooterGame::new(bounds(), 5);
        for _ in 0..ENEMY_SPAWN_TICKS * 4 {
            game.update();
        }
        assert!(!game.enemies.is_empty());
        let b = bounds();
        assert!(
            game.enemies
                .iter()
                .all(|e| e.rect.x >= b.x && e.rect.right() <= b.right())
        );
    }
}
