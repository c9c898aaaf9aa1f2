//! Dodgeball: sidestep homing balls until enough of them fly past

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{draw_banner, move_clamped, random_span};
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{
    Minigame, MinigameKind, Outcome, Referee, Rect, Verdict, circle_hits_rect, circle_outside,
};
use crate::steer_toward;

pub const STARTING_LIVES: u32 = 3;
/// Dodged balls needed to survive
pub const SURVIVAL_SCORE: u32 = 20;

const AVATAR_SIZE: f32 = 40.0;
const AVATAR_SPEED: f32 = 5.0;

const SPAWN_INTERVAL_TICKS: u32 = 30;
const BALL_RADIUS: f32 = 10.0;
const BALL_SPEED: f32 = 5.0;
/// Maximum heading change per tick (radians)
const BALL_TURN_RATE: f32 = 0.03;

/// An incoming ball
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Debug, Clone)]
pub struct DodgeballGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    avatar: Rect,
    projectiles: Vec<Projectile>,
    spawn_timer: u32,
    score: u32,
    lives: u32,
    referee: Referee,
}

impl DodgeballGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Rect::new(
                bounds.center().x - AVATAR_SIZE / 2.0,
                bounds.bottom() - 60.0,
                AVATAR_SIZE,
                AVATAR_SIZE,
            ),
            projectiles: Vec::new(),
            spawn_timer: 0,
            score: 0,
            lives: STARTING_LIVES,
            referee: Referee::new(),
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn spawn(&mut self) {
        let b = &self.bounds;
        let x = random_span(&mut self.rng, b.x + BALL_RADIUS, b.right() - BALL_RADIUS);
        self.projectiles.push(Projectile {
            pos: Vec2::new(x, self.bounds.y - BALL_RADIUS),
            vel: Vec2::new(0.0, BALL_SPEED),
        });
    }

    /// Move balls, resolve hits and escapes
    fn step_projectiles(&mut self) {
        let avatar = self.avatar;
        let bounds = self.bounds;
        let target = avatar.center();
        let mut hits = 0;
        let mut escaped = 0;

        self.projectiles.retain_mut(|p| {
            p.vel = steer_toward(p.vel, target - p.pos, BALL_TURN_RATE);
            p.pos += p.vel;

            if circle_hits_rect(p.pos, BALL_RADIUS, &avatar) {
                hits += 1;
                false
            } else if circle_outside(p.pos, BALL_RADIUS, &bounds) {
                escaped += 1;
                false
            } else {
                true
            }
        });

        self.lives = self.lives.saturating_sub(hits);
        self.score += escaped;
    }
}

impl Minigame for DodgeballGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Dodgeball
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        // Avatar stays on its row
        let sideways = Vec2::new(input.movement.x, 0.0);
        move_clamped(&mut self.avatar, sideways, AVATAR_SPEED, &self.bounds);
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.spawn_timer += 1;
        if self.spawn_timer > SPAWN_INTERVAL_TICKS {
            self.spawn();
            self.spawn_timer = 0;
        }

        self.step_projectiles();

        // Reaching the survival score wins even if the last life went on the same tick
        if self.score >= SURVIVAL_SCORE {
            self.referee.decide(Outcome::PlayerVictory {
                score: Some(self.score),
            });
        } else if self.lives == 0 {
            self.referee.decide(Outcome::OpponentVictory {
                score: Some(self.score),
            });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::DUSK);

        canvas.fill_rect(self.avatar, colors::BLUE);
        for p in &self.projectiles {
            canvas.fill_circle(p.pos, BALL_RADIUS, colors::RED);
        }

        let b = &self.bounds;
        canvas.text(
            &format!("Score: {}/{}", self.score, SURVIVAL_SCORE),
            Vec2::new(b.x + 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Left,
            colors::WHITE,
        );
        canvas.text(
            &format!("HP: {}", self.lives),
            Vec2::new(b.right() - 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Right,
            colors::RED,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}
