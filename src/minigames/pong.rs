//! Pong against a ball-tracking computer paddle, first to 3 points

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw_banner;
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict, circle_hits_rect};

pub const WINNING_SCORE: u32 = 3;

const PADDLE_WIDTH: f32 = 15.0;
const PADDLE_HEIGHT: f32 = 80.0;
/// Paddle distance from its side wall
const PADDLE_INSET: f32 = 50.0;
const PLAYER_PADDLE_SPEED: f32 = 6.0;
const AI_PADDLE_SPEED: f32 = 4.0;

const BALL_RADIUS: f32 = 10.0;
/// Serve speed per axis
const SERVE_SPEED: f32 = 5.0;
/// Horizontal speed gained on every paddle contact
const PADDLE_SPEEDUP: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct PongGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    /// Paddle tops
    player_y: f32,
    ai_y: f32,
    ball: Vec2,
    ball_vel: Vec2,
    player_score: u32,
    ai_score: u32,
    referee: Referee,
}

impl PongGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        let paddle_y = bounds.center().y - PADDLE_HEIGHT / 2.0;
        let mut game = Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player_y: paddle_y,
            ai_y: paddle_y,
            ball: bounds.center(),
            ball_vel: Vec2::ZERO,
            player_score: 0,
            ai_score: 0,
            referee: Referee::new(),
        };
        game.serve();
        game
    }

    /// Re-center the ball with a random diagonal
    fn serve(&mut self) {
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball = self.bounds.center();
        self.ball_vel = Vec2::new(sx * SERVE_SPEED, sy * SERVE_SPEED);
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.ai_score)
    }

    fn player_paddle(&self) -> Rect {
        Rect::new(
            self.bounds.x + PADDLE_INSET,
            self.player_y,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    fn ai_paddle(&self) -> Rect {
        Rect::new(
            self.bounds.right() - PADDLE_INSET - PADDLE_WIDTH,
            self.ai_y,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    fn clamp_paddle(&self, y: f32) -> f32 {
        // Court shorter than a paddle pins it to the top
        y.min(self.bounds.bottom() - PADDLE_HEIGHT).max(self.bounds.y)
    }
}

impl Minigame for PongGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Pong
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        self.player_y = self.clamp_paddle(self.player_y + input.movement.y * PLAYER_PADDLE_SPEED);
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        // Computer tracks the ball's height
        let ai_center = self.ai_y + PADDLE_HEIGHT / 2.0;
        if self.ball.y < ai_center {
            self.ai_y -= AI_PADDLE_SPEED;
        } else if self.ball.y > ai_center {
            self.ai_y += AI_PADDLE_SPEED;
        }
        self.ai_y = self.clamp_paddle(self.ai_y);

        self.ball += self.ball_vel;

        // Bounce off top and bottom
        if self.ball.y <= self.bounds.y {
            self.ball_vel.y = self.ball_vel.y.abs();
        } else if self.ball.y >= self.bounds.bottom() {
            self.ball_vel.y = -self.ball_vel.y.abs();
        }

        if circle_hits_rect(self.ball, BALL_RADIUS, &self.player_paddle()) {
            self.ball_vel.x = self.ball_vel.x.abs() + PADDLE_SPEEDUP;
        }
        if circle_hits_rect(self.ball, BALL_RADIUS, &self.ai_paddle()) {
            self.ball_vel.x = -(self.ball_vel.x.abs() + PADDLE_SPEEDUP);
        }

        if self.ball.x < self.bounds.x {
            self.ai_score += 1;
            self.serve();
        } else if self.ball.x > self.bounds.right() {
            self.player_score += 1;
            self.serve();
        }

        if self.player_score >= WINNING_SCORE {
            self.referee.decide(Outcome::PlayerVictory {
                score: Some(self.player_score),
            });
        } else if self.ai_score >= WINNING_SCORE {
            self.referee.decide(Outcome::OpponentVictory { score: None });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);

        let b = &self.bounds;
        let mid_x = b.center().x;
        canvas.line(
            Vec2::new(mid_x, b.y),
            Vec2::new(mid_x, b.bottom()),
            2.0,
            colors::WHITE,
        );

        canvas.fill_rect(self.player_paddle(), colors::BLUE);
        canvas.fill_rect(self.ai_paddle(), colors::RED);
        canvas.fill_circle(self.ball, BALL_RADIUS, colors::YELLOW);

        canvas.text(
            &self.player_score.to_string(),
            Vec2::new(b.x + b.w / 4.0, b.y + 50.0),
            FontSize::Large,
            Align::Center,
            colors::WHITE,
        );
        canvas.text(
            &self.ai_score.to_string(),
            Vec2::new(b.x + 3.0 * b.w / 4.0, b.y + 50.0),
            FontSize::Large,
            Align::Center,
            colors::WHITE,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::bounds;

    #[test]
    fn test_serve_recenters_with_random_sign() {
        let mut game = PongGame::new(bounds(), 9);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..64 {
            game.ball = Vec2::new(3.0, 4.0);
            game.serve();
            assert_eq!(game.ball, bounds().center());
            assert_eq!(game.ball_vel.x.abs(), SERVE_SPEED);
            saw_left |= game.ball_vel.x < 0.0;
            saw_right |= game.ball_vel.x > 0.0;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_paddle_contact_speeds_up_ball() {
        let mut game = PongGame::new(bounds(), 9);
        let paddle = game.player_paddle();
        game.ball = Vec2::new(paddle.right() + 8.0, paddle.center().y);
        game.ball_vel = Vec2::new(-5.0, 0.0);
        game.update();
        assert_eq!(game.ball_vel.x, 5.0 + PADDLE_SPEEDUP);
    }

    #[test]
    fn test_ball_past_ai_scores_for_player() {
        let mut game = PongGame::new(bounds(), 9);
        // Far from the computer paddle so it cannot return it
        game.ai_y = bounds().y;
        game.ball = Vec2::new(bounds().right() - 2.0, bounds().bottom() - 20.0);
        game.ball_vel = Vec2::new(5.0, 0.0);
        game.update();
        assert_eq!(game.scores(), (1, 0));
        assert_eq!(game.ball, bounds().center());
    }

    #[test]
    fn test_first_to_three_player() {
        let mut game = PongGame::new(bounds(), 9);
        game.player_score = WINNING_SCORE - 1;
        game.ai_y = bounds().y;
        game.ball = Vec2::new(bounds().right() - 2.0, bounds().bottom() - 20.0);
        game.ball_vel = Vec2::new(5.0, 0.0);
        let verdict = game.update().unwrap();
        assert!(matches!(verdict.outcome, Outcome::PlayerVictory { .. }));
        assert!(verdict.outcome.awards_star());
    }

    #[test]
    fn test_first_to_three_computer() {
        let mut game = PongGame::new(bounds(), 9);
        game.ai_score = WINNING_SCORE - 1;
        game.player_y = bounds().y;
        game.ball = Vec2::new(bounds().x + 2.0, bounds().bottom() - 20.0);
        game.ball_vel = Vec2::new(-5.0, 0.0);
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::OpponentVictory { score: None });
        assert_eq!(verdict.outcome.to_string(), "Computer Wins!");
    }

    #[test]
    fn test_player_paddle_clamped() {
        let mut game = PongGame::new(bounds(), 9);
        for _ in 0..200 {
            game.handle_input(&InputSnapshot::moving(Vec2::new(0.0, -1.0)));
        }
        assert_eq!(game.player_y, bounds().y);
    }
}
