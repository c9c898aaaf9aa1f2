//! Coin collector: grab as many coins as possible before time runs out

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{draw_message, move_clamped, random_span};
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict, circle_hits_rect};

pub const ROUND_TICKS: u32 = 600;
/// Coins on the field at all times
pub const COIN_COUNT: usize = 10;
const COIN_RADIUS: f32 = 10.0;
const SPAWN_MARGIN: f32 = 50.0;

const AVATAR_SIZE: f32 = 40.0;
const AVATAR_SPEED: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct CoinGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    avatar: Rect,
    coins: Vec<Vec2>,
    timer: u32,
    score: u32,
    referee: Referee,
}

impl CoinGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        let mut game = Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Rect::from_center(bounds.center(), Vec2::splat(AVATAR_SIZE)),
            coins: Vec::with_capacity(COIN_COUNT),
            timer: ROUND_TICKS,
            score: 0,
            referee: Referee::new(),
        };
        for _ in 0..COIN_COUNT {
            let coin = game.random_spot();
            game.coins.push(coin);
        }
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn random_spot(&mut self) -> Vec2 {
        let b = &self.bounds;
        Vec2::new(
            random_span(&mut self.rng, b.x + SPAWN_MARGIN, b.right() - SPAWN_MARGIN),
            random_span(&mut self.rng, b.y + SPAWN_MARGIN, b.bottom() - SPAWN_MARGIN),
        )
    }

    /// Pick up touched coins; each one reappears elsewhere immediately
    fn collect(&mut self) {
        for i in 0..self.coins.len() {
            if circle_hits_rect(self.coins[i], COIN_RADIUS, &self.avatar) {
                self.score += 1;
                self.coins[i] = self.random_spot();
            }
        }
    }
}

impl Minigame for CoinGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Coin
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        move_clamped(&mut self.avatar, input.movement, AVATAR_SPEED, &self.bounds);
        self.collect();
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.referee.decide(Outcome::Timeout { score: self.score });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::TEAL);

        canvas.fill_rect(self.avatar, colors::ORANGE);
        for &c in &self.coins {
            canvas.fill_circle(c, COIN_RADIUS, colors::YELLOW);
        }

        let b = &self.bounds;
        canvas.text(
            &format!("Coins: {}", self.score),
            Vec2::new(b.x + 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Left,
            colors::WHITE,
        );
        canvas.text(
            &format!("Time: {}", self.timer / 60),
            Vec2::new(b.right() - 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Right,
            colors::WHITE,
        );

        // Only ever decided by the clock; the banner counts coins
        if let Some(Outcome::Timeout { score }) = self.referee.outcome() {
            let text = format!("Time's Up! Coins: {}", score);
            draw_message(canvas, b, &text, colors::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::{bounds, run_until_decided};
    use crate::renderer::ShapeBatch;

    #[test]
    fn test_starts_with_full_field() {
        let game = CoinGame::new(bounds(), 8);
        assert_eq!(game.coins.len(), COIN_COUNT);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_pickup_respawns_coin() {
        let mut game = CoinGame::new(bounds(), 8);
        // Move every coin away, then drop one on the avatar
        for c in game.coins.iter_mut() {
            *c = Vec2::new(bounds().x + 60.0, bounds().y + 60.0);
        }
        game.coins[0] = game.avatar.center();

        game.handle_input(&InputSnapshot::default());
        assert_eq!(game.score(), 1);
        assert_eq!(game.coins.len(), COIN_COUNT);
        assert_ne!(game.coins[0], game.avatar.center());
    }

    #[test]
    fn test_timeout_reports_total() {
        let mut game = CoinGame::new(bounds(), 8);
        game.score = 4;
        // Avatar parked in a corner away from coins
        game.avatar = Rect::new(0.0, 0.0, AVATAR_SIZE, AVATAR_SIZE);
        game.coins.iter_mut().for_each(|c| *c = bounds().center());
        let verdict = run_until_decided(&mut game, &InputSnapshot::default(), ROUND_TICKS).unwrap();
        assert_eq!(verdict.outcome, Outcome::Timeout { score: 4 });
        assert!(verdict.outcome.awards_star());
    }

    #[test]
    fn test_timeout_banner_counts_coins() {
        let mut game = CoinGame::new(bounds(), 8);
        game.score = 4;
        game.timer = 1;
        game.coins.iter_mut().for_each(|c| *c = Vec2::new(-100.0, -100.0));
        assert!(game.update().is_some());

        let mut batch = ShapeBatch::new(bounds().size());
        game.draw(&mut batch);
        assert!(batch.has_text("Time's Up! Coins: 4"));
        assert!(!batch.has_text("Score:"));
    }
}
