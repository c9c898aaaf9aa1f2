//! Minigame variants
//!
//! Each variant is a self-contained simulation built fresh for every round.
//! Faces 1-6 of the die select the base variants, 7-9 the expansion pack;
//! the boss fight is entered from the board, never rolled.

pub mod battle;
pub mod boss;
pub mod coin;
pub mod dodgeball;
pub mod pacman;
pub mod pong;
pub mod racing;
pub mod shooter;
pub mod snake;
pub mod target;

pub use battle::BattleGame;
pub use boss::BossFight;
pub use coin::CoinGame;
pub use dodgeball::DodgeballGame;
pub use pacman::PacmanGame;
pub use pong::PongGame;
pub use racing::RacingGame;
pub use shooter::ShooterGame;
pub use snake::SnakeGame;
pub use target::TargetGame;

use glam::Vec2;
use rand::Rng;

use crate::renderer::{Align, Canvas, Color, FontSize};
use crate::sim::{Minigame, MinigameKind, Referee, Rect};

/// Build a fresh round of the given variant
pub fn create(kind: MinigameKind, bounds: Rect, seed: u64) -> Box<dyn Minigame> {
    match kind {
        MinigameKind::Battle => Box::new(BattleGame::new(bounds, seed)),
        MinigameKind::Racing => Box::new(RacingGame::new(bounds, seed)),
        MinigameKind::Pong => Box::new(PongGame::new(bounds, seed)),
        MinigameKind::Dodgeball => Box::new(DodgeballGame::new(bounds, seed)),
        MinigameKind::Target => Box::new(TargetGame::new(bounds, seed)),
        MinigameKind::Coin => Box::new(CoinGame::new(bounds, seed)),
        MinigameKind::Boss => Box::new(BossFight::new(bounds, seed)),
        MinigameKind::Snake => Box::new(SnakeGame::new(bounds, seed)),
        MinigameKind::Shooter => Box::new(ShooterGame::new(bounds, seed)),
        MinigameKind::Pacman => Box::new(PacmanGame::new(bounds, seed)),
    }
}

/// Move a rect by `movement * speed` and keep it on screen
pub(crate) fn move_clamped(rect: &mut Rect, movement: Vec2, speed: f32, bounds: &Rect) {
    rect.translate(movement * speed);
    rect.clamp_within(bounds);
}

/// Uniform pick in `lo..=hi`. A playfield too small for the range gets its midpoint.
pub(crate) fn random_span<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Background bar with a foreground fill proportional to `fraction`
pub(crate) fn draw_bar(canvas: &mut dyn Canvas, bar: Rect, fraction: f32, back: Color, front: Color) {
    canvas.fill_rect(bar, back);
    let filled = Rect::new(bar.x, bar.y, bar.w * fraction.clamp(0.0, 1.0), bar.h);
    if filled.w > 0.0 {
        canvas.fill_rect(filled, front);
    }
}

/// Centered outcome banner, drawn once the round is decided
pub(crate) fn draw_banner(canvas: &mut dyn Canvas, bounds: &Rect, referee: &Referee, color: Color) {
    if let Some(outcome) = referee.outcome() {
        draw_message(canvas, bounds, &outcome.to_string(), color);
    }
}

pub(crate) fn draw_message(canvas: &mut dyn Canvas, bounds: &Rect, text: &str, color: Color) {
    canvas.text(text, bounds.center(), FontSize::Large, Align::Center, color);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::input::InputSnapshot;
    use crate::sim::{Minigame, Rect, Verdict};

    pub fn bounds() -> Rect {
        Rect::screen(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Feed the same input until a verdict appears (or `max_ticks` pass)
    pub fn run_until_decided(
        game: &mut dyn Minigame,
        input: &InputSnapshot,
        max_ticks: u32,
    ) -> Option<Verdict> {
        for _ in 0..max_ticks {
            game.handle_input(input);
            if let Some(verdict) = game.update() {
                return Some(verdict);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::bounds;
    use super::*;
    use crate::input::InputSnapshot;
    use crate::renderer::ShapeBatch;
    use rand::SeedableRng;

    #[test]
    fn test_create_builds_requested_kind() {
        for kind in MinigameKind::ALL {
            let game = create(kind, bounds(), 42);
            assert_eq!(game.kind(), kind);
        }
    }

    #[test]
    fn test_every_variant_ticks_and_draws() {
        for kind in MinigameKind::ALL {
            let mut game = create(kind, bounds(), 7);
            let mut batch = ShapeBatch::new(bounds().size());
            for _ in 0..30 {
                game.handle_input(&InputSnapshot::default());
                let _ = game.update();
            }
            game.draw(&mut batch);
            assert!(!batch.vertices().is_empty(), "{:?} drew nothing", kind);
        }
    }

    #[test]
    fn test_tiny_playfield_never_panics() {
        let tiny = Rect::screen(10.0, 10.0);
        let mashing = InputSnapshot {
            movement: Vec2::new(1.0, 1.0),
            action: true,
            action_pressed: true,
        };
        for kind in MinigameKind::ALL {
            let mut game = create(kind, tiny, 3);
            let mut batch = ShapeBatch::new(tiny.size());
            for tick in 0..300 {
                let input = if tick % 2 == 0 { mashing } else { InputSnapshot::default() };
                game.handle_input(&input);
                let _ = game.update();
            }
            game.draw(&mut batch);
            game.reset();
            assert_eq!(game.kind(), kind);
        }
    }

    #[test]
    fn test_random_span_degenerate_range() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(5);
        assert_eq!(random_span(&mut rng, 50.0, -40.0), 5.0);
        for _ in 0..100 {
            let v = random_span(&mut rng, 10.0, 20.0);
            assert!((10.0..=20.0).contains(&v));
        }
    }

    #[test]
    fn test_move_clamped_stays_on_screen() {
        let mut r = Rect::new(5.0, 5.0, 10.0, 10.0);
        move_clamped(&mut r, Vec2::new(-1.0, -1.0), 20.0, &bounds());
        assert_eq!((r.x, r.y), (0.0, 0.0));
    }
}
