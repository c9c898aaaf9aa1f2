//! Target practice: move the reticle and shoot targets before time runs out

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{draw_banner, move_clamped, random_span};
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict, circle_hits_rect};

/// Round length (10 seconds)
pub const ROUND_TICKS: u32 = 600;
const SPAWN_INTERVAL_TICKS: u32 = 40;
const TARGET_RADIUS: f32 = 20.0;
/// Targets never spawn closer than this to the edge
const SPAWN_MARGIN: f32 = 50.0;

const RETICLE_SIZE: f32 = 20.0;
const RETICLE_SPEED: f32 = 7.0;

#[derive(Debug, Clone)]
pub struct TargetGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    reticle: Rect,
    /// Target centers
    targets: Vec<Vec2>,
    timer: u32,
    spawn_timer: u32,
    score: u32,
    referee: Referee,
}

impl TargetGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            reticle: Rect::from_center(bounds.center(), Vec2::splat(RETICLE_SIZE)),
            targets: Vec::new(),
            timer: ROUND_TICKS,
            spawn_timer: 0,
            score: 0,
            referee: Referee::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.timer
    }

    fn spawn(&mut self) {
        let b = &self.bounds;
        let x = random_span(&mut self.rng, b.x + SPAWN_MARGIN, b.right() - SPAWN_MARGIN);
        let y = random_span(&mut self.rng, b.y + SPAWN_MARGIN, b.bottom() - SPAWN_MARGIN);
        self.targets.push(Vec2::new(x, y));
    }

    /// Remove every target under the reticle, scoring each
    fn shoot(&mut self) {
        let reticle = self.reticle;
        let before = self.targets.len();
        self.targets
            .retain(|t| !circle_hits_rect(*t, TARGET_RADIUS, &reticle));
        self.score += (before - self.targets.len()) as u32;
    }
}

impl Minigame for TargetGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Target
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }
        move_clamped(&mut self.reticle, input.movement, RETICLE_SPEED, &self.bounds);
        // One shot per press
        if input.action_pressed {
            self.shoot();
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.referee.decide(Outcome::Timeout { score: self.score });
            return self.referee.verdict();
        }

        self.spawn_timer += 1;
        if self.spawn_timer > SPAWN_INTERVAL_TICKS {
            self.spawn();
            self.spawn_timer = 0;
        }

        None
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::WHITE);

        for &t in &self.targets {
            canvas.fill_circle(t, TARGET_RADIUS, colors::RED);
            canvas.fill_circle(t, 15.0, colors::WHITE);
            canvas.fill_circle(t, 10.0, colors::RED);
        }

        let c = self.reticle.center();
        canvas.line(c - Vec2::new(10.0, 0.0), c + Vec2::new(10.0, 0.0), 2.0, colors::BLACK);
        canvas.line(c - Vec2::new(0.0, 10.0), c + Vec2::new(0.0, 10.0), 2.0, colors::BLACK);

        let b = &self.bounds;
        canvas.text(
            &format!("Score: {}", self.score),
            Vec2::new(b.x + 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Left,
            colors::BLACK,
        );
        canvas.text(
            &format!("Time: {}", self.timer / 60),
            Vec2::new(b.right() - 20.0, b.y + 20.0),
            FontSize::Large,
            Align::Right,
            colors::BLACK,
        );

        draw_banner(canvas, b, &self.referee, colors::BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::{bounds, run_until_decided};

    #[test]
    fn test_round_ends_on_timer() {
        let mut game = TargetGame::new(bounds(), 2);
        assert_eq!(game.time_left(), ROUND_TICKS);
        for _ in 0..ROUND_TICKS - 1 {
            assert!(game.update().is_none());
        }
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::Timeout { score: 0 });
    }

    #[test]
    fn test_score_never_ends_round_early() {
        let mut game = TargetGame::new(bounds(), 2);
        game.score = 1000;
        assert!(game.update().is_none());
    }

    #[test]
    fn test_shot_removes_target_and_scores() {
        let mut game = TargetGame::new(bounds(), 2);
        let center = game.reticle.center();
        game.targets.push(center);
        game.targets.push(center + Vec2::new(200.0, 0.0));

        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.score(), 1);
        assert_eq!(game.targets.len(), 1);

        // Holding without a new press does not fire
        game.targets.push(center);
        let held = InputSnapshot {
            action: true,
            ..Default::default()
        };
        game.handle_input(&held);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_final_message_reports_score() {
        let mut game = TargetGame::new(bounds(), 2);
        game.score = 6;
        let verdict = run_until_decided(&mut game, &InputSnapshot::default(), ROUND_TICKS).unwrap();
        assert_eq!(verdict.outcome, Outcome::Timeout { score: 6 });
        assert!(verdict.outcome.to_string().contains('6'));
    }

    #[test]
    fn test_targets_spawn_inside_margin() {
        let mut game = TargetGame::new(bounds(), 2);
        for _ in 0..50 {
            game.spawn();
        }
        let b = bounds();
        assert!(game.targets.iter().all(|t| {
            t.x >= b.x + SPAWN_MARGIN
                && t.x <= b.right() - SPAWN_MARGIN
                && t.y >= b.y + SPAWN_MARGIN
                && t.y <= b.bottom() - SPAWN_MARGIN
        }));
    }
}
