//! Foot race: hold the action button to run, first to the finish line wins

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw_banner;
use crate::input::InputSnapshot;
use crate::renderer::{Align, Canvas, FontSize, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

/// Distance to cover (pixels of track)
pub const RACE_DISTANCE: f32 = 350.0;
/// Player gain per tick with action held
const PLAYER_STRIDE: f32 = 5.0;
/// Computer gain per tick, sampled uniformly
const AI_STRIDE_MIN: u32 = 3;
const AI_STRIDE_MAX: u32 = 6;
/// "3, 2, 1" before the start; input is ignored meanwhile
pub const COUNTDOWN_TICKS: u32 = 180;

const RUNNER_WIDTH: f32 = 40.0;
const RUNNER_HEIGHT: f32 = 60.0;
const FINISH_MARGIN: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct RacingGame {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    countdown: u32,
    player_distance: f32,
    ai_distance: f32,
    referee: Referee,
}

impl RacingGame {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            countdown: COUNTDOWN_TICKS,
            player_distance: 0.0,
            ai_distance: 0.0,
            referee: Referee::new(),
        }
    }

    pub fn player_distance(&self) -> f32 {
        self.player_distance
    }

    pub fn ai_distance(&self) -> f32 {
        self.ai_distance
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown > 0
    }

    fn finish_y(&self) -> f32 {
        self.bounds.y + FINISH_MARGIN
    }

    /// Runner rect for a lane at a given distance
    fn runner(&self, lane_x: f32, distance: f32) -> Rect {
        let start_y = self.finish_y() + RACE_DISTANCE;
        Rect::new(lane_x, start_y - distance, RUNNER_WIDTH, RUNNER_HEIGHT)
    }
}

impl Minigame for RacingGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Racing
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() || self.is_counting_down() {
            return;
        }
        if input.action {
            self.player_distance += PLAYER_STRIDE;
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }

        self.ai_distance += self.rng.random_range(AI_STRIDE_MIN..=AI_STRIDE_MAX) as f32;

        // A photo finish goes to the player
        if self.player_distance >= RACE_DISTANCE {
            self.referee.decide(Outcome::PlayerVictory { score: None });
        } else if self.ai_distance >= RACE_DISTANCE {
            self.referee.decide(Outcome::OpponentVictory { score: None });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::GRASS);

        let b = &self.bounds;
        let track = Rect::new(b.center().x - 250.0, b.y, 500.0, b.h);
        canvas.fill_rect(track, colors::GREY);
        canvas.fill_rect(Rect::new(track.x, self.finish_y(), track.w, 10.0), colors::WHITE);

        let player = self.runner(track.x + 50.0, self.player_distance.min(RACE_DISTANCE));
        let ai = self.runner(track.x + 350.0, self.ai_distance.min(RACE_DISTANCE));
        canvas.fill_rect(player, colors::BLUE);
        canvas.fill_rect(ai, colors::RED);

        if self.countdown > 0 {
            let n = self.countdown.div_ceil(60);
            canvas.text(&n.to_string(), b.center(), FontSize::Large, Align::Center, colors::WHITE);
        }

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::{bounds, run_until_decided};

    #[test]
    fn test_countdown_ignores_input() {
        let mut game = RacingGame::new(bounds(), 5);
        for _ in 0..COUNTDOWN_TICKS {
            game.handle_input(&InputSnapshot::pressing());
            assert!(game.update().is_none());
        }
        assert_eq!(game.player_distance(), 0.0);
        assert_eq!(game.ai_distance(), 0.0);
        assert!(!game.is_counting_down());
    }

    #[test]
    fn test_ai_stride_is_bounded() {
        let mut game = RacingGame::new(bounds(), 11);
        game.countdown = 0;
        let mut last = 0.0;
        for _ in 0..20 {
            game.update();
            let step = game.ai_distance() - last;
            assert!((3.0..=6.0).contains(&step));
            last = game.ai_distance();
        }
    }

    #[test]
    fn test_idle_player_loses() {
        let mut game = RacingGame::new(bounds(), 3);
        let verdict = run_until_decided(&mut game, &InputSnapshot::default(), 1000).unwrap();
        assert_eq!(verdict.outcome, Outcome::OpponentVictory { score: None });
    }

    #[test]
    fn test_runner_holding_action_wins() {
        // Player runs 5/tick, computer averages 4.5/tick
        let mut game = RacingGame::new(bounds(), 3);
        game.countdown = 0;
        game.player_distance = RACE_DISTANCE - PLAYER_STRIDE;
        game.handle_input(&InputSnapshot::pressing());
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::PlayerVictory { score: None });
    }
}
