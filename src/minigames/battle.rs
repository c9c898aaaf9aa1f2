//! Battle arena: melee duel against a pursuing computer fighter

use glam::Vec2;

use super::{draw_banner, draw_bar, move_clamped};
use crate::input::InputSnapshot;
use crate::renderer::{Canvas, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

const FIGHTER_SIZE: f32 = 50.0;
const PLAYER_SPEED: f32 = 5.0;
/// The computer is slower than the player
const AI_SPEED: f32 = 3.0;
const MAX_HEALTH: i32 = 100;

/// Attacks land when fighter centers are closer than this
const HIT_RANGE: f32 = 70.0;
/// Computer only swings when this close
const AI_ENGAGE_RANGE: f32 = 60.0;

const PLAYER_DAMAGE: i32 = 10;
const PLAYER_COOLDOWN: u32 = 30;
const AI_DAMAGE: i32 = 5;
const AI_COOLDOWN: u32 = 60;

/// Cooldown above which the "just swung" ring is shown
const SWING_INDICATOR_TICKS: u32 = 15;

/// A rectangle combatant
#[derive(Debug, Clone)]
pub struct Fighter {
    pub rect: Rect,
    pub health: i32,
    /// Ticks until the next attack is allowed
    pub cooldown: u32,
}

impl Fighter {
    fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, FIGHTER_SIZE, FIGHTER_SIZE),
            health: MAX_HEALTH,
            cooldown: 0,
        }
    }

    fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// Step `from` toward `to` by at most `step`
#[inline]
fn approach(from: f32, to: f32, step: f32) -> f32 {
    from + (to - from).clamp(-step, step)
}

#[derive(Debug, Clone)]
pub struct BattleGame {
    bounds: Rect,
    player: Fighter,
    opponent: Fighter,
    referee: Referee,
}

impl BattleGame {
    pub fn new(bounds: Rect, _seed: u64) -> Self {
        Self::fresh(bounds)
    }

    fn fresh(bounds: Rect) -> Self {
        let mid_y = bounds.center().y;
        Self {
            bounds,
            player: Fighter::new(Vec2::new(bounds.x + 100.0, mid_y)),
            opponent: Fighter::new(Vec2::new(bounds.right() - 150.0, mid_y)),
            referee: Referee::new(),
        }
    }

    /// Resolve a swing; returns true if it landed
    fn strike(attacker: &mut Fighter, target: &mut Fighter, damage: i32, cooldown: u32) -> bool {
        if attacker.cooldown > 0 || attacker.rect.center_distance(&target.rect) >= HIT_RANGE {
            return false;
        }
        target.health -= damage;
        attacker.cooldown = cooldown;
        true
    }

    /// Manhattan pursuit, then swing when close enough
    fn run_ai(&mut self) {
        let target = Vec2::new(self.player.rect.x, self.player.rect.y);
        let rect = &mut self.opponent.rect;
        rect.x = approach(rect.x, target.x, AI_SPEED);
        rect.y = approach(rect.y, target.y, AI_SPEED);

        if self.opponent.rect.center_distance(&self.player.rect) < AI_ENGAGE_RANGE {
            Self::strike(&mut self.opponent, &mut self.player, AI_DAMAGE, AI_COOLDOWN);
        }
    }
}

impl Minigame for BattleGame {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Battle
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }

        move_clamped(&mut self.player.rect, input.movement, PLAYER_SPEED, &self.bounds);

        if input.action {
            Self::strike(&mut self.player, &mut self.opponent, PLAYER_DAMAGE, PLAYER_COOLDOWN);
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.run_ai();
        self.player.tick_cooldown();
        self.opponent.tick_cooldown();

        if self.opponent.health <= 0 {
            self.referee.decide(Outcome::PlayerVictory { score: None });
        } else if self.player.health <= 0 {
            self.referee.decide(Outcome::OpponentVictory { score: None });
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::ARENA);

        canvas.fill_rect(self.player.rect, colors::BLUE);
        canvas.fill_rect(self.opponent.rect, colors::RED);

        let b = &self.bounds;
        draw_bar(
            canvas,
            Rect::new(b.x + 50.0, b.y + 50.0, 200.0, 20.0),
            self.player.health as f32 / MAX_HEALTH as f32,
            colors::RED,
            colors::GREEN,
        );
        draw_bar(
            canvas,
            Rect::new(b.right() - 250.0, b.y + 50.0, 200.0, 20.0),
            self.opponent.health as f32 / MAX_HEALTH as f32,
            colors::RED,
            colors::GREEN,
        );

        if self.player.cooldown > SWING_INDICATOR_TICKS {
            canvas.stroke_circle(self.player.rect.center(), 40.0, 2.0, colors::WHITE);
        }

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}
