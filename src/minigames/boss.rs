//! Boss fight: the final encounter, unlocked at 14 stars
//!
//! The boss cycles through a small state machine:
//! - `Idle`: drifts up and down for a random dwell, then picks an attack
//! - `Fireball`: volley of ranged shots with random vertical spread
//! - `Fist`: charges across the arena, then `Retreat`s to its corner
//! - `Rocket`: a single slow projectile that homes on the player's height
//!
//! The player's attack is picked by distance: a punch up close, a
//! fireball from range.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{draw_banner, draw_bar, move_clamped};
use crate::input::InputSnapshot;
use crate::renderer::{Canvas, colors};
use crate::sim::{Minigame, MinigameKind, Outcome, Referee, Rect, Verdict};

const PLAYER_SIZE: f32 = 50.0;
const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HP: i32 = 100;

const BOSS_SIZE: f32 = 150.0;
pub const BOSS_MAX_HP: i32 = 500;
/// Vertical jitter while idle
const BOSS_DRIFT: f32 = 2.0;
const IDLE_DWELL_MIN: u32 = 45;
const IDLE_DWELL_MAX: u32 = 90;

/// Closer than this (center to center) the player punches instead of shooting
const MELEE_RANGE: f32 = 150.0;
const PUNCH_REACH: f32 = 60.0;
const PUNCH_DAMAGE: i32 = 5;
const PUNCH_COOLDOWN: u32 = 20;
const SHOT_SIZE: f32 = 20.0;
const SHOT_SPEED: f32 = 10.0;
const SHOT_DAMAGE: i32 = 2;
const SHOT_COOLDOWN: u32 = 30;

const FIREBALL_SIZE: f32 = 30.0;
const FIREBALL_SPEED: f32 = 8.0;
const FIREBALL_SPREAD: i32 = 3;
const FIREBALL_INTERVAL: u32 = 20;
const FIREBALL_PHASE_TICKS: u32 = 100;
const FIREBALL_DAMAGE: i32 = 10;

const ROCKET_LAUNCH_TICK: u32 = 30;
const ROCKET_PHASE_TICKS: u32 = 80;
const ROCKET_SPEED: f32 = 5.0;
const ROCKET_HOMING: f32 = 2.0;
const ROCKET_DAMAGE: i32 = 15;

const FIST_SPEED: f32 = 10.0;
const RETREAT_SPEED: f32 = 5.0;
/// Damage per tick while touching the boss
const CONTACT_DAMAGE: i32 = 1;

/// Boss behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Idle { dwell: u32 },
    Fireball,
    Fist,
    Retreat,
    Rocket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Fireball,
    Rocket,
}

impl HazardKind {
    fn damage(&self) -> i32 {
        match self {
            HazardKind::Fireball => FIREBALL_DAMAGE,
            HazardKind::Rocket => ROCKET_DAMAGE,
        }
    }
}

/// A boss projectile
#[derive(Debug, Clone)]
pub struct Hazard {
    pub rect: Rect,
    pub vel: Vec2,
    pub kind: HazardKind,
}

#[derive(Debug, Clone)]
pub struct BossFight {
    bounds: Rect,
    seed: u64,
    rng: Pcg32,
    player: Rect,
    player_hp: i32,
    attack_cooldown: u32,
    /// Player fireballs (fly right)
    shots: Vec<Rect>,
    boss: Rect,
    boss_hp: i32,
    phase: BossPhase,
    phase_timer: u32,
    hazards: Vec<Hazard>,
    referee: Referee,
}

impl BossFight {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self::fresh(bounds, seed)
    }

    fn fresh(bounds: Rect, seed: u64) -> Self {
        let mid_y = bounds.center().y;
        let mut rng = Pcg32::seed_from_u64(seed);
        let dwell = rng.random_range(IDLE_DWELL_MIN..=IDLE_DWELL_MAX);
        Self {
            bounds,
            seed,
            rng,
            player: Rect::new(bounds.x + 100.0, mid_y, PLAYER_SIZE, PLAYER_SIZE),
            player_hp: PLAYER_MAX_HP,
            attack_cooldown: 0,
            shots: Vec::new(),
            boss: Rect::new(
                bounds.right() - BOSS_SIZE,
                mid_y - BOSS_SIZE / 2.0,
                BOSS_SIZE,
                BOSS_SIZE,
            ),
            boss_hp: BOSS_MAX_HP,
            phase: BossPhase::Idle { dwell },
            phase_timer: 0,
            hazards: Vec::new(),
            referee: Referee::new(),
        }
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn health(&self) -> (i32, i32) {
        (self.player_hp, self.boss_hp)
    }

    fn enter(&mut self, phase: BossPhase) {
        log::debug!("Boss phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_timer = 0;
    }

    fn enter_idle(&mut self) {
        let dwell = self.rng.random_range(IDLE_DWELL_MIN..=IDLE_DWELL_MAX);
        self.enter(BossPhase::Idle { dwell });
    }

    /// Punch up close, fireball from range
    fn attack(&mut self) {
        if self.player.center_distance(&self.boss) < MELEE_RANGE {
            let punch = Rect::new(self.player.right(), self.player.y, PUNCH_REACH, PLAYER_SIZE);
            if punch.intersects(&self.boss) {
                self.boss_hp -= PUNCH_DAMAGE;
            }
            self.attack_cooldown = PUNCH_COOLDOWN;
        } else {
            self.shots.push(Rect::new(
                self.player.right(),
                self.player.center().y - SHOT_SIZE / 2.0,
                SHOT_SIZE,
                SHOT_SIZE,
            ));
            self.attack_cooldown = SHOT_COOLDOWN;
        }
    }

    fn run_boss(&mut self) {
        self.phase_timer += 1;
        let t = self.phase_timer;

        match self.phase {
            BossPhase::Idle { dwell } => {
                let dy = if self.rng.random_bool(0.5) { BOSS_DRIFT } else { -BOSS_DRIFT };
                self.boss.y += dy;
                self.boss.clamp_within(&self.bounds);
                if t > dwell {
                    let next = match self.rng.random_range(0..3) {
                        0 => BossPhase::Fireball,
                        1 => BossPhase::Fist,
                        _ => BossPhase::Rocket,
                    };
                    self.enter(next);
                }
            }
            BossPhase::Fireball => {
                if t % FIREBALL_INTERVAL == 0 {
                    let dy = self.rng.random_range(-FIREBALL_SPREAD..=FIREBALL_SPREAD) as f32;
                    self.hazards.push(Hazard {
                        rect: Rect::new(
                            self.boss.x,
                            self.boss.center().y,
                            FIREBALL_SIZE,
                            FIREBALL_SIZE,
                        ),
                        vel: Vec2::new(-FIREBALL_SPEED, dy),
                        kind: HazardKind::Fireball,
                    });
                }
                if t > FIREBALL_PHASE_TICKS {
                    self.enter_idle();
                }
            }
            BossPhase::Fist => {
                self.boss.x -= FIST_SPEED;
                if self.boss.x < self.bounds.x + 100.0 {
                    self.enter(BossPhase::Retreat);
                }
            }
            BossPhase::Retreat => {
                self.boss.x += RETREAT_SPEED;
                if self.boss.x > self.bounds.right() - 200.0 {
                    self.enter_idle();
                }
            }
            BossPhase::Rocket => {
                if t == ROCKET_LAUNCH_TICK {
                    self.hazards.push(Hazard {
                        rect: Rect::new(self.boss.x, self.boss.center().y, 50.0, 20.0),
                        vel: Vec2::new(-ROCKET_SPEED, 0.0),
                        kind: HazardKind::Rocket,
                    });
                }
                if t > ROCKET_PHASE_TICKS {
                    self.enter_idle();
                }
            }
        }
    }

    fn step_hazards(&mut self) {
        let player = self.player;
        let bounds = self.bounds;
        let mut damage = 0;

        self.hazards.retain_mut(|h| {
            h.rect.translate(h.vel);
            if h.kind == HazardKind::Rocket {
                // Home on the player's height
                h.vel.y = if h.rect.y < player.y {
                    ROCKET_HOMING
                } else if h.rect.y > player.y {
                    -ROCKET_HOMING
                } else {
                    0.0
                };
            }

            if h.rect.intersects(&player) {
                damage += h.kind.damage();
                false
            } else {
                h.rect.right() >= bounds.x && h.rect.bottom() >= bounds.y && h.rect.y <= bounds.bottom()
            }
        });

        self.player_hp -= damage;
    }

    fn step_shots(&mut self) {
        let boss = self.boss;
        let right = self.bounds.right();
        let mut hits = 0;

        self.shots.retain_mut(|s| {
            s.x += SHOT_SPEED;
            if s.intersects(&boss) {
                hits += 1;
                false
            } else {
                s.x <= right
            }
        });

        self.boss_hp -= hits * SHOT_DAMAGE;
    }
}

impl Minigame for BossFight {
    fn kind(&self) -> MinigameKind {
        MinigameKind::Boss
    }

    fn reset(&mut self) {
        *self = Self::fresh(self.bounds, self.seed);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if self.referee.is_decided() {
            return;
        }

        move_clamped(&mut self.player, input.movement, PLAYER_SPEED, &self.bounds);

        if input.action && self.attack_cooldown == 0 {
            self.attack();
        }
    }

    fn update(&mut self) -> Option<Verdict> {
        if self.referee.is_decided() {
            return self.referee.tick();
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);

        self.run_boss();
        self.step_hazards();
        self.step_shots();

        if self.boss.intersects(&self.player) {
            self.player_hp -= CONTACT_DAMAGE;
        }

        if self.player_hp <= 0 {
            self.referee.decide(Outcome::BossVictorious);
        } else if self.boss_hp <= 0 {
            self.referee.decide(Outcome::BossDefeated);
        }

        self.referee.verdict()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);

        canvas.fill_rect(self.boss, colors::BOSS);
        // Eye
        canvas.fill_rect(
            Rect::new(self.boss.x + 20.0, self.boss.y + 30.0, 30.0, 30.0),
            colors::YELLOW,
        );

        canvas.fill_rect(self.player, colors::BLUE);

        for h in &self.hazards {
            let color = match h.kind {
                HazardKind::Fireball => colors::ORANGE,
                HazardKind::Rocket => colors::GREEN,
            };
            canvas.fill_rect(h.rect, color);
        }
        for s in &self.shots {
            canvas.fill_circle(s.center(), SHOT_SIZE / 2.0, colors::CYAN);
        }

        let b = &self.bounds;
        draw_bar(
            canvas,
            Rect::new(b.x + 50.0, b.y + 50.0, 200.0, 20.0),
            self.player_hp as f32 / PLAYER_MAX_HP as f32,
            colors::RED,
            colors::GREEN,
        );
        draw_bar(
            canvas,
            Rect::new(b.right() - 450.0, b.y + 50.0, 400.0, 30.0),
            self.boss_hp as f32 / BOSS_MAX_HP as f32,
            colors::RED,
            colors::YELLOW,
        );

        draw_banner(canvas, b, &self.referee, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::test_support::bounds;

    /// Freeze the boss in a long idle so tests control the action
    fn calm(game: &mut BossFight) {
        game.phase = BossPhase::Idle { dwell: u32::MAX };
    }

    #[test]
    fn test_punch_in_melee_range() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.player.x = game.boss.x - PLAYER_SIZE - 10.0;
        game.player.y = game.boss.y + 50.0;
        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.health().1, BOSS_MAX_HP - PUNCH_DAMAGE);
        assert_eq!(game.attack_cooldown, PUNCH_COOLDOWN);
        assert!(game.shots.is_empty());
    }

    #[test]
    fn test_fireball_from_range() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.player.y = game.boss.y + 50.0;
        game.handle_input(&InputSnapshot::pressing());
        assert_eq!(game.shots.len(), 1);
        assert_eq!(game.attack_cooldown, SHOT_COOLDOWN);

        // Fly until it lands
        for _ in 0..100 {
            game.update();
            if game.shots.is_empty() {
                break;
            }
        }
        assert_eq!(game.health().1, BOSS_MAX_HP - SHOT_DAMAGE);
    }

    #[test]
    fn test_defeating_boss() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.boss_hp = 0;
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::BossDefeated);
        assert!(!verdict.outcome.awards_star());
    }

    #[test]
    fn test_boss_wins_when_player_falls() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.player_hp = FIREBALL_DAMAGE;
        game.hazards.push(Hazard {
            rect: Rect::new(game.player.right() + 2.0, game.player.y, 30.0, 30.0),
            vel: Vec2::new(-FIREBALL_SPEED, 0.0),
            kind: HazardKind::Fireball,
        });
        let verdict = game.update().unwrap();
        assert_eq!(verdict.outcome, Outcome::BossVictorious);
    }

    #[test]
    fn test_idle_picks_an_attack_after_dwell() {
        let mut game = BossFight::new(bounds(), 1);
        game.phase = BossPhase::Idle { dwell: 10 };
        for _ in 0..11 {
            game.update();
        }
        assert!(matches!(
            game.phase(),
            BossPhase::Fireball | BossPhase::Fist | BossPhase::Rocket
        ));
    }

    #[test]
    fn test_fist_charges_then_retreats_to_idle() {
        let mut game = BossFight::new(bounds(), 1);
        // Keep the player out of the charge lane
        game.player.y = bounds().y;
        game.boss.y = bounds().bottom() - BOSS_SIZE;
        game.enter(BossPhase::Fist);

        let mut saw_retreat = false;
        for _ in 0..300 {
            game.update();
            saw_retreat |= game.phase() == BossPhase::Retreat;
            if matches!(game.phase(), BossPhase::Idle { .. }) {
                break;
            }
        }
        assert!(saw_retreat);
        assert!(matches!(game.phase(), BossPhase::Idle { .. }));
    }

    #[test]
    fn test_rocket_homes_on_player() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.player.y = bounds().y;
        game.hazards.push(Hazard {
            rect: Rect::new(500.0, 400.0, 50.0, 20.0),
            vel: Vec2::new(-ROCKET_SPEED, 0.0),
            kind: HazardKind::Rocket,
        });
        game.update();
        game.update();
        let rocket = &game.hazards[0];
        assert!(rocket.rect.y < 400.0);
    }

    #[test]
    fn test_contact_damage() {
        let mut game = BossFight::new(bounds(), 1);
        calm(&mut game);
        game.player.set_center(game.boss.center());
        game.update();
        assert_eq!(game.health().0, PLAYER_MAX_HP - CONTACT_DAMAGE);
    }
}
