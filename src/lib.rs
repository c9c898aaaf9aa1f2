//! Battle Street - A local multiplayer party board game
//!
//! Core modules:
//! - `game`: Match state machine (splash, title, board, minigame, game over), dice and star ledger
//! - `sim`: Minigame contract (lifecycle trait, outcomes, geometry)
//! - `minigames`: The closed set of minigame variants
//! - `renderer`: Canvas collaborator and CPU-side shape batching
//! - `input`: Logical input events and held-control snapshots
//! - `settings`: Persisted expansion pack flag

pub mod error;
pub mod game;
pub mod input;
pub mod minigames;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use game::{Game, MatchState};
pub use input::{Controls, InputEvent, InputSnapshot};
pub use settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore};
pub use sim::{Minigame, MinigameKind, Outcome, Rect, Verdict};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick rate (frames per second)
    pub const TICK_RATE: u32 = 60;

    /// Default display dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Splash screen length and the fade-out window at its end
    pub const SPLASH_DURATION_TICKS: u32 = 180;
    pub const SPLASH_FADE_TICKS: u32 = 60;

    /// Ticks a decided minigame keeps reporting its outcome before cutover
    pub const OUTCOME_GRACE_TICKS: u32 = 180;

    /// Player slots
    pub const MAX_PLAYERS: usize = 4;
    /// Stars needed to face the boss
    pub const BOSS_UNLOCK_STARS: u32 = 14;

    /// Dice faces (base game / with expansion pack)
    pub const BASE_DICE_FACES: u8 = 6;
    pub const EXPANSION_DICE_FACES: u8 = 9;
    /// Spinning die stops by itself after this many ticks
    pub const DICE_SPIN_TIMEOUT_TICKS: u32 = 120;
    /// Face changes every N ticks while spinning
    pub const DICE_FACE_INTERVAL_TICKS: u32 = 4;
    /// Jump animation after the die is stopped
    pub const DICE_SETTLE_TICKS: u32 = 30;
    /// Jump height of the settle animation (pixels)
    pub const DICE_JUMP_HEIGHT: f32 = 40.0;
    /// Die size on the board
    pub const DICE_SIZE: f32 = 100.0;

    /// Expansion unlock code and entry limits
    pub const UNLOCK_CODE: &str = "73194628055";
    pub const UNLOCK_MAX_DIGITS: usize = 12;
    /// Delay before the code menu returns to the title after a successful unlock
    pub const UNLOCK_RETURN_TICKS: u32 = 90;

    /// Analog stick dead zone
    pub const AXIS_DEAD_ZONE: f32 = 0.1;
}

/// Unit vector for an angle in radians
#[inline]
pub fn angle_to_dir(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Rotate `current` toward `target` by at most `max_turn` radians, keeping its length
#[inline]
pub fn steer_toward(current: Vec2, target: Vec2, max_turn: f32) -> Vec2 {
    let speed = current.length();
    if speed == 0.0 || target == Vec2::ZERO {
        return current;
    }
    let heading = current.y.atan2(current.x);
    let wanted = target.y.atan2(target.x);
    let delta = normalize_angle(wanted - heading).clamp(-max_turn, max_turn);
    angle_to_dir(heading + delta) * speed
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 0.0001);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_steer_toward_is_bounded() {
        let vel = Vec2::new(0.0, 5.0);
        let steered = steer_toward(vel, Vec2::new(1.0, 0.0), 0.1);
        // Speed is preserved
        assert!((steered.length() - 5.0).abs() < 0.001);
        // Turned by exactly the cap toward +x
        let turned = normalize_angle(steered.y.atan2(steered.x) - vel.y.atan2(vel.x));
        assert!((turned.abs() - 0.1).abs() < 0.001);
        assert!(steered.x > 0.0);
    }

    #[test]
    fn test_steer_toward_small_correction_snaps() {
        let vel = Vec2::new(3.0, 0.0);
        let target = angle_to_dir(0.01);
        let steered = steer_toward(vel, target, 0.1);
        assert!((steered.normalize() - target).length() < 0.001);
    }
}
