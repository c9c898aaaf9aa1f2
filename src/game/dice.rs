//! Die roll animation and face-to-minigame resolution

use rand::Rng;

use super::state::{DiceState, RollPhase};
use crate::consts::{
    DICE_FACE_INTERVAL_TICKS, DICE_JUMP_HEIGHT, DICE_SETTLE_TICKS, DICE_SPIN_TIMEOUT_TICKS,
};
use crate::sim::MinigameKind;

/// Which minigame a settled face selects.
///
/// Faces 1-6 are always available; 7-9 only with the expansion pack.
/// Anything else selects nothing.
pub fn resolve(face: u8, expansion: bool) -> Option<MinigameKind> {
    match face {
        1 => Some(MinigameKind::Battle),
        2 => Some(MinigameKind::Racing),
        3 => Some(MinigameKind::Pong),
        4 => Some(MinigameKind::Dodgeball),
        5 => Some(MinigameKind::Target),
        6 => Some(MinigameKind::Coin),
        7 if expansion => Some(MinigameKind::Snake),
        8 if expansion => Some(MinigameKind::Shooter),
        9 if expansion => Some(MinigameKind::Pacman),
        _ => None,
    }
}

impl DiceState {
    pub fn is_idle(&self) -> bool {
        self.phase == RollPhase::Idle
    }

    /// Begin spinning (ignored unless idle)
    pub fn start(&mut self) {
        if self.phase == RollPhase::Idle {
            self.phase = RollPhase::Spinning;
            self.timer = 0;
        }
    }

    /// Stop spinning and begin the settle jump (ignored unless spinning)
    pub fn stop(&mut self) {
        if self.phase == RollPhase::Spinning {
            self.phase = RollPhase::Settling;
            self.timer = 0;
        }
    }

    /// Back to a blank, idle die
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the animation one tick. Returns the face once it has settled.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, faces: u8) -> Option<u8> {
        match self.phase {
            RollPhase::Idle => None,
            RollPhase::Spinning => {
                if self.timer % DICE_FACE_INTERVAL_TICKS == 0 {
                    self.value = rng.random_range(1..=faces.max(1));
                }
                self.timer += 1;
                if self.timer >= DICE_SPIN_TIMEOUT_TICKS {
                    self.stop();
                }
                None
            }
            RollPhase::Settling => {
                self.timer += 1;
                if self.timer >= DICE_SETTLE_TICKS {
                    self.phase = RollPhase::Idle;
                    self.timer = 0;
                    Some(self.value)
                } else {
                    None
                }
            }
        }
    }

    /// Upward offset of the settle jump (0 outside the settle phase)
    pub fn jump_offset(&self) -> f32 {
        if self.phase != RollPhase::Settling {
            return 0.0;
        }
        let t = self.timer as f32 / DICE_SETTLE_TICKS as f32;
        (t * std::f32::consts::PI).sin() * DICE_JUMP_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_DICE_FACES, EXPANSION_DICE_FACES};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_base_faces() {
        let expected = [
            MinigameKind::Battle,
            MinigameKind::Racing,
            MinigameKind::Pong,
            MinigameKind::Dodgeball,
            MinigameKind::Target,
            MinigameKind::Coin,
        ];
        for (i, kind) in expected.into_iter().enumerate() {
            let face = i as u8 + 1;
            assert_eq!(resolve(face, false), Some(kind));
            assert_eq!(resolve(face, true), Some(kind));
        }
    }

    #[test]
    fn test_expansion_faces_gated() {
        for face in 7..=9 {
            assert_eq!(resolve(face, false), None);
            assert!(resolve(face, true).is_some_and(|k| k.is_expansion()));
        }
        assert_eq!(resolve(0, true), None);
        assert_eq!(resolve(10, true), None);
    }

    #[test]
    fn test_boss_never_rolled() {
        for face in 0..=u8::MAX {
            assert_ne!(resolve(face, true), Some(MinigameKind::Boss));
        }
    }

    #[test]
    fn test_spin_times_out_then_settles() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut dice = DiceState::default();
        dice.start();
        for _ in 0..DICE_SPIN_TIMEOUT_TICKS {
            assert_eq!(dice.advance(&mut rng, BASE_DICE_FACES), None);
        }
        assert_eq!(dice.phase, RollPhase::Settling);

        let mut face = None;
        for _ in 0..DICE_SETTLE_TICKS {
            face = dice.advance(&mut rng, BASE_DICE_FACES);
        }
        let face = face.unwrap();
        assert!((1..=BASE_DICE_FACES).contains(&face));
        assert!(dice.is_idle());
    }

    #[test]
    fn test_stop_freezes_face() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut dice = DiceState::default();
        dice.start();
        dice.advance(&mut rng, BASE_DICE_FACES);
        dice.stop();
        let frozen = dice.value;
        assert!(frozen > 0);
        for _ in 0..DICE_SETTLE_TICKS - 1 {
            dice.advance(&mut rng, BASE_DICE_FACES);
            assert_eq!(dice.value, frozen);
        }
        assert_eq!(dice.advance(&mut rng, BASE_DICE_FACES), Some(frozen));
    }

    #[test]
    fn test_jump_peaks_mid_settle() {
        let mut dice = DiceState {
            phase: RollPhase::Settling,
            timer: DICE_SETTLE_TICKS / 2,
            value: 3,
        };
        assert!((dice.jump_offset() - DICE_JUMP_HEIGHT).abs() < 0.01);
        dice.phase = RollPhase::Idle;
        assert_eq!(dice.jump_offset(), 0.0);
    }

    proptest! {
        #[test]
        fn test_resolve_is_pure(face in 1u8..=9, expansion in any::<bool>()) {
            prop_assert_eq!(resolve(face, expansion), resolve(face, expansion));
            prop_assert_eq!(resolve(face, expansion).is_some(), face <= 6 || expansion);
        }

        #[test]
        fn test_rolled_faces_in_range(seed in any::<u64>(), expansion in any::<bool>()) {
            let faces = if expansion { EXPANSION_DICE_FACES } else { BASE_DICE_FACES };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut dice = DiceState::default();
            dice.start();
            let mut face = None;
            while face.is_none() {
                face = dice.advance(&mut rng, faces);
            }
            let face = face.unwrap_or(0);
            prop_assert!(face >= 1 && face <= faces);
            prop_assert!(resolve(face, expansion).is_some());
        }
    }
}
