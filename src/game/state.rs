//! Match-level state: screen phase, star ledger and die

use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_UNLOCK_STARS, MAX_PLAYERS};

/// Which screen the match is on. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// Studio logo, fades into the title
    Splash,
    /// Player count selection
    Title,
    /// Shared board: roll the die or face the boss
    Board,
    /// A minigame round is running
    Minigame,
    /// Someone beat the boss (terminal)
    GameOver,
    /// Expansion unlock-code entry
    ExpansionMenu,
}

/// Per-player star counts and whose turn it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSet {
    stars: Vec<u32>,
    active: usize,
}

impl PlayerSet {
    pub fn new(count: usize) -> Self {
        let mut set = Self {
            stars: Vec::new(),
            active: 0,
        };
        set.reset_all(count);
        set
    }

    /// Fresh match: `count` players (clamped to 1-4), zero stars, player 1 first
    pub fn reset_all(&mut self, count: usize) {
        let count = count.clamp(1, MAX_PLAYERS);
        self.stars = vec![0; count];
        self.active = 0;
    }

    pub fn count(&self) -> usize {
        self.stars.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn stars(&self, player: usize) -> u32 {
        self.stars.get(player).copied().unwrap_or(0)
    }

    pub fn all_stars(&self) -> &[u32] {
        &self.stars
    }

    /// Stars only ever go up; unknown players are ignored
    pub fn award_star(&mut self, player: usize) {
        if let Some(s) = self.stars.get_mut(player) {
            *s += 1;
            log::info!("Player {} earns a star ({} total)", player + 1, s);
        }
    }

    /// Pass the turn to the next player, wrapping around
    pub fn advance_turn(&mut self) {
        self.active = (self.active + 1) % self.stars.len();
    }

    pub fn is_boss_unlocked(&self, player: usize) -> bool {
        self.stars(player) >= BOSS_UNLOCK_STARS
    }

    pub fn active_boss_unlocked(&self) -> bool {
        self.is_boss_unlocked(self.active)
    }
}

impl Default for PlayerSet {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Die animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollPhase {
    #[default]
    Idle,
    /// Face cycles until stopped (or timeout)
    Spinning,
    /// Stopped; short jump before the minigame starts
    Settling,
}

/// The board die. `value` is 0 until a roll has produced a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiceState {
    pub value: u8,
    pub phase: RollPhase,
    /// Ticks spent in the current phase
    pub timer: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_match_starts_clean() {
        for n in 1..=MAX_PLAYERS {
            let mut set = PlayerSet::new(4);
            set.award_star(2);
            set.advance_turn();
            set.reset_all(n);
            assert_eq!(set.count(), n);
            assert_eq!(set.active(), 0);
            assert!(set.all_stars().iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn test_turn_wraps() {
        let mut set = PlayerSet::new(3);
        set.advance_turn();
        set.advance_turn();
        assert_eq!(set.active(), 2);
        set.advance_turn();
        assert_eq!(set.active(), 0);
    }

    #[test]
    fn test_single_player_keeps_turn() {
        let mut set = PlayerSet::new(1);
        set.advance_turn();
        assert_eq!(set.active(), 0);
    }

    #[test]
    fn test_boss_unlock_threshold() {
        let mut set = PlayerSet::new(2);
        for _ in 0..BOSS_UNLOCK_STARS - 1 {
            set.award_star(1);
        }
        assert!(!set.is_boss_unlocked(1));
        set.award_star(1);
        assert!(set.is_boss_unlocked(1));
        assert!(!set.is_boss_unlocked(0));
    }

    #[test]
    fn test_player_count_clamped() {
        assert_eq!(PlayerSet::new(0).count(), 1);
        assert_eq!(PlayerSet::new(9).count(), MAX_PLAYERS);
    }

    proptest! {
        #[test]
        fn test_active_index_stays_in_range(n in 1usize..=4, turns in 0usize..50) {
            let mut set = PlayerSet::new(n);
            for _ in 0..turns {
                set.advance_turn();
            }
            prop_assert!(set.active() < set.count());
            prop_assert_eq!(set.active(), turns % n);
        }

        #[test]
        fn test_stars_never_decrease(awards in proptest::collection::vec(0usize..6, 0..40)) {
            let mut set = PlayerSet::new(4);
            for p in awards {
                let before = set.all_stars().to_vec();
                set.award_star(p);
                for (b, a) in before.iter().zip(set.all_stars()) {
                    prop_assert!(a >= b);
                }
            }
        }
    }
}
