//! Match orchestration
//!
//! `Game` owns everything that lives for a whole session: the screen state,
//! the star ledger, the die, the active minigame and the expansion setting.
//! It is advanced once per fixed tick by [`Game::tick`] and rendered by
//! [`Game::draw`].

pub mod dice;
pub mod draw;
pub mod state;
pub mod tick;
pub mod unlock;

pub use dice::resolve;
pub use state::{DiceState, MatchState, PlayerSet, RollPhase};
pub use unlock::{CodeEntry, Submission};

use rand_pcg::Pcg32;

use crate::input::Controls;
use crate::settings::{Settings, SettingsStore};
use crate::sim::{Minigame, MinigameKind, Rect};

pub struct Game {
    bounds: Rect,
    seed: u64,
    /// Match RNG; also seeds each minigame round
    rng: Pcg32,
    state: MatchState,
    running: bool,
    /// Ticks since start (drives blinking text)
    frame: u64,
    splash_timer: u32,
    players: PlayerSet,
    dice: DiceState,
    minigame: Option<Box<dyn Minigame>>,
    /// Index of the player who beat the boss
    winner: Option<usize>,
    settings: Settings,
    store: Box<dyn SettingsStore>,
    code: CodeEntry,
    controls: Controls,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// False once a quit has been requested
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn players(&self) -> &PlayerSet {
        &self.players
    }

    pub fn dice(&self) -> &DiceState {
        &self.dice
    }

    pub fn minigame_kind(&self) -> Option<MinigameKind> {
        self.minigame.as_ref().map(|m| m.kind())
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn settings_store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn code_entry(&self) -> &CodeEntry {
        &self.code
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Held-input state; the host updates it before each tick
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Die rect on the board (before the settle jump)
    pub fn die_rect(&self) -> Rect {
        Rect::from_center(
            self.bounds.center(),
            glam::Vec2::splat(crate::consts::DICE_SIZE),
        )
    }
}
