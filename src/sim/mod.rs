//! Minigame simulation contract
//!
//! Every minigame is a small fixed-tick simulation:
//! - Fixed timestep only (one `update` per frame)
//! - Seeded RNG only (each round gets its own generator)
//! - Display bounds passed in at construction, never read from globals
//! - Drawing goes through the `Canvas` collaborator and never mutates state

pub mod collision;
pub mod grid;
pub mod outcome;
pub mod rect;

pub use collision::{circle_hits_rect, circle_outside};
pub use grid::{Cell, Dir};
pub use outcome::{Outcome, Referee, Verdict};
pub use rect::Rect;

use crate::input::InputSnapshot;
use crate::renderer::Canvas;

/// The closed set of minigame variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinigameKind {
    Battle,
    Racing,
    Pong,
    Dodgeball,
    Target,
    Coin,
    Boss,
    // Expansion pack
    Snake,
    Shooter,
    Pacman,
}

impl MinigameKind {
    pub const ALL: [MinigameKind; 10] = [
        MinigameKind::Battle,
        MinigameKind::Racing,
        MinigameKind::Pong,
        MinigameKind::Dodgeball,
        MinigameKind::Target,
        MinigameKind::Coin,
        MinigameKind::Boss,
        MinigameKind::Snake,
        MinigameKind::Shooter,
        MinigameKind::Pacman,
    ];

    /// Name shown under the die
    pub fn title(&self) -> &'static str {
        match self {
            MinigameKind::Battle => "BATTLE ARENA",
            MinigameKind::Racing => "RACING",
            MinigameKind::Pong => "PONG",
            MinigameKind::Dodgeball => "DODGEBALL",
            MinigameKind::Target => "TARGET PRACTICE",
            MinigameKind::Coin => "COIN COLLECTOR",
            MinigameKind::Boss => "BOSS FIGHT",
            MinigameKind::Snake => "SNAKE",
            MinigameKind::Shooter => "SPACE SHOOTER",
            MinigameKind::Pacman => "MAZE CHASE",
        }
    }

    /// Only reachable with the expansion pack unlocked
    pub fn is_expansion(&self) -> bool {
        matches!(
            self,
            MinigameKind::Snake | MinigameKind::Shooter | MinigameKind::Pacman
        )
    }
}

/// Uniform lifecycle every minigame variant satisfies
pub trait Minigame {
    fn kind(&self) -> MinigameKind;

    /// (Re)initialize all entity state; called once at construction
    fn reset(&mut self);

    /// Apply this tick's controls. No-op once the round is decided.
    fn handle_input(&mut self, input: &InputSnapshot);

    /// Advance one tick. Returns the verdict on every tick from the decision
    /// onward; it becomes final once the grace period has elapsed.
    fn update(&mut self) -> Option<Verdict>;

    /// Render current state, plus the outcome banner once decided
    fn draw(&self, canvas: &mut dyn Canvas);
}
