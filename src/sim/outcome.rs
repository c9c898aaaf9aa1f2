//! Round outcomes and the post-decision grace period

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::OUTCOME_GRACE_TICKS;

/// How a minigame round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The human player won outright
    PlayerVictory { score: Option<u32> },
    /// The computer side won (or the player was knocked out)
    OpponentVictory { score: Option<u32> },
    /// A timed round ran out; the score is what the player collected
    Timeout { score: u32 },
    /// The player brought the boss to zero health
    BossDefeated,
    /// The boss brought the player to zero health
    BossVictorious,
}

impl Outcome {
    /// Whether the active player earns a star for this round.
    ///
    /// A timed round that runs out always counts, whatever was collected.
    /// Boss outcomes never award stars: they end the match or pass the turn.
    pub fn awards_star(&self) -> bool {
        match self {
            Outcome::PlayerVictory { .. } | Outcome::Timeout { .. } => true,
            Outcome::OpponentVictory { .. } | Outcome::BossDefeated | Outcome::BossVictorious => {
                false
            }
        }
    }

    pub fn score(&self) -> Option<u32> {
        match self {
            Outcome::PlayerVictory { score } | Outcome::OpponentVictory { score } => *score,
            Outcome::Timeout { score } => Some(*score),
            Outcome::BossDefeated | Outcome::BossVictorious => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerVictory { score: None } => write!(f, "You Win!"),
            Outcome::PlayerVictory { score: Some(s) } => write!(f, "You Win! Score: {}", s),
            Outcome::OpponentVictory { score: None } => write!(f, "Computer Wins!"),
            Outcome::OpponentVictory { score: Some(s) } => write!(f, "Game Over! Score: {}", s),
            Outcome::Timeout { score } => write!(f, "Time's Up! Score: {}", score),
            Outcome::BossDefeated => write!(f, "YOU DEFEATED THE BOSS!"),
            Outcome::BossVictorious => write!(f, "BOSS WINS! YOU LOSE!"),
        }
    }
}

/// A decided round as reported by `Minigame::update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Ticks left before the match should leave the minigame
    pub grace_remaining: u32,
}

impl Verdict {
    /// Grace period is over; the owner should transition out
    pub fn is_final(&self) -> bool {
        self.grace_remaining == 0
    }
}

/// Holds a round's decision and counts down its grace period.
///
/// The first decision sticks; later calls to `decide` are ignored.
#[derive(Debug, Clone, Default)]
pub struct Referee {
    outcome: Option<Outcome>,
    grace: u32,
}

impl Referee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
            self.grace = OUTCOME_GRACE_TICKS;
        }
    }

    pub fn is_decided(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Current verdict without advancing the grace countdown
    pub fn verdict(&self) -> Option<Verdict> {
        self.outcome.map(|outcome| Verdict {
            outcome,
            grace_remaining: self.grace,
        })
    }

    /// Advance the grace countdown one tick and report the verdict
    pub fn tick(&mut self) -> Option<Verdict> {
        if self.outcome.is_some() {
            self.grace = self.grace.saturating_sub(1);
        }
        self.verdict()
    }
}
