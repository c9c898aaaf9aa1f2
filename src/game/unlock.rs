//! Expansion pack unlock-code entry

use crate::consts::{UNLOCK_CODE, UNLOCK_MAX_DIGITS, UNLOCK_RETURN_TICKS};
use crate::input::digits_only;

pub const MSG_INVALID: &str = "Invalid Code";
pub const MSG_UNLOCKED: &str = "Expansion Pack Unlocked!";

/// Result of submitting the current entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Nothing entered; ignored
    Empty,
    Accepted,
    Rejected,
}

/// Digit buffer, status message and the post-unlock return countdown
#[derive(Debug, Clone, Default)]
pub struct CodeEntry {
    digits: String,
    message: Option<&'static str>,
    /// Set after a correct code; counts down to the return to the title
    return_timer: Option<u32>,
}

impl CodeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// A correct code was entered and the menu is about to close
    pub fn is_unlocking(&self) -> bool {
        self.return_timer.is_some()
    }

    /// Append one digit; non-digits, overflow and input after unlocking are ignored
    pub fn push_digit(&mut self, c: char) {
        if self.is_unlocking() || !c.is_ascii_digit() || self.digits.len() >= UNLOCK_MAX_DIGITS {
            return;
        }
        self.digits.push(c);
    }

    /// Append the digits of pasted text, dropping everything else
    pub fn paste(&mut self, text: &str) {
        for c in digits_only(text) {
            self.push_digit(c);
        }
    }

    pub fn erase(&mut self) {
        if !self.is_unlocking() {
            self.digits.pop();
        }
    }

    pub fn clear(&mut self) {
        if !self.is_unlocking() {
            self.digits.clear();
            self.message = None;
        }
    }

    /// Compare against the unlock code (exact match)
    pub fn submit(&mut self) -> Submission {
        if self.is_unlocking() || self.digits.is_empty() {
            return Submission::Empty;
        }
        if self.digits == UNLOCK_CODE {
            self.message = Some(MSG_UNLOCKED);
            self.return_timer = Some(UNLOCK_RETURN_TICKS);
            Submission::Accepted
        } else {
            log::debug!("Rejected unlock code ({} digits)", self.digits.len());
            self.digits.clear();
            self.message = Some(MSG_INVALID);
            Submission::Rejected
        }
    }

    /// Advance the return countdown. True on the tick it runs out.
    pub fn tick(&mut self) -> bool {
        match self.return_timer {
            Some(t) if t <= 1 => {
                self.return_timer = None;
                true
            }
            Some(t) => {
                self.return_timer = Some(t - 1);
                false
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
