//! Logical input surface
//!
//! The host translates raw device events into [`InputEvent`]s (one-shot
//! signals handled by the match) and feeds held state into [`Controls`],
//! which produces a per-tick [`InputSnapshot`] for the active minigame.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::consts::AXIS_DEAD_ZONE;

/// One-shot input signals, delivered in order each tick
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window closed / explicit quit
    Quit,
    /// Escape: cancels the code menu, quits everywhere else
    Back,
    /// Start a match with N players (1-4)
    SelectPlayers(usize),
    /// Primary action: roll, stop, confirm
    Action,
    /// Open the expansion code menu
    OpenMenu,
    /// Raw character typed in the code menu
    Digit(char),
    /// Remove the last entered digit
    Erase,
    /// Clear the code entry
    Clear,
    /// Submit the code entry
    Submit,
    /// Clipboard paste (non-digits are dropped)
    Paste(String),
    /// Pointer click in screen coordinates
    Click(Vec2),
    /// Gamepad hot-plug
    DeviceConnected(u32),
    DeviceDisconnected(u32),
}

/// Held keyboard state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub action: bool,
}

/// Held gamepad state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    /// Left stick, components in [-1, 1]
    pub axis: Vec2,
    /// Primary face button
    pub action: bool,
}

/// Per-tick control state handed to minigames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement vector, components in [-1, 1] (screen space, +y is down)
    pub movement: Vec2,
    /// Action held this tick
    pub action: bool,
    /// Action went from released to held this tick
    pub action_pressed: bool,
}

impl InputSnapshot {
    /// Snapshot with only movement set
    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Default::default()
        }
    }

    /// Snapshot with action held and freshly pressed
    pub fn pressing() -> Self {
        Self {
            movement: Vec2::ZERO,
            action: true,
            action_pressed: true,
        }
    }
}

/// Keyboard plus hot-pluggable gamepads
#[derive(Debug, Clone, Default)]
pub struct Controls {
    keyboard: KeyboardState,
    /// Connected pads by instance id (ordered, so the active pad is stable)
    gamepads: BTreeMap<u32, GamepadState>,
    prev_action: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, id: u32) {
        if self.gamepads.insert(id, GamepadState::default()).is_none() {
            log::info!("Gamepad {} connected", id);
        }
    }

    /// Drop a pad; its held state stops contributing immediately
    pub fn disconnect(&mut self, id: u32) {
        if self.gamepads.remove(&id).is_some() {
            log::info!("Gamepad {} disconnected", id);
        }
    }

    pub fn set_keyboard(&mut self, keyboard: KeyboardState) {
        self.keyboard = keyboard;
    }

    /// Update a pad's held state (ignored for pads that are not connected)
    pub fn set_gamepad(&mut self, id: u32, state: GamepadState) {
        if let Some(pad) = self.gamepads.get_mut(&id) {
            *pad = state;
        }
    }

    pub fn has_gamepad(&self) -> bool {
        !self.gamepads.is_empty()
    }

    /// The pad whose stick drives movement (lowest connected id)
    pub fn active_gamepad(&self) -> Option<u32> {
        self.gamepads.keys().next().copied()
    }

    /// Action held on the keyboard or the active pad
    fn held_action(&self) -> bool {
        self.keyboard.action || self.gamepads.values().next().is_some_and(|pad| pad.action)
    }

    /// Treat a currently held action as already seen, so it only counts as
    /// pressed after being released and pressed again
    pub fn rearm(&mut self) {
        self.prev_action = self.held_action();
    }

    /// Sample the held state, advancing edge detection by one tick
    pub fn sample(&mut self) -> InputSnapshot {
        let kb = &self.keyboard;
        let mut movement = Vec2::ZERO;
        if kb.left {
            movement.x = -1.0;
        }
        if kb.right {
            movement.x = 1.0;
        }
        if kb.up {
            movement.y = -1.0;
        }
        if kb.down {
            movement.y = 1.0;
        }

        let action = self.held_action();
        if let Some(pad) = self.gamepads.values().next() {
            // Analog overrides digital per axis once past the dead zone
            if pad.axis.x.abs() > AXIS_DEAD_ZONE {
                movement.x = pad.axis.x.clamp(-1.0, 1.0);
            }
            if pad.axis.y.abs() > AXIS_DEAD_ZONE {
                movement.y = pad.axis.y.clamp(-1.0, 1.0);
            }
        }

        let action_pressed = action && !self.prev_action;
        self.prev_action = action;

        InputSnapshot {
            movement,
            action,
            action_pressed,
        }
    }
}

/// Keep only ASCII digits from pasted text
pub fn digits_only(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| c.is_ascii_digit())
}
