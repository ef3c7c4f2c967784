//! Held-key input sampling
//!
//! The host forwards raw key-down/key-up identifiers (browser `KeyboardEvent.key`
//! strings); the simulation only ever reads the resulting held flags.

use glam::Vec2;

/// A recognized control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    /// Doubles movement speed while held
    Boost,
}

impl Control {
    /// Map a key identifier to a control (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Control::Up),
            "s" | "arrowdown" => Some(Control::Down),
            "a" | "arrowleft" => Some(Control::Left),
            "d" | "arrowright" => Some(Control::Right),
            "shift" => Some(Control::Boost),
            _ => None,
        }
    }

    /// Canonical key identifier that maps back to this control
    pub fn key(&self) -> &'static str {
        match self {
            Control::Up => "w",
            Control::Down => "s",
            Control::Left => "a",
            Control::Right => "d",
            Control::Boost => "Shift",
        }
    }
}

/// Held state of every control plus the first-press latch
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    /// Set by the first key-down of the session, never cleared
    any_pressed: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true only for the very first key-down of the
    /// session (recognized or not), which is when background music starts.
    pub fn key_down(&mut self, key: &str) -> bool {
        let first = !self.any_pressed;
        self.any_pressed = true;
        if let Some(control) = Control::from_key(key) {
            self.set(control, true);
        }
        first
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = Control::from_key(key) {
            self.set(control, false);
        }
    }

    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Up => self.up = held,
            Control::Down => self.down = held,
            Control::Left => self.left = held,
            Control::Right => self.right = held,
            Control::Boost => self.boost = held,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Up => self.up,
            Control::Down => self.down,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Boost => self.boost,
        }
    }

    pub fn has_started(&self) -> bool {
        self.any_pressed
    }

    /// Raw direction in {-1, 0, 1}², screen axes (y grows downward)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}
