//! Platform input folded into a per-step `TickInput`
//!
//! Keyboard keys and on-screen buttons set the held flags; device orientation
//! feeds the tilt angle. The simulation only ever sees the combined direction.

use crate::sim::TickInput;

/// Degrees of tilt that map to full speed
pub const TILT_FULL_SCALE_DEG: f32 = 30.0;
/// Raw gamma readings are clamped to ±this many degrees
pub const TILT_CLAMP_DEG: f32 = 45.0;

/// Which way a key or button pushes the cat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Map a DOM `KeyboardEvent.key` value to a direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Outcome of asking the platform for orientation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltPermission {
    /// No orientation API at all
    Unsupported,
    /// Events are delivered without asking
    NotRequired,
    Granted,
    Denied,
}

impl TiltPermission {
    /// Map the string a permission prompt resolves to
    pub fn from_response(response: &str) -> Self {
        if response == "granted" {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Whether tilt should be listened to and enabled
    pub fn allows_tilt(self) -> bool {
        matches!(self, Self::NotRequired | Self::Granted)
    }
}

/// Device tilt state
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltState {
    /// Orientation events are being received and tilt is enabled
    pub active: bool,
    /// Left/right tilt in degrees, already clamped
    pub gamma: f32,
}

impl TiltState {
    /// Record a gamma reading; garbage readings are dropped
    pub fn set_gamma(&mut self, gamma: f32) {
        if gamma.is_finite() {
            self.gamma = gamma.clamp(-TILT_CLAMP_DEG, TILT_CLAMP_DEG);
        }
    }

    /// Tilt as an analog value in [-1, 1]
    pub fn analog(&self) -> Option<f32> {
        self.active
            .then(|| (self.gamma / TILT_FULL_SCALE_DEG).clamp(-1.0, 1.0))
    }
}

/// Held inputs, updated from platform callbacks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub tilt: TiltState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release a direction
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// Handle a key event; returns true if the key was a movement key
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match key_direction(key) {
            Some(direction) => {
                self.set(direction, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (window blur, tab hidden)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            analog: self.tilt.analog(),
        }
    }
}
