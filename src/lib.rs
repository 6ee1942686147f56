//! Hungry Cat - a single-screen catch-the-fish arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, difficulty)
//! - `input`: Keyboard/touch/tilt state folded into a directional intent
//! - `session`: Owns a run, the best score, and feedback sinks
//! - `feedback`: Sound/vibration cues derived from game events
//! - `highscores`: Best-score persistence (LocalStorage / JSON file)
//! - `settings`: Player preferences
//! - `platform`: Browser/native differences (seeding, vibration, clipboard)
//! - `renderer`: Canvas 2D drawing and viewport layout

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use feedback::{FeedbackError, FeedbackSink, SoundCue};
pub use highscores::{BestScore, FileStore, MemoryStore, PersistenceError, ScoreStore};
pub use input::InputState;
pub use session::GameSession;
pub use settings::Settings;
pub use sim::DirectionalIntent;

/// Game configuration constants
pub mod consts {
    /// Logical view size (all simulation coordinates live in this space)
    pub const VIEW_W: f32 = 800.0;
    pub const VIEW_H: f32 = 450.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Player (cat) geometry
    pub const PLAYER_WIDTH: f32 = 96.0;
    pub const PLAYER_HEIGHT: f32 = 72.0;
    /// Distance from the bottom of the view to the player's top edge
    pub const PLAYER_BASELINE: f32 = 96.0;
    /// Horizontal gap the player keeps from both view edges
    pub const PLAYER_MARGIN: f32 = 16.0;
    /// Top horizontal speed (px/s)
    pub const PLAYER_MAX_SPEED: f32 = 380.0;
    /// Horizontal acceleration toward the desired velocity (px/s²)
    pub const PLAYER_ACCEL: f32 = 1800.0;

    /// Drops below this line are discarded
    pub const OFFSCREEN_MARGIN: f32 = 80.0;

    /// Slow motion after a hazard catch
    pub const SLOWMO_DURATION: f32 = 0.45;
    pub const SLOWMO_FACTOR: f32 = 0.25;

    /// LocalStorage / file key for the best score
    pub const BEST_SCORE_KEY: &str = "hungrycat_highscore";
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`.
///
/// Non-finite deltas (clock hiccups) are treated as zero.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}

/// Message copied/shared from the game-over screen
pub fn share_message(score: u32) -> String {
    format!("I scored {score} in Hungry Cat! 🐱🎣")
}
