//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Rect, rect_collision};
pub use difficulty::Difficulty;
pub use state::{
    FallingItem, GameEvent, GamePhase, GameState, ItemKind, MAX_PARTICLES, Particle,
    ParticleShape, Player,
};
pub use tick::{DirectionalIntent, TickInput, tick};
