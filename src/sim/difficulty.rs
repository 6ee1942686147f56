//! Score-driven difficulty curve
//!
//! Fall speed rises and the spawn interval shrinks linearly with score until
//! each hits its cap.

use serde::{Deserialize, Serialize};

/// Difficulty tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Fall speed at score 0 (px/s)
    pub base_speed: f32,
    /// Extra fall speed per point
    pub speed_gain: f32,
    /// Fall speed never exceeds this
    pub speed_cap: f32,
    /// Spawn interval at score 0 (ms)
    pub base_interval_ms: f32,
    /// Interval reduction per point (ms)
    pub interval_decay_ms: f32,
    /// Spawn interval never drops below this (ms)
    pub spawn_floor_ms: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            base_speed: 140.0,
            speed_gain: 8.0,
            speed_cap: 540.0,
            base_interval_ms: 950.0,
            interval_decay_ms: 12.0,
            spawn_floor_ms: 360.0,
        }
    }
}

impl Difficulty {
    /// Fall speed for a given score
    pub fn speed_for(&self, score: u32) -> f32 {
        (self.base_speed + score as f32 * self.speed_gain).min(self.speed_cap)
    }

    /// Spawn interval (ms) for a given score
    pub fn spawn_interval_ms_for(&self, score: u32) -> f32 {
        (self.base_interval_ms - score as f32 * self.interval_decay_ms).max(self.spawn_floor_ms)
    }
}
