//! Item spawner
//!
//! Rolls a weighted kind, then jitters size, position, spin and fall speed.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, GameEvent, GameState, ItemKind};
use crate::consts::VIEW_W;

/// Rolls above this become a Bonus (~18%)
pub const BONUS_ROLL: f32 = 0.82;
/// Rolls below this become a Hazard (~22%)
pub const HAZARD_ROLL: f32 = 0.22;

/// Size jitter added to the base size
pub const SIZE_JITTER: f32 = 12.0;
/// Leftmost spawn x
pub const SPAWN_MIN_X: f32 = 24.0;
/// Items never spawn with x at or beyond `VIEW_W - SPAWN_RIGHT_INSET`
pub const SPAWN_RIGHT_INSET: f32 = 48.0;
/// Max spin magnitude (rad/s)
pub const MAX_SPIN: f32 = 0.4;
/// Fall speed multiplier range relative to the current world speed
pub const FALL_FACTOR_MIN: f32 = 0.9;
pub const FALL_FACTOR_MAX: f32 = 1.15;

/// Map a roll in [0, 1) to an item kind
pub fn kind_for_roll(roll: f32) -> ItemKind {
    if roll > BONUS_ROLL {
        ItemKind::Bonus
    } else if roll < HAZARD_ROLL {
        ItemKind::Hazard
    } else {
        ItemKind::Prize
    }
}

/// Build a new item just above the top edge
pub fn make_item<R: Rng + ?Sized>(rng: &mut R, id: u32, world_speed: f32) -> FallingItem {
    let kind = kind_for_roll(rng.random::<f32>());
    let size = kind.base_size() + rng.random_range(0.0..SIZE_JITTER);
    let x = rng.random_range(SPAWN_MIN_X..VIEW_W - SPAWN_RIGHT_INSET);

    FallingItem {
        id,
        kind,
        pos: Vec2::new(x, -size),
        width: size,
        height: size,
        rotation: rng.random_range(-FRAC_PI_2..FRAC_PI_2),
        rotation_speed: rng.random_range(-MAX_SPIN..MAX_SPIN),
        vy: world_speed * rng.random_range(FALL_FACTOR_MIN..FALL_FACTOR_MAX),
    }
}

/// True when enough play time has passed since the last spawn
pub fn spawn_due(state: &GameState) -> bool {
    // Summed f32 frame deltas drift below the interval by ~1e-8 s over a
    // second; one microsecond covers that and is still far below a frame
    const EPSILON: f64 = 1e-6;
    state.time - state.last_spawn_at + EPSILON >= state.spawn_interval_ms as f64 / 1000.0
}

/// Spawn an item if the interval has elapsed. Returns the new item's ID.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    if !spawn_due(state) {
        return None;
    }
    state.last_spawn_at = state.time;

    let id = state.next_entity_id();
    let speed = state.speed;
    let item = make_item(state.rng(), id, speed);
    log::trace!("spawned {} #{} at x={:.1}", item.kind.as_str(), id, item.pos.x);

    state.events.push(GameEvent::Spawned { id, kind: item.kind });
    state.items.push(item);
    Some(id)
}
