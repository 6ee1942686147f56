//! Per-frame simulation step
//!
//! Order within a step: clock, player, items (move, collide, cull), particles,
//! spawner. A freshly spawned item therefore sits at `y = -height` until the
//! following step moves it.

use super::collision::rect_collision;
use super::particles::{spawn_catch_effect, update_particles};
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState, ItemKind};

/// Normalized movement signal in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct DirectionalIntent(f32);

impl DirectionalIntent {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(-1.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Directional input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Move-left held (keyboard / touch button)
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Optional analog steering in [-1, 1] (device tilt)
    pub analog: Option<f32>,
}

impl TickInput {
    pub fn left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Default::default()
        }
    }

    /// Combined direction: buttons summed with the analog value.
    ///
    /// Out-of-range or non-finite analog values are clamped/ignored.
    pub fn intent(&self) -> DirectionalIntent {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        if let Some(analog) = self.analog.filter(|a| a.is_finite()) {
            dir += analog.clamp(-1.0, 1.0);
        }
        DirectionalIntent::new(dir)
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        // Slow motion decays while the game-over screen is up
        if state.slowmo > 0.0 {
            state.slowmo -= dt.min(state.slowmo);
        }
        update_particles(&mut state.particles, dt);
        return;
    }

    state.time += dt as f64;

    state.player.steer(input.intent().value(), dt);

    resolve_items(state, dt);

    update_particles(&mut state.particles, dt);

    if state.phase == GamePhase::Playing {
        maybe_spawn(state);
    }
}

/// Move every item, resolve catches, and cull items that fell past the view
fn resolve_items(state: &mut GameState, dt: f32) {
    let player_box = state.player.bounds();

    let mut i = 0;
    while i < state.items.len() {
        state.items[i].advance(dt);

        let hit = rect_collision(&player_box, &state.items[i].bounds());
        if hit.hit {
            let kind = state.items[i].kind;
            let center = state.items[i].center();
            match kind {
                ItemKind::Hazard => {
                    spawn_catch_effect(state, center, kind);
                    state.events.push(GameEvent::HazardHit { pos: center });
                    let new_best = state.end_game();
                    log::info!(
                        "Game over: score {} (best {}{})",
                        state.score,
                        state.best,
                        if new_best { ", new best" } else { "" }
                    );
                    return;
                }
                ItemKind::Prize | ItemKind::Bonus => {
                    state.items.remove(i);
                    let points = kind.points();
                    state.add_score(points);
                    spawn_catch_effect(state, center, kind);
                    state.events.push(GameEvent::Caught {
                        kind,
                        points,
                        pos: center,
                    });
                    log::debug!("caught {} (+{}), score {}", kind.as_str(), points, state.score);
                    continue;
                }
            }
        }

        if state.items[i].is_offscreen() {
            state.items.remove(i);
            continue;
        }
        i += 1;
    }
}
