//! Demo-mode autopilot
//!
//! Picks a direction from the current state alone, so a session driven by it
//! stays deterministic for a given seed.

use super::state::{FallingItem, GameState, ItemKind};
use super::tick::TickInput;

/// Don't bother moving for offsets smaller than this (px)
const DEADZONE: f32 = 6.0;
/// How far above the cat a hazard is considered a threat (px)
const THREAT_RANGE: f32 = 220.0;
/// Extra horizontal clearance kept around hazards (px)
const HAZARD_CLEARANCE: f32 = 12.0;

/// Seconds until `item` reaches the player's top edge (None if already past it)
fn time_to_reach(state: &GameState, item: &FallingItem) -> Option<f32> {
    let gap = state.player.pos.y - (item.pos.y + item.height);
    if gap < -item.height || item.vy <= 0.0 {
        return None;
    }
    Some(gap.max(0.0) / item.vy)
}

/// Choose the input the bot would press this step
pub fn steer(state: &GameState) -> TickInput {
    if !state.is_playing() {
        return TickInput::default();
    }

    let player = &state.player;
    let center = player.pos.x + player.width / 2.0;

    // Dodge first: any hazard about to land on us
    let threat = state
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Hazard)
        .filter(|i| {
            let above = player.pos.y - (i.pos.y + i.height);
            (-i.height..THREAT_RANGE).contains(&above)
        })
        .find(|i| {
            i.pos.x < player.pos.x + player.width + HAZARD_CLEARANCE
                && i.pos.x + i.width > player.pos.x - HAZARD_CLEARANCE
        });

    if let Some(hazard) = threat {
        let hazard_center = hazard.center().x;
        let go_left = if center < hazard_center {
            // Prefer stepping away, unless the wall is in the way
            player.pos.x > player.min_x() + 1.0
        } else {
            player.pos.x >= player.max_x() - 1.0
        };
        return if go_left {
            TickInput::left()
        } else {
            TickInput::right()
        };
    }

    // Otherwise chase whichever fish lands soonest, preferring gold on ties
    let target = state
        .items
        .iter()
        .filter(|i| i.kind != ItemKind::Hazard)
        .filter_map(|i| time_to_reach(state, i).map(|t| (i, t)))
        .min_by(|(a, ta), (b, tb)| {
            ta.partial_cmp(tb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.kind.points().cmp(&a.kind.points()))
        })
        .map(|(i, _)| i.center().x);

    match target {
        Some(x) if x < center - DEADZONE => TickInput::left(),
        Some(x) if x > center + DEADZONE => TickInput::right(),
        _ => TickInput::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use glam::Vec2;

    fn push(state: &mut GameState, kind: ItemKind, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.items.push(FallingItem {
            id,
            kind,
            pos: Vec2::new(x, y),
            width: 48.0,
            height: 48.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vy: 150.0,
        });
    }

    #[test]
    fn test_idle_when_not_playing() {
        let state = GameState::new(1);
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_chases_fish() {
        let mut state = GameState::new(1);
        state.start();
        push(&mut state, ItemKind::Prize, 100.0, 0.0);
        assert_eq!(steer(&state), TickInput::left());

        state.items.clear();
        push(&mut state, ItemKind::Bonus, 700.0, 0.0);
        assert_eq!(steer(&state), TickInput::right());
    }

    #[test]
    fn test_dodges_hazard_overhead() {
        let mut state = GameState::new(1);
        state.start();
        // Hazard slightly right of the cat's center, 100px above
        let x = state.player.pos.x + 40.0;
        let y = state.player.pos.y - 148.0;
        push(&mut state, ItemKind::Hazard, x, y);
        assert_eq!(steer(&state), TickInput::left());
    }

    #[test]
    fn test_autopilot_scores_points() {
        let mut state = GameState::new(2024);
        state.start();
        for _ in 0..(60 * 30) {
            let input = steer(&state);
            tick(&mut state, &input, 1.0 / 60.0);
            if !state.is_playing() {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
