//! Whole-game scenarios driven through the public API

use hungry_cat::consts::{BEST_SCORE_KEY, OFFSCREEN_MARGIN, VIEW_H};
use hungry_cat::sim::{GamePhase, GameState, ItemKind, Player, TickInput, autopilot, tick};
use hungry_cat::{FileStore, GameSession, MemoryStore};
use proptest::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

/// Steer underneath the lowest hazard on screen
fn seek_hazard(state: &GameState) -> TickInput {
    let target = state
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Hazard)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    let Some(hazard) = target else {
        return TickInput::default();
    };
    let dx = hazard.center().x - state.player.bounds().center().x;
    if dx < -4.0 {
        TickInput::left()
    } else if dx > 4.0 {
        TickInput::right()
    } else {
        TickInput::default()
    }
}

/// Collect a few fish, then walk into a hazard
fn play_until_game_over(session: &mut GameSession, min_score: u32) {
    session.start();
    for _ in 0..60 * 600 {
        if !session.state().is_playing() {
            return;
        }
        let input = if session.score() < min_score {
            autopilot::steer(session.state())
        } else {
            seek_hazard(session.state())
        };
        session.frame(FRAME, &input);
    }
    panic!("run never ended");
}

#[test]
fn spawned_item_falls_and_is_discarded() {
    let mut state = GameState::new(7);
    state.start();

    // Wait for the first spawn
    while state.items.is_empty() {
        tick(&mut state, &TickInput::default(), FRAME);
    }
    let first = state.items[0].id;
    assert_eq!(state.items[0].pos.y, -state.items[0].height);

    let mut steps = 0;
    while state.items.iter().any(|i| i.id == first) {
        // Keep everything clear of the idle cat
        for item in state.items.iter_mut() {
            item.pos.x = 0.0;
        }
        if let Some(item) = state.items.iter().find(|i| i.id == first) {
            assert!(item.pos.y <= VIEW_H + OFFSCREEN_MARGIN);
        }
        tick(&mut state, &TickInput::default(), FRAME);
        steps += 1;
        assert!(steps < 60 * 30, "item never left the screen");
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
}

#[test]
fn best_score_survives_new_session() {
    let path = std::env::temp_dir().join(format!("hungry-cat-it-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let mut session = GameSession::new(2024, Box::new(FileStore::new(&path)));
    assert_eq!(session.best(), 0);
    play_until_game_over(&mut session, 3);
    assert_eq!(session.phase(), GamePhase::GameOver);
    let score = session.score();
    assert_eq!(session.best(), score);

    let reopened = GameSession::new(1, Box::new(FileStore::new(&path)));
    assert_eq!(reopened.best(), score);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn restart_gives_a_fresh_run() {
    let store = MemoryStore::with_value(BEST_SCORE_KEY, 500);
    let mut session = GameSession::new(2024, Box::new(store));
    play_until_game_over(&mut session, 2);

    session.restart();
    let state = session.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert!(state.items.is_empty());
    assert!(state.particles.is_empty());
    assert_eq!(state.time, 0.0);
    assert_eq!(state.player.pos, Player::start_pos());
    assert_eq!(session.best(), 500);
    assert_eq!(state.best, 500);
}

#[test]
fn game_over_stops_the_world() {
    let mut session = GameSession::new(31, Box::new(MemoryStore::new()));
    play_until_game_over(&mut session, 0);

    let score = session.score();
    let positions: Vec<_> = session.state().items.iter().map(|i| i.pos).collect();
    for _ in 0..120 {
        session.frame(FRAME, &TickInput::right());
    }
    let after: Vec<_> = session.state().items.iter().map(|i| i.pos).collect();
    assert_eq!(positions, after);
    assert_eq!(session.score(), score);
}

proptest! {
    #[test]
    fn player_stays_in_bounds(
        moves in prop::collection::vec((-3.0f32..3.0, 0.0f32..0.05), 1..300)
    ) {
        let mut player = Player::default();
        for (direction, dt) in moves {
            player.steer(direction, dt);
            prop_assert!(player.pos.x >= player.min_x());
            prop_assert!(player.pos.x <= player.max_x());
            prop_assert!(player.vel_x.abs() <= player.max_speed + 1e-3);
        }
    }
}
