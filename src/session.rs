//! A play session: game state, best score, and feedback wiring
//!
//! The platform calls [`GameSession::frame`] once per display refresh with the
//! raw elapsed time, and reads [`GameSession::state`] afterwards to draw.

use crate::consts::SLOWMO_FACTOR;
use crate::feedback::FeedbackSink;
use crate::highscores::{BestScore, ScoreStore};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::{clamp_frame_dt, share_message};

/// Owns everything one player's game needs between frames
pub struct GameSession {
    state: GameState,
    best: BestScore,
    sinks: Vec<Box<dyn FeedbackSink>>,
    /// Scale time down briefly after a hazard catch
    pub slow_motion: bool,
}

impl GameSession {
    /// New idle session; the best score is read from `store` once here
    pub fn new(seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let best = BestScore::load(store);
        let mut state = GameState::new(seed);
        state.best = best.get();
        Self {
            state,
            best,
            sinks: Vec::new(),
            slow_motion: true,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn FeedbackSink>) {
        self.sinks.push(sink);
    }

    /// Start a run from Idle or GameOver (restarting a live run also resets it)
    pub fn start(&mut self) {
        let from = self.state.phase;
        self.state.best = self.best.get();
        self.state.start();
        log::info!("Run started (from {:?})", from);
    }

    /// Alias for [`GameSession::start`], used by the game-over screen
    pub fn restart(&mut self) {
        self.start();
    }

    /// Advance one display frame. Returns the dt actually simulated.
    pub fn frame(&mut self, raw_dt: f32, input: &TickInput) -> f32 {
        let mut dt = clamp_frame_dt(raw_dt);
        if self.slow_motion && self.state.slowmo > 0.0 {
            dt *= SLOWMO_FACTOR;
        }

        tick(&mut self.state, input, dt);
        self.dispatch_events();
        dt
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score, .. } = event {
                self.best.submit(score);
                self.state.best = self.best.get();
            }
            for sink in self.sinks.iter_mut() {
                if let Err(e) = sink.on_event(&event) {
                    log::warn!("Feedback sink error: {}", e);
                }
            }
        }
    }

    /// Read-only snapshot for rendering and HUD
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }

    /// Text for the share/copy button
    pub fn share_text(&self) -> String {
        share_message(self.state.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::feedback::FeedbackError;
    use crate::highscores::MemoryStore;
    use crate::sim::{FallingItem, ItemKind, Player};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> GameSession {
        GameSession::new(42, Box::new(MemoryStore::new()))
    }

    fn drop_hazard_on_player(s: &mut GameSession) {
        let pos = s.state.player.pos + Vec2::new(10.0, 10.0);
        let id = s.state.next_entity_id();
        s.state.items.push(FallingItem {
            id,
            kind: ItemKind::Hazard,
            pos,
            width: 48.0,
            height: 48.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vy: 0.0,
        });
    }

    struct Failing;

    impl FeedbackSink for Failing {
        fn on_event(&mut self, _event: &GameEvent) -> Result<(), FeedbackError> {
            Err(FeedbackError::Unsupported("vibration"))
        }
    }

    struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

    impl FeedbackSink for Recorder {
        fn on_event(&mut self, event: &GameEvent) -> Result<(), FeedbackError> {
            self.0.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_frame_clamps_dt() {
        let mut s = session();
        s.start();
        let dt = s.frame(5.0, &TickInput::default());
        assert_eq!(dt, MAX_FRAME_DT);
        assert!((s.state().time - MAX_FRAME_DT as f64).abs() < 1e-9);
    }

    #[test]
    fn test_slow_motion_after_game_over() {
        let mut s = session();
        s.start();
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());
        assert_eq!(s.phase(), GamePhase::GameOver);

        let dt = s.frame(0.02, &TickInput::default());
        assert!((dt - 0.02 * SLOWMO_FACTOR).abs() < 1e-7);

        s.slow_motion = false;
        assert_eq!(s.frame(0.02, &TickInput::default()), 0.02);
    }

    #[test]
    fn test_failing_sink_does_not_break_step() {
        let mut s = session();
        s.add_sink(Box::new(Failing));
        s.start();
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());
        assert_eq!(s.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_sinks_receive_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut s = session();
        s.add_sink(Box::new(Recorder(events.clone())));
        s.start();
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());

        let events = events.borrow();
        assert!(matches!(events[0], GameEvent::HazardHit { .. }));
        assert!(matches!(events[1], GameEvent::GameOver { score: 0, .. }));
    }

    #[test]
    fn test_best_persists_across_runs() {
        let mut s = session();
        s.start();
        s.state.add_score(10);
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());
        assert_eq!(s.best(), 10);

        s.restart();
        s.state.add_score(4);
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());
        assert_eq!(s.score(), 4);
        assert_eq!(s.best(), 10);
        assert_eq!(s.state().best, 10);
    }

    #[test]
    fn test_restart_is_fresh() {
        let mut s = session();
        s.start();
        for _ in 0..100 {
            s.frame(0.033, &TickInput::left());
        }
        s.state.add_score(7);
        drop_hazard_on_player(&mut s);
        s.frame(0.016, &TickInput::default());
        assert_eq!(s.phase(), GamePhase::GameOver);

        for _ in 0..2 {
            s.restart();
            assert_eq!(s.phase(), GamePhase::Playing);
            assert_eq!(s.score(), 0);
            assert!(s.state().items.is_empty());
            assert_eq!(s.state().player.pos, Player::start_pos());
            assert_eq!(s.state().speed, 140.0);
        }
    }

    #[test]
    fn test_share_text() {
        let mut s = session();
        s.start();
        s.state.add_score(3);
        assert_eq!(s.share_text(), crate::share_message(3));
    }
}
