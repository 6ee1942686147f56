//! Game state and core simulation types
//!
//! Everything a frame needs to draw lives here; the platform layer only reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::Difficulty;
use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing has been started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// A hazard was caught; waiting for restart
    GameOver,
}

/// What kind of thing is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Regular fish, +1
    Prize,
    /// Golden fish, +3
    Bonus,
    /// Water drop, ends the run
    Hazard,
}

impl ItemKind {
    /// Points awarded on catch (hazards award nothing)
    pub fn points(self) -> u32 {
        match self {
            ItemKind::Prize => 1,
            ItemKind::Bonus => 3,
            ItemKind::Hazard => 0,
        }
    }

    /// Base edge length before size jitter
    pub fn base_size(self) -> f32 {
        match self {
            ItemKind::Hazard => 44.0,
            ItemKind::Prize | ItemKind::Bonus => 48.0,
        }
    }

    /// Fallback fill color (CSS hex) when sprites are unavailable
    pub fn color(self) -> &'static str {
        match self {
            ItemKind::Prize => "#a8dadc",
            ItemKind::Bonus => "#ffd166",
            ItemKind::Hazard => "#66ccff",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Prize => "prize",
            ItemKind::Bonus => "bonus",
            ItemKind::Hazard => "hazard",
        }
    }
}

/// The player-controlled cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (px/s)
    pub vel_x: f32,
    pub max_speed: f32,
    pub accel: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::start_pos(),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vel_x: 0.0,
            max_speed: PLAYER_MAX_SPEED,
            accel: PLAYER_ACCEL,
        }
    }
}

impl Player {
    /// Fixed spawn point for every run
    pub fn start_pos() -> Vec2 {
        Vec2::new(VIEW_W / 2.0, VIEW_H - PLAYER_BASELINE)
    }

    /// Smallest allowed x
    pub fn min_x(&self) -> f32 {
        PLAYER_MARGIN
    }

    /// Largest allowed x
    pub fn max_x(&self) -> f32 {
        VIEW_W - self.width - PLAYER_MARGIN
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Accelerate toward `direction * max_speed`, integrate, and clamp to the view.
    ///
    /// `direction` is expected in [-1, 1]; values outside are clamped.
    pub fn steer(&mut self, direction: f32, dt: f32) {
        let direction = if direction.is_finite() {
            direction.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        let desired_vx = direction * self.max_speed;
        let max_delta = self.accel * dt;
        self.vel_x += (desired_vx - self.vel_x).clamp(-max_delta, max_delta);

        // Ease out when the stick is released
        if direction.abs() < 0.05 && self.vel_x.abs() > 2.0 {
            self.vel_x *= 0.0001_f32.powf(dt);
        }

        self.pos.x += self.vel_x * dt;
        self.clamp_to_view();
    }

    /// Keep the player inside `[margin, VIEW_W - width - margin]`
    pub fn clamp_to_view(&mut self) {
        self.pos.x = self.pos.x.clamp(self.min_x(), self.max_x());
    }
}

/// A falling entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Sprite rotation (radians), purely visual
    pub rotation: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Fall speed (px/s)
    pub vy: f32,
}

impl FallingItem {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Advance fall and spin
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
        self.rotation += self.rotation_speed * dt;
    }

    /// Past the bottom of the view by more than the discard margin
    pub fn is_offscreen(&self) -> bool {
        self.pos.y > VIEW_H + OFFSCREEN_MARGIN
    }
}

/// Particle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    /// Thin rectangle, used for catch bursts
    Spark,
    /// Filled circle, used for the hazard splash
    Circle,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub gravity: f32,
    pub shape: ParticleShape,
    /// Item kind for color lookup
    pub kind: ItemKind,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new item entered the top of the view
    Spawned { id: u32, kind: ItemKind },
    /// A prize or bonus was caught
    Caught { kind: ItemKind, points: u32, pos: Vec2 },
    /// A hazard touched the player
    HazardHit { pos: Vec2 },
    /// The run ended
    GameOver { score: u32, best: u32, new_best: bool },
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score for the current run
    pub score: u32,
    /// Best score seen (loaded from and written to the score store)
    pub best: u32,
    /// Current base fall speed (px/s)
    pub speed: f32,
    /// Current spawn interval (ms)
    pub spawn_interval_ms: f32,
    /// Seconds of play elapsed in this run
    pub time: f64,
    /// Value of `time` when the last item spawned
    pub last_spawn_at: f64,
    /// Remaining slow motion (seconds), set on game over
    pub slowmo: f32,
    /// Difficulty curve tuning
    pub difficulty: Difficulty,
    /// Player cat
    pub player: Player,
    /// Falling entities, in spawn order
    pub items: Vec<FallingItem>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh idle state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_difficulty(seed, Difficulty::default())
    }

    pub fn with_difficulty(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            best: 0,
            speed: difficulty.speed_for(0),
            spawn_interval_ms: difficulty.spawn_interval_ms_for(0),
            time: 0.0,
            last_spawn_at: 0.0,
            slowmo: 0.0,
            difficulty,
            player: Player::default(),
            items: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Start (or restart) a run: everything but `best`, the RNG stream and tuning is reset.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.speed = self.difficulty.speed_for(0);
        self.spawn_interval_ms = self.difficulty.spawn_interval_ms_for(0);
        self.time = 0.0;
        self.last_spawn_at = 0.0;
        self.slowmo = 0.0;
        self.player = Player::default();
        self.items.clear();
        self.particles.clear();
        self.events.clear();
        self.next_id = 1;
    }

    /// Add points and rescale difficulty
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.speed = self.difficulty.speed_for(self.score);
        self.spawn_interval_ms = self.difficulty.spawn_interval_ms_for(self.score);
    }

    /// Enter game over. Returns true if the run set a new best.
    pub fn end_game(&mut self) -> bool {
        self.phase = GamePhase::GameOver;
        self.slowmo = SLOWMO_DURATION;
        let new_best = self.score > self.best;
        if new_best {
            self.best = self.score;
        }
        self.events.push(GameEvent::GameOver {
            score: self.score,
            best: self.best,
            new_best,
        });
        new_best
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());
        assert_eq!(state.speed, 140.0);
        assert_eq!(state.spawn_interval_ms, 950.0);
    }

    #[test]
    fn test_start_resets_run_but_keeps_best() {
        let mut state = GameState::new(7);
        state.start();
        state.add_score(12);
        state.end_game();
        assert_eq!(state.best, 12);

        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 12);
        assert_eq!(state.slowmo, 0.0);
        assert_eq!(state.player.pos, Player::start_pos());
    }

    #[test]
    fn test_end_game_only_raises_best() {
        let mut state = GameState::new(1);
        state.best = 10;
        state.start();
        state.add_score(4);
        assert!(!state.end_game());
        assert_eq!(state.best, 10);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                score: 4,
                best: 10,
                new_best: false
            }]
        );
    }

    #[test]
    fn test_player_clamps_to_view() {
        let mut player = Player::default();
        for _ in 0..200 {
            player.steer(-1.0, 0.033);
        }
        assert_eq!(player.pos.x, PLAYER_MARGIN);

        for _ in 0..200 {
            player.steer(1.0, 0.033);
        }
        assert_eq!(player.pos.x, VIEW_W - PLAYER_WIDTH - PLAYER_MARGIN);
    }

    #[test]
    fn test_player_acceleration_is_bounded() {
        let mut player = Player::default();
        player.steer(1.0, 0.01);
        // 1800 px/s² * 0.01s
        assert!((player.vel_x - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_player_ignores_nan_direction() {
        let mut player = Player::default();
        let start = player.pos;
        player.steer(f32::NAN, 0.016);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_item_offscreen() {
        let mut item = FallingItem {
            id: 1,
            kind: ItemKind::Prize,
            pos: Vec2::new(100.0, VIEW_H + OFFSCREEN_MARGIN),
            width: 50.0,
            height: 50.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vy: 100.0,
        };
        assert!(!item.is_offscreen());
        item.advance(0.01);
        assert!(item.is_offscreen());
    }
}
