//! Observational feedback for game events (sound, vibration, logs)
//!
//! Sinks never influence the simulation. A sink that fails reports an error,
//! and the session logs and drops it.

use thiserror::Error;

use crate::sim::{GameEvent, ItemKind};

/// Why a sink could not deliver feedback
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("{0} not supported on this platform")]
    Unsupported(&'static str),
    #[error("feedback failed: {0}")]
    Failed(String),
}

/// Receives game events after each step
pub trait FeedbackSink {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), FeedbackError>;
}

/// Sound cues the game can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Fish caught (meow)
    Catch,
    /// Water drop hit the cat
    Splash,
    /// Run ended
    GameOver,
    /// Run beat the best score
    HighScore,
}

/// Sounds to play for an event, in order
pub fn sound_cues(event: &GameEvent) -> &'static [SoundCue] {
    match event {
        GameEvent::Caught { .. } => &[SoundCue::Catch],
        GameEvent::HazardHit { .. } => &[SoundCue::Splash],
        GameEvent::GameOver { new_best: true, .. } => &[SoundCue::GameOver, SoundCue::HighScore],
        GameEvent::GameOver { .. } => &[SoundCue::GameOver],
        GameEvent::Spawned { .. } => &[],
    }
}

/// Vibration pattern (ms on/off/on...) for an event, if any
pub fn haptic_pattern(event: &GameEvent) -> Option<&'static [u32]> {
    match event {
        GameEvent::Caught {
            kind: ItemKind::Prize,
            ..
        } => Some(&[20]),
        GameEvent::Caught {
            kind: ItemKind::Bonus,
            ..
        } => Some(&[10, 60, 10]),
        GameEvent::HazardHit { .. } => Some(&[40, 40, 60]),
        _ => None,
    }
}

/// Writes notable events to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), FeedbackError> {
        match event {
            GameEvent::Spawned { id, kind } => log::trace!("spawn #{} {}", id, kind.as_str()),
            GameEvent::Caught { kind, points, .. } => {
                log::debug!("catch {} +{}", kind.as_str(), points)
            }
            GameEvent::HazardHit { pos } => log::debug!("splash at ({:.0}, {:.0})", pos.x, pos.y),
            GameEvent::GameOver {
                score,
                best,
                new_best,
            } => log::info!("run over: score {} best {} new_best {}", score, best, new_best),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_sound_cues() {
        let caught = GameEvent::Caught {
            kind: ItemKind::Bonus,
            points: 3,
            pos: Vec2::ZERO,
        };
        assert_eq!(sound_cues(&caught), &[SoundCue::Catch]);
        assert_eq!(
            sound_cues(&GameEvent::HazardHit { pos: Vec2::ZERO }),
            &[SoundCue::Splash]
        );
        let best = GameEvent::GameOver {
            score: 9,
            best: 9,
            new_best: true,
        };
        assert_eq!(sound_cues(&best), &[SoundCue::GameOver, SoundCue::HighScore]);
        assert!(sound_cues(&GameEvent::Spawned {
            id: 1,
            kind: ItemKind::Prize
        })
        .is_empty());
    }

    #[test]
    fn test_haptic_patterns() {
        let prize = GameEvent::Caught {
            kind: ItemKind::Prize,
            points: 1,
            pos: Vec2::ZERO,
        };
        assert_eq!(haptic_pattern(&prize), Some(&[20u32][..]));
        assert_eq!(
            haptic_pattern(&GameEvent::HazardHit { pos: Vec2::ZERO }),
            Some(&[40u32, 40, 60][..])
        );
        assert_eq!(
            haptic_pattern(&GameEvent::GameOver {
                score: 0,
                best: 0,
                new_best: false
            }),
            None
        );
    }
}
