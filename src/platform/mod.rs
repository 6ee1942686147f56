//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seeding from wall-clock time
//! - Vibration feedback
//! - Sharing (native share sheet, clipboard fallback)
//! - Orientation permission

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{HapticSink, request_tilt_permission, reset_label_after, share};

/// Share button label at rest
pub const SHARE_LABEL: &str = "Share";
/// How long a confirmation label stays up before reverting (ms)
pub const SHARE_LABEL_RESET_MS: i32 = 1200;

/// What happened when the player pressed Share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the system share sheet
    Shared,
    /// Written to the clipboard
    Copied,
    /// Dismissed, refused, or nothing available
    Failed,
}

impl ShareOutcome {
    /// Temporary button label confirming the share, if any
    pub fn confirmation(self) -> Option<&'static str> {
        match self {
            Self::Copied => Some("Copied!"),
            Self::Shared | Self::Failed => None,
        }
    }
}

/// Seed for a new session, taken from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new session, taken from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_seed_is_nonzero() {
        assert!(time_seed() > 0);
    }

    #[test]
    fn test_only_clipboard_shows_confirmation() {
        assert_eq!(ShareOutcome::Copied.confirmation(), Some("Copied!"));
        assert_eq!(ShareOutcome::Shared.confirmation(), None);
        assert_eq!(ShareOutcome::Failed.confirmation(), None);
    }
}
