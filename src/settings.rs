//! Game settings and preferences
//!
//! Persisted separately from the best score (LocalStorage on the web, a JSON
//! file natively).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highscores::PersistenceError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Mute toggle (speaker button)
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Feedback ===
    /// Vibrate on catches where supported
    pub haptics: bool,
    /// Steer by tilting the device where supported
    pub tilt_controls: bool,

    // === Visual Effects ===
    /// Particle bursts on catches
    pub particles: bool,
    /// Reduced motion (no cat lean, no slow motion)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.7,
            sfx_volume: 1.0,

            haptics: true,
            tilt_controls: true,

            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "hungrycat_settings";

    /// Flip the mute toggle, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON, clamping out-of-range volumes
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = sanitize_volume(settings.master_volume, 0.7);
        settings.sfx_volume = sanitize_volume(settings.sfx_volume, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load_file(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(PersistenceError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save_file(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

fn sanitize_volume(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        assert!(settings.effective_volume() > 0.0);
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_volume(), 0.0);
        assert!(!settings.toggle_mute());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(settings.particles);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let json = r#"{"master_volume": 4.0, "sfx_volume": -1.0}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Settings::from_json("nope"), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let name = format!("hungry-cat-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let mut settings = Settings::default();
        settings.haptics = false;
        settings.save_file(&path).unwrap();
        assert_eq!(Settings::load_file(&path), settings);
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load_file(&path), Settings::default());
    }
}
