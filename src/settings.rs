//! Game settings and preferences
//!
//! Persisted as JSON next to the executable. Loading is forgiving: a missing
//! or unreadable file falls back to defaults rather than failing the launch.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === Debug ===
    /// Start with the bounding-radius overlay enabled
    pub debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            debug_overlay: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "salmon_settings.json";

    /// Load settings from the given path, defaults if anything goes wrong
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("could not parse {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to the given path, best-effort
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("could not write {}: {err}", path.display());
                } else {
                    log::info!("settings saved to {}", path.display());
                }
            }
            Err(err) => log::warn!("could not serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load("definitely/not/a/real/path.json");
        assert_eq!(settings.master_volume, 0.8);
        assert!(!settings.muted);
        assert!(!settings.debug_overlay);
    }

    #[test]
    fn test_settings_round_trip_json() {
        let mut settings = Settings::default();
        settings.muted = true;
        settings.sfx_volume = 0.25;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.muted);
        assert_eq!(back.sfx_volume, 0.25);
    }
}
