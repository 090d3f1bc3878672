//! Game settings and preferences
//!
//! Stored as JSON in the user's config directory. Missing or corrupt
//! settings fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::{DEFAULT_SCALE, MAX_SCALE};
use crate::persistence::{self, StoreError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window scale factor (1..=4)
    pub display_scale: u8,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, exhaust)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_scale: DEFAULT_SCALE,
            quality: QualityPreset::Medium,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    /// Clamp hand-edited values back into range
    pub fn sanitized(mut self) -> Self {
        self.display_scale = self.display_scale.clamp(1, MAX_SCALE);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load from the config directory
    pub fn load() -> Self {
        match persistence::config_file(Self::FILE_NAME) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit file; missing or corrupt files give defaults
    pub fn load_from(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save to the config directory. Interactive front ends call this on
    /// exit so the chosen display scale sticks.
    pub fn save(&self) {
        let result = persistence::config_file(Self::FILE_NAME)
            .and_then(|path| self.save_to(&path));
        if let Err(e) = result {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps() {
        let s = Settings {
            display_scale: 9,
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.display_scale, MAX_SCALE);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);

        let s = Settings {
            display_scale: 0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.display_scale, 1);
    }

    #[test]
    fn test_particle_cap() {
        let mut s = Settings::default();
        assert_eq!(s.max_particles(), 500);
        s.quality = QualityPreset::High;
        assert_eq!(s.max_particles(), 2000);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"display_scale": 3}"#).unwrap();
        assert_eq!(s.display_scale, 3);
        assert_eq!(s.quality, QualityPreset::Medium);
        assert!(s.particles);
    }

    #[test]
    fn test_file_keeps_scale_and_survives_garbage() {
        let dir = std::env::temp_dir()
            .join(format!("asteroids-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let settings = Settings {
            display_scale: 4,
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);

        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(QualityPreset::Low.as_str(), "Low");
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
