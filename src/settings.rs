//! Game settings and preferences
//!
//! Persisted as one JSON blob next to the high score, through the same
//! [`Storage`] the rest of the game uses.

use serde::{Deserialize, Serialize};

use crate::consts::{EFFECT_VOLUME, MUSIC_VOLUME};
use crate::persistence::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Pickup and home-run volume (0.0 - 1.0)
    pub effect_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Draw sprite outlines
    pub outlines: bool,

    // === HUD ===
    /// Show remaining power-up time
    pub show_power_up_timer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: MUSIC_VOLUME,
            effect_volume: EFFECT_VOLUME,
            muted: false,
            outlines: true,
            show_power_up_timer: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "homerun_dodge_settings";

    /// Load settings, falling back to defaults on absent or invalid data
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring invalid settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }

    /// Clamp volumes into range
    fn sanitized(mut self) -> Self {
        self.music_volume = clamp_volume(self.music_volume, MUSIC_VOLUME);
        self.effect_volume = clamp_volume(self.effect_volume, EFFECT_VOLUME);
        self
    }
}

fn clamp_volume(vol: f32, fallback: f32) -> f32 {
    if vol.is_finite() {
        vol.clamp(0.0, 1.0)
    } else {
        fallback
    }
}
