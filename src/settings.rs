//! Game settings and preferences
//!
//! Persisted in LocalStorage under their own key, separate from the best
//! score.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};
use crate::sim::SpawnParams;

/// Slider range shared by speed and size
pub const SETTING_MIN: u32 = 1;
pub const SETTING_MAX: u32 = 5;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rise speed and spawn rate (1-5)
    pub speed: u32,
    /// Bubble size (1-5)
    pub size: u32,
    /// Sound effects on/off
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 2,
            size: 3,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bubblePopSettings";

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(SETTING_MIN, SETTING_MAX);
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(SETTING_MIN, SETTING_MAX);
    }

    /// Force values back into range (hand-edited storage)
    fn sanitized(mut self) -> Self {
        self.set_speed(self.speed);
        self.set_size(self.size);
        self
    }

    /// Spawn parameters for the simulation
    pub fn spawn_params(&self) -> SpawnParams {
        SpawnParams {
            speed: self.speed as f32,
            size: self.size as f32,
        }
    }

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        store.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
