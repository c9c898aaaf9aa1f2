//! Game settings and preferences
//!
//! A single persisted flag: whether the expansion pack has been unlocked.
//! Stored as JSON, read once at startup and rewritten on a successful
//! unlock-code entry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_DICE_FACES, EXPANSION_DICE_FACES};
use crate::error::SettingsError;

/// Default settings file name (relative to the working directory)
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Persisted game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Expansion pack unlocked (widens the die to 9 faces)
    pub enable_expansion_pack: bool,
}

impl Settings {
    /// Number of faces the board die samples from
    pub fn dice_faces(&self) -> u8 {
        if self.enable_expansion_pack {
            EXPANSION_DICE_FACES
        } else {
            BASE_DICE_FACES
        }
    }

    /// Load from a store, falling back to defaults (expansion disabled) on any error
    pub fn load_or_default(store: &dyn SettingsStore) -> Self {
        match store.load() {
            Ok(settings) => {
                log::info!(
                    "Loaded settings (expansion pack {})",
                    if settings.enable_expansion_pack { "on" } else { "off" }
                );
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }
}

/// Storage backend for [`Settings`]
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store (tests and headless runs without a settings file)
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    stored: Option<Settings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with(settings: Settings) -> Self {
        Self {
            stored: Some(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.stored.unwrap_or_default())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.stored = Some(*settings);
        Ok(())
    }
}
