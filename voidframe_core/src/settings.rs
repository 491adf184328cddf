//! Engine settings read from the host's settings file.

use std::{fs, path::Path, time::Duration};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Resource)]
#[serde(default)]
/// Tunables for craft detection and movement.
///
/// Fields default individually, so a settings file only needs the values it
/// overrides.
pub struct CraftSettings {
    /// Hard cap on how many blocks one craft may hold. Detection aborts
    /// wholesale when a craft would grow past this.
    pub size_limit: usize,
    /// Wall-clock budget one scheduling slot may spend draining queued
    /// moves, in milliseconds.
    pub move_budget_ms: u64,
}

impl Default for CraftSettings {
    fn default() -> Self {
        Self {
            size_limit: 500_000,
            move_budget_ms: 40,
        }
    }
}

impl CraftSettings {
    /// The per-slot move budget as a [`Duration`].
    pub fn move_budget(&self) -> Duration {
        Duration::from_millis(self.move_budget_ms)
    }

    /// Parses settings from toml text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads settings from a toml file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Ok(Self::from_toml(&fs::read_to_string(path)?)?)
    }
}

#[derive(Debug, Error)]
/// Why a settings file could not be read.
pub enum SettingsError {
    /// The file could not be read at all.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The file was not valid toml for [`CraftSettings`].
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}
