//! Game settings and preferences
//!
//! Read from a JSON file; every field is optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed (random when unset)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Headless display ===
    /// ASCII frame size in characters
    pub ascii_cols: usize,
    pub ascii_rows: usize,

    /// Where the leaderboard lives (not persisted when unset)
    pub highscores_path: Option<PathBuf>,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            ascii_cols: 80,
            ascii_rows: 30,

            highscores_path: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing settings {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}
