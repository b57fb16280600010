use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use parking_monitor_core::shared::constants::{
    DEFAULT_IMAGE_DIR, DEFAULT_POSITION_CANDIDATES, DEFAULT_VIDEO_DIR,
};

const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;

/// Viewer preferences persisted as JSON in the user config directory.
///
/// Relative paths resolve against the working directory. Threshold slider
/// positions are session-only and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub video_dir: PathBuf,
    pub image_dir: PathBuf,
    /// Position files tried in order; the first non-empty one wins.
    pub position_candidates: Vec<PathBuf>,
    /// Delay between frames when the video doesn't report a frame rate.
    pub frame_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_dir: PathBuf::from(DEFAULT_VIDEO_DIR),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            position_candidates: DEFAULT_POSITION_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .collect(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ParkingMonitor").join("settings.json"))
    }

    /// Loads settings, writing defaults on first run so they can be edited.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(&path);
            return settings;
        }
        Self::load_from(&path)
    }

    /// Missing or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Could not write settings to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }
}
