// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::PermissionPolicy;
use crate::backends::camera::CameraBackendType;
use crate::backends::location::LocationBackendType;
use crate::backends::location::simulated::SimulatedPosition;
use crate::constants::{self, LocationAccuracy};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// User configuration
///
/// Stored as JSON; fields missing from the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera backend to use
    pub camera_backend: CameraBackendType,
    /// Location backend to use (simulated or GeoClue2)
    pub location_backend: LocationBackendType,
    /// How camera permission requests are answered
    pub camera_permission: PermissionPolicy,
    /// How location permission requests are answered
    pub location_permission: PermissionPolicy,
    /// Where captured photos are written (default: ~/Pictures/camloc)
    pub photo_dir: Option<PathBuf>,
    /// Virtual camera capture size
    pub capture_width: u32,
    pub capture_height: u32,
    /// Accuracy requested for position fixes
    pub location_accuracy: LocationAccuracy,
    /// Position reported by the simulated backend
    pub simulated_position: SimulatedPosition,
    /// Time the simulated backend takes to produce a fix
    pub simulated_fix_delay_ms: u64,
    /// Desktop id reported to GeoClue
    pub desktop_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_backend: CameraBackendType::default(),
            location_backend: LocationBackendType::default(),
            camera_permission: PermissionPolicy::default(),
            location_permission: PermissionPolicy::default(),
            photo_dir: None,
            capture_width: constants::DEFAULT_CAPTURE_WIDTH,
            capture_height: constants::DEFAULT_CAPTURE_HEIGHT,
            location_accuracy: LocationAccuracy::default(),
            simulated_position: SimulatedPosition::default(),
            simulated_fix_delay_ms: constants::DEFAULT_SIMULATED_FIX_DELAY.as_millis() as u64,
            desktop_id: constants::DEFAULT_DESKTOP_ID.to_string(),
        }
    }
}

impl Config {
    /// Default config file location (~/.config/camloc/config.json)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_NAME).join("config.json"))
    }

    /// Load the config from the default location
    pub fn load() -> AppResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load the config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Effective photo directory
    pub fn photo_directory(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(crate::storage::default_photo_directory)
    }

    pub fn simulated_fix_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_fix_delay_ms)
    }
}
