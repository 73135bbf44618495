// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application name used for config, cache and picture directories
pub const APP_NAME: &str = "camloc";

/// Identifier handed to desktop location services
pub const DEFAULT_DESKTOP_ID: &str = "camloc";

/// Default virtual camera capture size
pub const DEFAULT_CAPTURE_WIDTH: u32 = 1280;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 720;

/// JPEG quality for captured pictures
pub const PHOTO_JPEG_QUALITY: u8 = 90;

/// Simulated fix latency, roughly what a warm GPS receiver needs
pub const DEFAULT_SIMULATED_FIX_DELAY: Duration = Duration::from_millis(800);

/// Terminal input poll interval (~60 Hz redraw)
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// User-facing strings
pub mod text {
    pub const HOME_TITLE: &str = "Access your camera and location";
    pub const ACCESS_CAMERA: &str = "Access Camera";
    pub const ACCESS_LOCATION: &str = "Access Location";
    pub const TAKE_PHOTO: &str = "Take Photo";
    pub const OPEN_PHOTO: &str = "Open Photo";
    pub const BACK: &str = "Back";
    pub const CAMERA_TITLE: &str = "Camera";
    pub const CAMERA_PERMISSION_NOT_REQUESTED: &str = "Camera permission not requested yet";
    pub const REQUESTING_CAMERA_PERMISSION: &str = "Requesting camera permission...";
    pub const NO_CAMERA_ACCESS: &str = "No access to camera";
    pub const OPENING_CAMERA: &str = "Opening camera...";
    pub const CAPTURING: &str = "Capturing...";
    pub const LOCATION_TITLE: &str = "Location:";
    pub const LOCATION_NOT_AVAILABLE: &str = "Location not available";
    pub const WAITING_FOR_LOCATION_PERMISSION: &str = "Waiting for location permission...";
    pub const ACQUIRING_POSITION: &str = "Acquiring position...";
}

/// Requested location accuracy
///
/// Mirrors the accuracy tiers mobile location APIs expose. Desktop services
/// map these onto their own levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationAccuracy {
    /// Country-level
    Lowest,
    /// City-level
    Low,
    /// Neighborhood-level (default)
    #[default]
    Balanced,
    /// Street-level
    High,
    /// Best the device can do
    Highest,
    /// Best possible, with extra sensor fusion where available
    BestForNavigation,
}

impl LocationAccuracy {
    /// All levels ordered from coarsest to finest
    pub const ALL: [LocationAccuracy; 6] = [
        LocationAccuracy::Lowest,
        LocationAccuracy::Low,
        LocationAccuracy::Balanced,
        LocationAccuracy::High,
        LocationAccuracy::Highest,
        LocationAccuracy::BestForNavigation,
    ];

    /// Get display name for the level
    pub fn display_name(&self) -> &'static str {
        match self {
            LocationAccuracy::Lowest => "Lowest",
            LocationAccuracy::Low => "Low",
            LocationAccuracy::Balanced => "Balanced",
            LocationAccuracy::High => "High",
            LocationAccuracy::Highest => "Highest",
            LocationAccuracy::BestForNavigation => "Best for navigation",
        }
    }

    /// GeoClue2 `GClueAccuracyLevel` value for this level
    ///
    /// Country = 1, City = 4, Neighborhood = 5, Street = 6, Exact = 8
    pub fn geoclue_level(&self) -> u32 {
        match self {
            LocationAccuracy::Lowest => 1,
            LocationAccuracy::Low => 4,
            LocationAccuracy::Balanced => 5,
            LocationAccuracy::High => 6,
            LocationAccuracy::Highest | LocationAccuracy::BestForNavigation => 8,
        }
    }

    /// Expected horizontal error radius in meters for simulated fixes
    pub fn simulated_radius_m(&self) -> f64 {
        match self {
            LocationAccuracy::Lowest => 3000.0,
            LocationAccuracy::Low => 1000.0,
            LocationAccuracy::Balanced => 100.0,
            LocationAccuracy::High => 10.0,
            LocationAccuracy::Highest => 5.0,
            LocationAccuracy::BestForNavigation => 3.0,
        }
    }
}

impl std::fmt::Display for LocationAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for LocationAccuracy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowest" => Ok(LocationAccuracy::Lowest),
            "low" => Ok(LocationAccuracy::Low),
            "balanced" => Ok(LocationAccuracy::Balanced),
            "high" => Ok(LocationAccuracy::High),
            "highest" => Ok(LocationAccuracy::Highest),
            "best-for-navigation" | "navigation" => Ok(LocationAccuracy::BestForNavigation),
            other => Err(format!("unknown accuracy level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geoclue_levels_are_monotonic() {
        let mut prev = 0;
        for level in LocationAccuracy::ALL {
            assert!(level.geoclue_level() >= prev);
            prev = level.geoclue_level();
        }
    }

    #[test]
    fn test_accuracy_parses_kebab_case() {
        assert_eq!(
            "best-for-navigation".parse::<LocationAccuracy>(),
            Ok(LocationAccuracy::BestForNavigation)
        );
        assert!("precise".parse::<LocationAccuracy>().is_err());
    }
}
