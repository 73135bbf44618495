// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use camloc::constants::{LocationAccuracy, text};

#[test]
fn test_accuracy_levels() {
    assert_eq!(LocationAccuracy::ALL.len(), 6);
    assert_eq!(LocationAccuracy::default(), LocationAccuracy::Balanced);
}

#[test]
fn test_finer_levels_have_smaller_radius() {
    let mut prev_radius = f64::INFINITY;
    for level in LocationAccuracy::ALL {
        let radius = level.simulated_radius_m();
        assert!(
            radius < prev_radius,
            "{:?} should be more precise than the level before it",
            level
        );
        prev_radius = radius;
    }
}

#[test]
fn test_accuracy_display_names() {
    for level in LocationAccuracy::ALL {
        let name = level.display_name();
        assert!(!name.is_empty(), "Level {:?} has empty display name", level);
        assert_eq!(level.to_string(), name);
    }
}

#[test]
fn test_accuracy_serializes_like_cli_values() {
    // The config file and the --accuracy flag accept the same spelling
    for level in LocationAccuracy::ALL {
        let json = serde_json::to_string(&level).unwrap();
        let parsed: LocationAccuracy = json.trim_matches('"').parse().unwrap();
        assert_eq!(parsed, level);
    }
}

#[test]
fn test_screen_texts() {
    assert_eq!(text::HOME_TITLE, "Access your camera and location");
    assert_eq!(text::NO_CAMERA_ACCESS, "No access to camera");
    assert_eq!(text::LOCATION_TITLE, "Location:");
}
