// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use camloc::Config;
use camloc::backends::PermissionPolicy;
use camloc::backends::location::LocationBackendType;
use camloc::constants::LocationAccuracy;
use std::path::PathBuf;

fn temp_config_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("camloc-config-{}", uuid::Uuid::new_v4()))
        .join("config.json")
}

#[test]
fn test_config_default() {
    let config = Config::default();

    // Permissions are asked interactively unless overridden
    assert_eq!(config.camera_permission, PermissionPolicy::Prompt);
    assert_eq!(config.location_permission, PermissionPolicy::Prompt);
    assert_eq!(config.location_backend, LocationBackendType::Simulated);
    assert_eq!(config.location_accuracy, LocationAccuracy::Balanced);
    assert!(config.photo_dir.is_none());
    assert!(config.capture_width > 0 && config.capture_height > 0);
}

#[test]
fn test_missing_file_yields_defaults() {
    let path = temp_config_path();
    assert!(!path.exists());

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load() {
    let path = temp_config_path();
    let config = Config {
        location_permission: PermissionPolicy::Deny,
        location_backend: LocationBackendType::GeoClue,
        location_accuracy: LocationAccuracy::Highest,
        photo_dir: Some(PathBuf::from("/tmp/camloc-photos")),
        simulated_fix_delay_ms: 5,
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{ "camera_permission": "grant", "location_accuracy": "best-for-navigation" }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.camera_permission, PermissionPolicy::Grant);
    assert_eq!(config.location_accuracy, LocationAccuracy::BestForNavigation);
    assert_eq!(config.location_permission, PermissionPolicy::Prompt);
    assert_eq!(config.desktop_id, Config::default().desktop_id);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_malformed_file_is_an_error() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
