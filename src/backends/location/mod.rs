// SPDX-License-Identifier: GPL-3.0-only

//! Location capability
//!
//! A [`LocationProvider`] answers the foreground permission request and
//! produces one-shot position fixes. Readings are passed through to the UI
//! untouched.

pub mod geoclue;
pub mod simulated;
pub mod types;

pub use types::*;

use crate::backends::{PermissionPrompter, PermissionResponse};
use crate::config::Config;
use crate::constants::LocationAccuracy;
use crate::errors::LocationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type LocationResult<T> = Result<T, LocationError>;

/// Options for a one-shot position request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionOptions {
    pub accuracy: LocationAccuracy,
}

/// Location provider trait
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for foreground location permission
    ///
    /// Suspends until the user answers. Providers ask on every call.
    async fn request_foreground_permission(&self) -> PermissionResponse;

    /// Fetch the current position
    ///
    /// No timeout is applied; the caller cancels by dropping the future.
    async fn current_position(&self, options: &PositionOptions) -> LocationResult<LocationReading>;

    /// Get the backend type identifier
    fn backend_type(&self) -> LocationBackendType;
}

/// Available location backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationBackendType {
    /// Fixed, configurable position
    #[default]
    Simulated,
    /// GeoClue2 over the system D-Bus
    GeoClue,
}

impl std::fmt::Display for LocationBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationBackendType::Simulated => write!(f, "simulated"),
            LocationBackendType::GeoClue => write!(f, "geoclue"),
        }
    }
}

/// Get the provider for the configured backend
pub fn get_provider(config: &Config, prompter: PermissionPrompter) -> Arc<dyn LocationProvider> {
    match config.location_backend {
        LocationBackendType::Simulated => Arc::new(simulated::SimulatedLocation::new(
            config.location_permission,
            prompter,
            config.simulated_position,
            config.simulated_fix_delay(),
        )),
        LocationBackendType::GeoClue => Arc::new(geoclue::GeoClueLocation::new(
            config.location_permission,
            prompter,
            config.desktop_id.clone(),
        )),
    }
}
