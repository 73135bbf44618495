// SPDX-License-Identifier: GPL-3.0-only

//! Platform capability providers
//!
//! The screen controller never talks to hardware directly. It consumes two
//! trait objects, bundled in [`Backends`]:
//!
//! ```text
//! ┌─────────────────────┐
//! │  AppModel (update)  │
//! └──────────┬──────────┘
//!            │ Task futures
//!     ┌──────┴────────┐
//!     ▼               ▼
//! ┌──────────────┐ ┌────────────────┐
//! │CameraProvider│ │LocationProvider│  ← async traits
//! └──────┬───────┘ └───────┬────────┘
//!        ▼                 ▼
//!     Virtual        Simulated / GeoClue2
//! ```

pub mod camera;
pub mod location;
pub mod permission;

pub use permission::{
    Capability, PermissionPolicy, PermissionPrompt, PermissionPrompter, PermissionResponse,
    PermissionStatus,
};

use crate::config::Config;
use camera::CameraProvider;
use location::LocationProvider;
use std::sync::Arc;
use tracing::info;

/// The providers the controller runs against
#[derive(Clone)]
pub struct Backends {
    pub camera: Arc<dyn CameraProvider>,
    pub location: Arc<dyn LocationProvider>,
}

impl Backends {
    pub fn new(camera: Arc<dyn CameraProvider>, location: Arc<dyn LocationProvider>) -> Self {
        Self { camera, location }
    }

    /// Build the providers selected in `config`
    pub fn from_config(config: &Config, prompter: PermissionPrompter) -> Self {
        let backends = Self {
            camera: camera::get_provider(config, prompter.clone()),
            location: location::get_provider(config, prompter),
        };
        info!(
            camera = %backends.camera.backend_type(),
            location = %backends.location.backend_type(),
            "Capability providers created"
        );
        backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera::CameraBackendType;
    use location::LocationBackendType;

    #[test]
    fn test_providers_follow_config() {
        let config = Config {
            location_backend: LocationBackendType::GeoClue,
            ..Config::default()
        };
        let backends = Backends::from_config(&config, PermissionPrompter::disconnected());

        assert_eq!(backends.camera.backend_type(), CameraBackendType::Virtual);
        assert_eq!(backends.location.backend_type(), LocationBackendType::GeoClue);

        let backends =
            Backends::from_config(&Config::default(), PermissionPrompter::disconnected());
        assert_eq!(backends.location.backend_type(), LocationBackendType::Simulated);
    }
}
