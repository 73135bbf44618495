// SPDX-License-Identifier: GPL-3.0-only

//! Camera capability
//!
//! A [`CameraProvider`] answers the permission request and opens a device.
//! The opened device is wrapped in a [`CameraHandle`], a scoped session that
//! releases the device when the last clone is dropped. The Camera screen owns
//! one handle while it is shown.

pub mod types;
pub mod virtual_camera;

pub use types::*;

use crate::backends::PermissionResponse;
use crate::config::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Camera provider trait
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Ask for camera permission
    ///
    /// Suspends until the user answers.
    async fn request_permission(&self) -> PermissionResponse;

    /// Open the camera device for a preview session
    async fn open(&self) -> CameraResult<Box<dyn CameraDevice>>;

    /// Get the backend type identifier
    fn backend_type(&self) -> CameraBackendType;
}

/// An opened camera device
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Human readable device name
    fn name(&self) -> &str;

    /// Capture a still picture and write it to storage
    async fn take_picture(&self) -> CameraResult<CapturedPicture>;

    /// Give the hardware back; called once when the session ends
    fn release(&self) {}
}

/// Available camera backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraBackendType {
    /// Generated test-pattern stills
    #[default]
    Virtual,
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::Virtual => write!(f, "virtual"),
        }
    }
}

/// Get the provider for the configured backend
pub fn get_provider(
    config: &Config,
    prompter: crate::backends::PermissionPrompter,
) -> Arc<dyn CameraProvider> {
    match config.camera_backend {
        CameraBackendType::Virtual => Arc::new(virtual_camera::VirtualCamera::from_config(
            config, prompter,
        )),
    }
}
