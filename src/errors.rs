// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera and location application

use crate::backends::Capability;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The user (or the configured policy) refused a capability
    PermissionDenied(Capability),
    /// Camera-related errors
    Camera(CameraError),
    /// Location-related errors
    Location(LocationError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Capture requested before a camera handle was bound
    NoCameraHandle,
    /// Opening the camera device failed
    InitializationFailed(String),
    /// The device did not produce a picture
    CaptureFailed(String),
    /// The picture could not be written to disk
    SaveFailed(String),
}

/// Location-specific errors
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// Foreground location permission was not granted
    PermissionDenied,
    /// No position fix could be obtained
    Unavailable(String),
    /// The location service itself failed (e.g. D-Bus)
    Backend(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::PermissionDenied(capability) => {
                write!(f, "Permission denied: {}", capability)
            }
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Location(e) => write!(f, "Location error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraHandle => write!(f, "No camera handle bound"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            CameraError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location permission denied"),
            LocationError::Unavailable(msg) => write!(f, "Location unavailable: {}", msg),
            LocationError::Backend(msg) => write!(f, "Location service error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for LocationError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => AppError::PermissionDenied(Capability::Location),
            other => AppError::Location(other),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::SaveFailed(err.to_string())
    }
}

impl From<zbus::Error> for LocationError {
    fn from(err: zbus::Error) -> Self {
        LocationError::Backend(err.to_string())
    }
}

impl From<zbus::fdo::Error> for LocationError {
    fn from(err: zbus::fdo::Error) -> Self {
        LocationError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_denial_maps_to_permission_denied() {
        let err: AppError = LocationError::PermissionDenied.into();
        assert_eq!(err, AppError::PermissionDenied(Capability::Location));
    }

    #[test]
    fn camera_errors_keep_their_message() {
        let err: AppError = CameraError::SaveFailed("disk full".into()).into();
        assert_eq!(err.to_string(), "Camera error: Save failed: disk full");
    }
}
