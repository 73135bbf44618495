// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::{CameraHandle, CapturedPhoto, CapturedPicture};
use crate::backends::location::{LocationReading, PositionOptions};
use crate::backends::{Backends, PermissionPrompter, PermissionResponse, PermissionStatus};
use crate::config::Config;
use crate::errors::{CameraError, LocationError};
use tokio_util::sync::CancellationToken;

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Camera,
    Location,
}

/// Capture gating state machine
///
/// ```text
/// Unrequested --request--> Pending --granted--> Ready --capture--> Ready
///                                  \--denied--> Blocked
/// ```
///
/// `Ready` and `Blocked` are terminal for the session. A superseded
/// `Pending` request falls back to `Unrequested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraGate {
    #[default]
    Unrequested,
    Pending,
    Ready,
    Blocked,
}

impl CameraGate {
    /// Permission status as seen by the UI
    pub fn permission_status(&self) -> PermissionStatus {
        match self {
            CameraGate::Unrequested | CameraGate::Pending => PermissionStatus::Unknown,
            CameraGate::Ready => PermissionStatus::Granted,
            CameraGate::Blocked => PermissionStatus::Denied,
        }
    }

    /// Whether the permission request has completed
    pub fn is_resolved(&self) -> bool {
        matches!(self, CameraGate::Ready | CameraGate::Blocked)
    }
}

/// Progress of the location gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationRequest {
    #[default]
    Idle,
    AwaitingPermission,
    Fetching,
}

/// Problems reported for diagnostics only; none of them change the screen
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    LocationPermissionDenied,
    LocationUnavailable(String),
    CameraUnavailable(String),
    CaptureFailed(String),
}

/// Generation counter plus cancellation token for in-flight gated work
///
/// Results are tagged with the generation that started them. Invalidation
/// bumps the generation and cancels the token, so in-flight provider calls
/// are dropped and any result that still arrives is recognised as stale.
#[derive(Debug)]
pub struct FlowGuard {
    generation: u64,
    token: CancellationToken,
}

impl Default for FlowGuard {
    fn default() -> Self {
        Self {
            generation: 0,
            token: CancellationToken::new(),
        }
    }
}

impl FlowGuard {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Cancel everything in flight and start a new generation
    pub fn invalidate(&mut self) -> u64 {
        self.token.cancel();
        self.token = CancellationToken::new();
        self.generation += 1;
        self.generation
    }
}

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Navigation =====
    Navigate(Screen),

    // ===== Camera =====
    AccessCamera,
    CameraPermissionResolved {
        generation: u64,
        response: PermissionResponse,
    },
    CameraSessionOpened {
        generation: u64,
        result: Result<CameraHandle, CameraError>,
    },
    TakePhoto,
    PhotoCaptured {
        generation: u64,
        result: Result<CapturedPicture, CameraError>,
    },
    OpenPhoto,
    PhotoOpened(Result<(), String>),

    // ===== Location =====
    AccessLocation,
    LocationPermissionResolved {
        generation: u64,
        response: PermissionResponse,
    },
    LocationFetched {
        generation: u64,
        result: Result<LocationReading, LocationError>,
    },

    Noop,
}

/// The screen controller
///
/// Holds the current screen, permission state and session-scoped results.
/// Nothing here is persisted.
pub struct AppModel {
    pub(crate) backends: Backends,
    pub(crate) position_options: PositionOptions,
    pub(crate) screen: Screen,
    pub(crate) camera_gate: CameraGate,
    pub(crate) location_permission: PermissionStatus,
    pub(crate) location_request: LocationRequest,
    /// Bound while the Camera screen is shown and a session is open
    pub(crate) camera: Option<CameraHandle>,
    pub(crate) camera_opening: bool,
    pub(crate) capturing: bool,
    pub(crate) photo: Option<CapturedPhoto>,
    pub(crate) location: Option<LocationReading>,
    pub(crate) flow: FlowGuard,
    pub(crate) last_diagnostic: Option<Diagnostic>,
}

impl AppModel {
    pub fn new(backends: Backends, position_options: PositionOptions) -> Self {
        Self {
            backends,
            position_options,
            screen: Screen::Home,
            camera_gate: CameraGate::default(),
            location_permission: PermissionStatus::default(),
            location_request: LocationRequest::default(),
            camera: None,
            camera_opening: false,
            capturing: false,
            photo: None,
            location: None,
            flow: FlowGuard::default(),
            last_diagnostic: None,
        }
    }

    pub fn from_config(config: &Config, prompter: PermissionPrompter) -> Self {
        Self::new(
            Backends::from_config(config, prompter),
            PositionOptions {
                accuracy: config.location_accuracy,
            },
        )
    }

    pub fn current_screen(&self) -> Screen {
        self.screen
    }

    pub fn camera_gate(&self) -> CameraGate {
        self.camera_gate
    }

    pub fn camera_permission(&self) -> PermissionStatus {
        self.camera_gate.permission_status()
    }

    pub fn location_permission(&self) -> PermissionStatus {
        self.location_permission
    }

    pub fn location_request(&self) -> LocationRequest {
        self.location_request
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        self.photo.as_ref()
    }

    pub fn location(&self) -> Option<&LocationReading> {
        self.location.as_ref()
    }

    pub fn camera_handle(&self) -> Option<&CameraHandle> {
        self.camera.as_ref()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn last_diagnostic(&self) -> Option<&Diagnostic> {
        self.last_diagnostic.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.flow.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_cancels_previous_token() {
        let mut flow = FlowGuard::default();
        let old = flow.token().clone();
        let generation = flow.invalidate();

        assert!(old.is_cancelled());
        assert!(!flow.token().is_cancelled());
        assert_eq!(generation, 1);
        assert!(flow.is_current(1));
        assert!(!flow.is_current(0));
    }

    #[test]
    fn test_gate_permission_status() {
        assert_eq!(
            CameraGate::Pending.permission_status(),
            PermissionStatus::Unknown
        );
        assert_eq!(
            CameraGate::Blocked.permission_status(),
            PermissionStatus::Denied
        );
        assert!(CameraGate::Ready.is_resolved());
        assert!(!CameraGate::Unrequested.is_resolved());
    }
}
