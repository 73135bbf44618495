// SPDX-License-Identifier: GPL-3.0-only

//! Camera handlers
//!
//! Handles the camera permission request, the camera session bound to the
//! Camera screen, and still capture.

use crate::app::state::{AppModel, CameraGate, Diagnostic, Message, Screen};
use crate::app::task::Task;
use crate::backends::PermissionResponse;
use crate::backends::camera::{CameraHandle, CapturedPicture};
use crate::errors::CameraError;
use crate::storage;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Permission
    // =========================================================================

    pub(crate) fn handle_access_camera(&mut self) -> Task<Message> {
        if self.camera_gate.is_resolved() {
            debug!(gate = ?self.camera_gate, "Camera permission already resolved this session");
            return self.navigate(Screen::Camera);
        }

        // A new gated action supersedes whatever was still running
        self.invalidate_in_flight();
        self.camera_gate = CameraGate::Pending;

        let generation = self.flow.generation();
        let camera = Arc::clone(&self.backends.camera);
        info!(generation, "Requesting camera permission");

        Task::perform(
            async move { camera.request_permission().await },
            move |response| Message::CameraPermissionResolved {
                generation,
                response,
            },
        )
        .abortable(self.flow.token())
    }

    pub(crate) fn handle_camera_permission_resolved(
        &mut self,
        generation: u64,
        response: PermissionResponse,
    ) -> Task<Message> {
        if !self.flow.is_current(generation) {
            debug!(generation, "Discarding stale camera permission result");
            return Task::none();
        }

        self.camera_gate = match response {
            PermissionResponse::Granted => CameraGate::Ready,
            PermissionResponse::Denied => CameraGate::Blocked,
        };
        info!(?response, "Camera permission resolved");

        // Denial is shown in place on the Camera screen
        self.navigate(Screen::Camera)
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub(crate) fn open_camera_session(&mut self) -> Task<Message> {
        if self.camera_gate != CameraGate::Ready || self.camera.is_some() {
            return Task::none();
        }

        self.camera_opening = true;
        let generation = self.flow.generation();
        let camera = Arc::clone(&self.backends.camera);
        debug!(generation, "Opening camera session");

        Task::perform(
            async move { camera.open().await },
            move |result| Message::CameraSessionOpened {
                generation,
                result: result.map(CameraHandle::new),
            },
        )
        .abortable(self.flow.token())
    }

    pub(crate) fn close_camera_session(&mut self) {
        if let Some(handle) = self.camera.take() {
            debug!(session = %handle.id(), "Unbinding camera session");
        }
        self.camera_opening = false;
    }

    pub(crate) fn handle_camera_session_opened(
        &mut self,
        generation: u64,
        result: Result<CameraHandle, CameraError>,
    ) -> Task<Message> {
        if !self.flow.is_current(generation) {
            debug!(generation, "Discarding stale camera session");
            return Task::none();
        }
        self.camera_opening = false;

        match result {
            Ok(handle) if self.screen == Screen::Camera => {
                self.camera = Some(handle);
            }
            Ok(handle) => {
                debug!(session = %handle.id(), "Camera screen already left, dropping session");
            }
            Err(e) => {
                error!(error = %e, "Failed to open camera");
                self.last_diagnostic = Some(Diagnostic::CameraUnavailable(e.to_string()));
            }
        }
        Task::none()
    }

    // =========================================================================
    // Capture
    // =========================================================================

    pub(crate) fn handle_take_photo(&mut self) -> Task<Message> {
        if self.screen != Screen::Camera || self.camera_gate != CameraGate::Ready {
            debug!(screen = ?self.screen, gate = ?self.camera_gate, "Capture not available");
            return Task::none();
        }
        let Some(handle) = self.camera.clone() else {
            debug!(reason = %CameraError::NoCameraHandle, "Ignoring capture request");
            return Task::none();
        };
        if self.capturing {
            debug!("Capture already in progress");
            return Task::none();
        }

        self.capturing = true;
        let generation = self.flow.generation();
        info!(session = %handle.id(), "Capturing photo...");

        Task::perform(
            async move { handle.take_picture().await },
            move |result| Message::PhotoCaptured { generation, result },
        )
        .abortable(self.flow.token())
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        generation: u64,
        result: Result<CapturedPicture, CameraError>,
    ) -> Task<Message> {
        if !self.flow.is_current(generation) {
            debug!(generation, "Discarding stale capture result");
            return Task::none();
        }
        self.capturing = false;

        match result {
            Ok(picture) => {
                info!(
                    uri = %picture.uri,
                    width = picture.width,
                    height = picture.height,
                    "Photo captured"
                );
                self.photo = Some(picture.into());
            }
            Err(e) => {
                error!(error = %e, "Photo capture failed");
                self.last_diagnostic = Some(Diagnostic::CaptureFailed(e.to_string()));
            }
        }
        Task::none()
    }

    // =========================================================================
    // Viewer
    // =========================================================================

    pub(crate) fn handle_open_photo(&mut self) -> Task<Message> {
        let Some(photo) = &self.photo else {
            debug!("No photo to open");
            return Task::none();
        };
        let Some(path) = storage::path_from_uri(&photo.uri) else {
            warn!(uri = %photo.uri, "Photo is not a local file");
            return Task::none();
        };

        info!(path = %path.display(), "Opening photo in system viewer");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || open::that(&path))
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|opened| opened.map_err(|e| e.to_string()))
            },
            Message::PhotoOpened,
        )
    }

    pub(crate) fn handle_photo_opened(&mut self, result: Result<(), String>) -> Task<Message> {
        if let Err(e) = result {
            warn!(error = %e, "Failed to open photo");
        }
        Task::none()
    }
}
