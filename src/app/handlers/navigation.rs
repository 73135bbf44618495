// SPDX-License-Identifier: GPL-3.0-only

//! Navigation handlers
//!
//! Screen transitions always succeed. Every transition starts a new flow
//! generation, so results of gated actions started before it are discarded.

use crate::app::state::{AppModel, CameraGate, LocationRequest, Message, Screen};
use crate::app::task::Task;
use tracing::{debug, info};

impl AppModel {
    /// Switch to `target`
    ///
    /// Leaving Camera releases the camera session; entering Camera with a
    /// granted permission opens one.
    pub fn navigate(&mut self, target: Screen) -> Task<Message> {
        let from = self.screen;
        self.invalidate_in_flight();

        if from == Screen::Camera && target != Screen::Camera {
            self.close_camera_session();
        }

        self.screen = target;
        info!(?from, to = ?target, generation = self.flow.generation(), "Navigated");

        if target == Screen::Camera {
            return self.open_camera_session();
        }
        Task::none()
    }

    /// Cancel in-flight gated work and roll back its transient state
    ///
    /// Stored photo and location are left alone.
    pub(crate) fn invalidate_in_flight(&mut self) {
        let generation = self.flow.invalidate();
        debug!(generation, "Invalidated in-flight work");

        if self.camera_gate == CameraGate::Pending {
            self.camera_gate = CameraGate::Unrequested;
        }
        self.location_request = LocationRequest::Idle;
        self.camera_opening = false;
        self.capturing = false;
    }
}
