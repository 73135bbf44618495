// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher. Handlers live in the
//! `handlers` submodules, grouped by functional domain:
//!
//! - `handlers::navigation`: screen transitions and flow invalidation
//! - `handlers::camera`: camera permission, session, capture
//! - `handlers::location`: location permission and one-shot fix

use crate::app::state::{AppModel, Message};
use crate::app::task::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ===== Navigation =====
            Message::Navigate(screen) => self.navigate(screen),

            // ===== Camera =====
            Message::AccessCamera => self.handle_access_camera(),
            Message::CameraPermissionResolved {
                generation,
                response,
            } => self.handle_camera_permission_resolved(generation, response),
            Message::CameraSessionOpened { generation, result } => {
                self.handle_camera_session_opened(generation, result)
            }
            Message::TakePhoto => self.handle_take_photo(),
            Message::PhotoCaptured { generation, result } => {
                self.handle_photo_captured(generation, result)
            }
            Message::OpenPhoto => self.handle_open_photo(),
            Message::PhotoOpened(result) => self.handle_photo_opened(result),

            // ===== Location =====
            Message::AccessLocation => self.handle_access_location(),
            Message::LocationPermissionResolved {
                generation,
                response,
            } => self.handle_location_permission_resolved(generation, response),
            Message::LocationFetched { generation, result } => {
                self.handle_location_fetched(generation, result)
            }

            Message::Noop => Task::none(),
        }
    }
}
