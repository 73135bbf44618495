// SPDX-License-Identifier: GPL-3.0-only

//! Location handlers
//!
//! Permission first, then a one-shot fix. Denial and fetch failures leave
//! the user on the current screen and only emit a diagnostic.

use crate::app::state::{AppModel, Diagnostic, LocationRequest, Message, Screen};
use crate::app::task::Task;
use crate::backends::location::LocationReading;
use crate::backends::{PermissionResponse, PermissionStatus};
use crate::errors::LocationError;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_access_location(&mut self) -> Task<Message> {
        // A new gated action supersedes whatever was still running
        self.invalidate_in_flight();
        self.location_request = LocationRequest::AwaitingPermission;

        let generation = self.flow.generation();
        let location = Arc::clone(&self.backends.location);
        info!(generation, "Requesting location permission");

        Task::perform(
            async move { location.request_foreground_permission().await },
            move |response| Message::LocationPermissionResolved {
                generation,
                response,
            },
        )
        .abortable(self.flow.token())
    }

    pub(crate) fn handle_location_permission_resolved(
        &mut self,
        generation: u64,
        response: PermissionResponse,
    ) -> Task<Message> {
        if !self.flow.is_current(generation) {
            debug!(generation, "Discarding stale location permission result");
            return Task::none();
        }

        self.location_permission = PermissionStatus::from(response);
        if !response.is_granted() {
            warn!("Location permission denied");
            self.location_request = LocationRequest::Idle;
            self.last_diagnostic = Some(Diagnostic::LocationPermissionDenied);
            return Task::none();
        }

        self.location_request = LocationRequest::Fetching;
        let location = Arc::clone(&self.backends.location);
        let options = self.position_options;
        info!(accuracy = %options.accuracy, "Fetching current position");

        Task::perform(
            async move { location.current_position(&options).await },
            move |result| Message::LocationFetched { generation, result },
        )
        .abortable(self.flow.token())
    }

    pub(crate) fn handle_location_fetched(
        &mut self,
        generation: u64,
        result: Result<LocationReading, LocationError>,
    ) -> Task<Message> {
        if !self.flow.is_current(generation) {
            debug!(generation, "Discarding stale location result");
            return Task::none();
        }
        self.location_request = LocationRequest::Idle;

        match result {
            Ok(reading) => {
                info!(
                    latitude = reading.coords.latitude,
                    longitude = reading.coords.longitude,
                    "Position acquired"
                );
                self.location = Some(reading);
                self.navigate(Screen::Location)
            }
            Err(e) => {
                warn!(error = %e, "Location unavailable");
                self.last_diagnostic = Some(Diagnostic::LocationUnavailable(e.to_string()));
                Task::none()
            }
        }
    }
}
