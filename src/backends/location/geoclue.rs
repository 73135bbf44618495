// SPDX-License-Identifier: GPL-3.0-only

//! GeoClue2 location backend
//!
//! Talks to `org.freedesktop.GeoClue2` on the system bus. Each fix uses a
//! fresh client: set the desktop id and accuracy, subscribe to
//! `LocationUpdated`, start, wait for the first update, read the location
//! object and stop again.
//!
//! GeoClue has no separate permission call. Authorization happens when a
//! client is started, so the permission request starts and immediately stops
//! a probe client; an `AccessDenied` reply means the user (or the agent)
//! refused.

use super::{
    Coordinates, LocationBackendType, LocationProvider, LocationReading, LocationResult,
    PositionOptions,
};
use crate::backends::{Capability, PermissionPolicy, PermissionPrompter, PermissionResponse};
use crate::errors::LocationError;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, info, warn};
use zbus::zvariant::OwnedObjectPath;

const GEOCLUE_SERVICE: &str = "org.freedesktop.GeoClue2";
const MANAGER_PATH: &str = "/org/freedesktop/GeoClue2/Manager";
const MANAGER_INTERFACE: &str = "org.freedesktop.GeoClue2.Manager";
const CLIENT_INTERFACE: &str = "org.freedesktop.GeoClue2.Client";
const LOCATION_INTERFACE: &str = "org.freedesktop.GeoClue2.Location";

/// GeoClue reports unknown altitude as -DBL_MAX and unknown speed/heading as -1
const UNKNOWN_ALTITUDE: f64 = -1.7976931348623157e308;

pub struct GeoClueLocation {
    policy: PermissionPolicy,
    prompter: PermissionPrompter,
    desktop_id: String,
}

impl GeoClueLocation {
    pub fn new(policy: PermissionPolicy, prompter: PermissionPrompter, desktop_id: String) -> Self {
        Self {
            policy,
            prompter,
            desktop_id,
        }
    }

    /// Create a client proxy configured for this app
    async fn client(
        &self,
        connection: &zbus::Connection,
        accuracy_level: u32,
    ) -> LocationResult<zbus::Proxy<'static>> {
        let manager = zbus::Proxy::new(
            connection,
            GEOCLUE_SERVICE,
            MANAGER_PATH,
            MANAGER_INTERFACE,
        )
        .await?;

        let client_path: OwnedObjectPath = manager.call("GetClient", &()).await?;
        debug!(client = %client_path, "GeoClue client created");

        let client = zbus::Proxy::new_owned(
            connection.clone(),
            GEOCLUE_SERVICE.to_string(),
            client_path,
            CLIENT_INTERFACE.to_string(),
        )
        .await?;

        client
            .set_property("DesktopId", self.desktop_id.as_str())
            .await
            .map_err(|e| LocationError::Backend(format!("Failed to set DesktopId: {}", e)))?;
        client
            .set_property("RequestedAccuracyLevel", accuracy_level)
            .await
            .map_err(|e| {
                LocationError::Backend(format!("Failed to set RequestedAccuracyLevel: {}", e))
            })?;

        Ok(client)
    }

    async fn probe_authorization(&self) -> LocationResult<()> {
        let connection = zbus::Connection::system().await?;
        let client = self.client(&connection, 1).await?;

        let started: Result<(), zbus::Error> = client.call("Start", &()).await;
        match started {
            Ok(()) => {
                let _: Result<(), zbus::Error> = client.call("Stop", &()).await;
                Ok(())
            }
            Err(e) if is_access_denied(&e) => Err(LocationError::PermissionDenied),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_access_denied(err: &zbus::Error) -> bool {
    err.to_string().contains("AccessDenied")
}

/// Map GeoClue's "unknown" sentinels to `None`
fn known(value: f64, unknown_below: f64) -> Option<f64> {
    (value > unknown_below).then_some(value)
}

/// Milliseconds since the epoch for a GeoClue `Timestamp`; `None` when unset
fn epoch_millis(secs: u64, usecs: u64) -> Option<i64> {
    if secs == 0 && usecs == 0 {
        return None;
    }
    let millis = secs.checked_mul(1000)?.checked_add(usecs / 1000)?;
    i64::try_from(millis).ok()
}

#[async_trait]
impl LocationProvider for GeoClueLocation {
    async fn request_foreground_permission(&self) -> PermissionResponse {
        let response = self
            .prompter
            .resolve(self.policy, Capability::Location)
            .await;
        if !response.is_granted() {
            return response;
        }

        match self.probe_authorization().await {
            Ok(()) => PermissionResponse::Granted,
            Err(LocationError::PermissionDenied) => {
                info!("GeoClue refused location access");
                PermissionResponse::Denied
            }
            Err(e) => {
                warn!(error = %e, "GeoClue unavailable, treating as denied");
                PermissionResponse::Denied
            }
        }
    }

    async fn current_position(&self, options: &PositionOptions) -> LocationResult<LocationReading> {
        let connection = zbus::Connection::system().await?;
        let client = self
            .client(&connection, options.accuracy.geoclue_level())
            .await?;

        // Subscribe before starting so the first update cannot be missed
        let mut updates = client.receive_signal("LocationUpdated").await?;

        let started: Result<(), zbus::Error> = client.call("Start", &()).await;
        if let Err(e) = started {
            return Err(if is_access_denied(&e) {
                LocationError::PermissionDenied
            } else {
                e.into()
            });
        }

        let message = updates.next().await.ok_or_else(|| {
            LocationError::Unavailable("GeoClue closed the update stream".to_string())
        })?;
        let (_old, new): (OwnedObjectPath, OwnedObjectPath) = message.body().deserialize()?;
        debug!(location = %new, "GeoClue location updated");

        let location = zbus::Proxy::new_owned(
            connection.clone(),
            GEOCLUE_SERVICE.to_string(),
            new,
            LOCATION_INTERFACE.to_string(),
        )
        .await?;

        let latitude: f64 = location.get_property("Latitude").await?;
        let longitude: f64 = location.get_property("Longitude").await?;
        let accuracy: f64 = location.get_property("Accuracy").await?;
        let altitude: f64 = location.get_property("Altitude").await?;
        let speed: f64 = location.get_property("Speed").await?;
        let heading: f64 = location.get_property("Heading").await?;
        let (secs, usecs): (u64, u64) = location.get_property("Timestamp").await?;

        let _: Result<(), zbus::Error> = client.call("Stop", &()).await;

        info!(latitude, longitude, accuracy, "GeoClue fix acquired");
        Ok(LocationReading {
            coords: Coordinates {
                altitude: known(altitude, UNKNOWN_ALTITUDE),
                accuracy: Some(accuracy),
                heading: known(heading, -1.0),
                speed: known(speed, -1.0),
                ..Coordinates::new(latitude, longitude)
            },
            timestamp: epoch_millis(secs, usecs)
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            mocked: None,
        })
    }

    fn backend_type(&self) -> LocationBackendType {
        LocationBackendType::GeoClue
    }
}
