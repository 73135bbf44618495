// SPDX-License-Identifier: GPL-3.0-only

//! Simulated location backend
//!
//! Reports a configured position after a fixed delay, emulating the time a
//! receiver needs to acquire a fix.

use super::{
    Coordinates, LocationBackendType, LocationProvider, LocationReading, LocationResult,
    PositionOptions,
};
use crate::backends::{Capability, PermissionPolicy, PermissionPrompter, PermissionResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Position reported by the simulated backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl Default for SimulatedPosition {
    fn default() -> Self {
        // Royal Observatory, Greenwich
        Self {
            latitude: 51.4769,
            longitude: -0.0005,
            altitude: Some(46.0),
        }
    }
}

pub struct SimulatedLocation {
    policy: PermissionPolicy,
    prompter: PermissionPrompter,
    position: SimulatedPosition,
    fix_delay: Duration,
}

impl SimulatedLocation {
    pub fn new(
        policy: PermissionPolicy,
        prompter: PermissionPrompter,
        position: SimulatedPosition,
        fix_delay: Duration,
    ) -> Self {
        Self {
            policy,
            prompter,
            position,
            fix_delay,
        }
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocation {
    async fn request_foreground_permission(&self) -> PermissionResponse {
        self.prompter.resolve(self.policy, Capability::Location).await
    }

    async fn current_position(&self, options: &PositionOptions) -> LocationResult<LocationReading> {
        debug!(
            delay_ms = self.fix_delay.as_millis() as u64,
            accuracy = %options.accuracy,
            "Acquiring simulated fix"
        );
        tokio::time::sleep(self.fix_delay).await;

        let coords = Coordinates {
            altitude: self.position.altitude,
            accuracy: Some(options.accuracy.simulated_radius_m()),
            ..Coordinates::new(self.position.latitude, self.position.longitude)
        };
        Ok(LocationReading {
            coords,
            timestamp: chrono::Utc::now().timestamp_millis(),
            mocked: Some(true),
        })
    }

    fn backend_type(&self) -> LocationBackendType {
        LocationBackendType::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LocationAccuracy;

    #[tokio::test]
    async fn test_fix_reports_configured_position() {
        let provider = SimulatedLocation::new(
            PermissionPolicy::Grant,
            PermissionPrompter::disconnected(),
            SimulatedPosition {
                latitude: 1.0,
                longitude: 2.0,
                altitude: None,
            },
            Duration::ZERO,
        );
        let options = PositionOptions {
            accuracy: LocationAccuracy::High,
        };

        let reading = provider.current_position(&options).await.unwrap();
        assert_eq!(reading.coords.latitude, 1.0);
        assert_eq!(reading.coords.longitude, 2.0);
        assert_eq!(reading.coords.altitude, None);
        assert_eq!(reading.coords.accuracy, Some(10.0));
        assert_eq!(reading.mocked, Some(true));
    }

    #[tokio::test]
    async fn test_deny_policy_denies() {
        let provider = SimulatedLocation::new(
            PermissionPolicy::Deny,
            PermissionPrompter::disconnected(),
            SimulatedPosition::default(),
            Duration::ZERO,
        );
        assert_eq!(
            provider.request_foreground_permission().await,
            PermissionResponse::Denied
        );
    }
}
