// SPDX-License-Identifier: GPL-3.0-only

//! Location reading types

use serde::{Deserialize, Serialize};

/// Position fix as returned by a location provider
///
/// Serializes to the same shape mobile location APIs hand to apps, which is
/// also the text shown on the Location screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    pub coords: Coordinates,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Set by providers that do not report a real fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mocked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the WGS84 ellipsoid
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Horizontal error radius in meters
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
    /// Degrees clockwise from true north
    #[serde(default)]
    pub heading: Option<f64>,
    /// Meters per second
    #[serde(default)]
    pub speed: Option<f64>,
}

impl Coordinates {
    /// Coordinates with only latitude and longitude known
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }
}

impl LocationReading {
    pub fn new(coords: Coordinates, timestamp: i64) -> Self {
        Self {
            coords,
            timestamp,
            mocked: None,
        }
    }

    /// JSON text for display
    pub fn to_display_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"coords\":{{\"latitude\":{},\"longitude\":{}}}}}",
                self.coords.latitude, self.coords.longitude
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_camel_case_and_nulls() {
        let reading = LocationReading::new(Coordinates::new(1.0, 2.0), 1_700_000_000_000);
        assert_eq!(
            reading.to_display_string(),
            "{\"coords\":{\"latitude\":1.0,\"longitude\":2.0,\"altitude\":null,\"accuracy\":null,\
             \"altitudeAccuracy\":null,\"heading\":null,\"speed\":null},\"timestamp\":1700000000000}"
        );
    }

    #[test]
    fn test_partial_json_fills_missing_fields() {
        let reading: LocationReading =
            serde_json::from_str(r#"{"coords":{"latitude":1,"longitude":2},"timestamp":5}"#)
                .unwrap();
        assert_eq!(reading.coords, Coordinates::new(1.0, 2.0));
        assert_eq!(reading.mocked, None);
    }
}
