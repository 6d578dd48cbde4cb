//! Location sample types produced by the acquisition layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon, WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
    }
}

/// A single resolved location reading.
///
/// Consumed once per display update; superseded by the next sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub point: GeoPoint,

    /// Horizontal accuracy radius in meters, if the platform reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,

    /// When the platform produced this reading
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            accuracy_m: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_accuracy(point: GeoPoint, accuracy_m: f64) -> Self {
        Self {
            point,
            accuracy_m: Some(accuracy_m),
            timestamp: Utc::now(),
        }
    }

    /// Age of this reading relative to now.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        assert!(GeoPoint::new(42.36, -71.05).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
    }

    #[test]
    fn test_invalid_points() {
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }
}
