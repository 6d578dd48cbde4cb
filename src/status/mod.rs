//! Projection of load and acquisition state into user-facing status.

use crate::boundary::LoadState;
use crate::geometry::{locate, Membership};
use crate::location::{AcquisitionError, AcquisitionState};
use crate::models::GeoPoint;

/// Label for a matched feature that carries no name.
pub const FALLBACK_REGION_LABEL: &str = "Competition area";

/// User-facing status category. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// No sample yet, or boundary still loading
    Unknown,
    Inside,
    Outside,
    Error,
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCategory::Unknown => write!(f, "unknown"),
            StatusCategory::Inside => write!(f, "inside"),
            StatusCategory::Outside => write!(f, "outside"),
            StatusCategory::Error => write!(f, "error"),
        }
    }
}

/// What the display layer renders: a category, its message, and the current
/// marker position when a sample exists.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub category: StatusCategory,
    pub message: String,
    pub marker: Option<GeoPoint>,
}

impl StatusReport {
    fn new(category: StatusCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            marker: None,
        }
    }

    fn with_marker(mut self, marker: GeoPoint) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Map load and acquisition state to a display tuple.
///
/// Pure: queries the geometry engine for a resolved sample and derives the
/// message deterministically. A failed boundary load dominates everything
/// else; membership is meaningless without a boundary.
pub fn project(load: &LoadState, acquisition: &AcquisitionState) -> StatusReport {
    if matches!(load, LoadState::Failed) {
        return StatusReport::new(StatusCategory::Error, "Failed to load boundary");
    }

    match acquisition {
        AcquisitionState::Idle => StatusReport::new(
            StatusCategory::Unknown,
            "Check location to see if you're inside the boundary",
        ),
        AcquisitionState::Requesting | AcquisitionState::Retrying => {
            StatusReport::new(StatusCategory::Unknown, "Getting location…")
        }
        AcquisitionState::Resolved(sample) => match load {
            LoadState::Loaded(collection) => {
                let membership = locate(collection, sample.point);
                membership_report(&membership).with_marker(sample.point)
            }
            // Queries during an in-flight load are answered as loading
            _ => StatusReport::new(StatusCategory::Unknown, "Boundary still loading…")
                .with_marker(sample.point),
        },
        AcquisitionState::Failed(error) => {
            StatusReport::new(StatusCategory::Error, failure_message(error))
        }
    }
}

fn membership_report(membership: &Membership) -> StatusReport {
    if membership.inside {
        let region = membership.region.as_deref().unwrap_or(FALLBACK_REGION_LABEL);
        StatusReport::new(
            StatusCategory::Inside,
            format!("Inside boundary · {}", region),
        )
    } else {
        StatusReport::new(StatusCategory::Outside, "Outside boundary")
    }
}

/// One distinct message per failure reason; nothing is folded into a
/// generic error.
fn failure_message(error: &AcquisitionError) -> &'static str {
    match error {
        AcquisitionError::Denied => {
            "Location denied. Reset site permissions in your settings and try again."
        }
        AcquisitionError::Unavailable => "Location unavailable",
        AcquisitionError::Timeout => "Location request timed out",
        AcquisitionError::InsecureContext => "Location requires a secure (HTTPS) connection",
        AcquisitionError::CapabilityUnavailable => "Geolocation not supported",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCollection;
    use crate::models::LocationSample;
    use std::sync::Arc;

    fn loaded_square() -> LoadState {
        let doc = serde_json::from_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"Name": "Test"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]}
                }]
            }"#,
        )
        .unwrap();
        LoadState::Loaded(Arc::new(BoundaryCollection::from_document(doc).unwrap()))
    }

    fn resolved(lat: f64, lon: f64) -> AcquisitionState {
        AcquisitionState::Resolved(LocationSample::new(GeoPoint::new(lat, lon)))
    }

    #[test]
    fn test_idle_is_unknown_prompt() {
        let report = project(&loaded_square(), &AcquisitionState::Idle);
        assert_eq!(report.category, StatusCategory::Unknown);
        assert!(report.marker.is_none());
    }

    #[test]
    fn test_requesting_shows_progress() {
        let report = project(&loaded_square(), &AcquisitionState::Requesting);
        assert_eq!(report.category, StatusCategory::Unknown);
        assert_eq!(report.message, "Getting location…");

        let retrying = project(&loaded_square(), &AcquisitionState::Retrying);
        assert_eq!(retrying, report);
    }

    #[test]
    fn test_inside_with_region_name() {
        let report = project(&loaded_square(), &resolved(1.0, 1.0));
        assert_eq!(report.category, StatusCategory::Inside);
        assert_eq!(report.message, "Inside boundary · Test");
        assert_eq!(report.marker, Some(GeoPoint::new(1.0, 1.0)));
    }

    #[test]
    fn test_inside_unnamed_falls_back() {
        let doc = serde_json::from_str(
            r#"{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]}
            }"#,
        )
        .unwrap();
        let load = LoadState::Loaded(Arc::new(BoundaryCollection::from_document(doc).unwrap()));
        let report = project(&load, &resolved(1.0, 1.0));
        assert_eq!(report.message, "Inside boundary · Competition area");
    }

    #[test]
    fn test_outside() {
        let report = project(&loaded_square(), &resolved(5.0, 5.0));
        assert_eq!(report.category, StatusCategory::Outside);
        assert_eq!(report.message, "Outside boundary");
    }

    #[test]
    fn test_load_failure_dominates() {
        let report = project(&LoadState::Failed, &resolved(1.0, 1.0));
        assert_eq!(report.category, StatusCategory::Error);
        assert_eq!(report.message, "Failed to load boundary");
    }

    #[test]
    fn test_sample_while_loading_is_unknown() {
        let report = project(&LoadState::Loading, &resolved(1.0, 1.0));
        assert_eq!(report.category, StatusCategory::Unknown);
        assert!(report.marker.is_some());
    }

    #[test]
    fn test_each_failure_reason_is_distinct() {
        let errors = [
            AcquisitionError::Denied,
            AcquisitionError::Unavailable,
            AcquisitionError::Timeout,
            AcquisitionError::InsecureContext,
            AcquisitionError::CapabilityUnavailable,
        ];
        let mut messages = Vec::new();
        for error in errors {
            let report = project(&loaded_square(), &AcquisitionState::Failed(error));
            assert_eq!(report.category, StatusCategory::Error);
            assert!(!messages.contains(&report.message));
            messages.push(report.message);
        }
    }

    #[test]
    fn test_denied_message_has_reset_hint() {
        let report = project(
            &loaded_square(),
            &AcquisitionState::Failed(AcquisitionError::Denied),
        );
        assert!(report.message.contains("Reset"));
    }
}
