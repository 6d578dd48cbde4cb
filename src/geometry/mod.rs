//! Pure point-in-polygon membership engine.

use geo::{Intersects, Point};

use crate::boundary::BoundaryCollection;
use crate::models::GeoPoint;

/// Result of a membership query. Derived per sample, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub inside: bool,
    /// Name of the matched region, when the matched feature has one
    pub region: Option<String>,
}

impl Membership {
    pub fn outside() -> Self {
        Self {
            inside: false,
            region: None,
        }
    }
}

/// Test a point against every feature in collection order; first match wins.
///
/// Membership is edge-inclusive: a point exactly on a ring counts as inside,
/// so a point on an edge shared by two features resolves to whichever feature
/// comes first in the collection. Hole interiors are outside. Non-finite or
/// out-of-range coordinates yield an outside result rather than an error.
///
/// Pure function of (collection, point); O(total vertices) per query.
pub fn locate(collection: &BoundaryCollection, point: GeoPoint) -> Membership {
    if !point.is_valid() {
        return Membership::outside();
    }

    let p = Point::new(point.lon, point.lat);
    for feature in collection.features() {
        if feature.geometry.intersects(&p) {
            return Membership {
                inside: true,
                region: feature.name.clone(),
            };
        }
    }

    Membership::outside()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &str) -> BoundaryCollection {
        let doc = serde_json::from_str(json).unwrap();
        BoundaryCollection::from_document(doc).unwrap()
    }

    fn square() -> BoundaryCollection {
        collection(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"Name": "Test"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0,0],[0,2],[2,2],[2,0],[0,0]]]}
                }]
            }"#,
        )
    }

    #[test]
    fn test_interior_point_matches_name() {
        // Scenario: unit square named "Test", interior point
        let result = locate(&square(), GeoPoint::new(1.0, 1.0));
        assert_eq!(
            result,
            Membership {
                inside: true,
                region: Some("Test".to_string())
            }
        );
    }

    #[test]
    fn test_exterior_point() {
        let result = locate(&square(), GeoPoint::new(5.0, 5.0));
        assert_eq!(result, Membership::outside());
    }

    #[test]
    fn test_idempotent() {
        let boundaries = square();
        let point = GeoPoint::new(1.0, 1.0);
        assert_eq!(locate(&boundaries, point), locate(&boundaries, point));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let boundaries = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"Name": "First"},
                     "geometry": {"type": "Polygon", "coordinates": [[[0,0],[4,0],[4,4],[0,4],[0,0]]]}},
                    {"type": "Feature", "properties": {"Name": "Second"},
                     "geometry": {"type": "Polygon", "coordinates": [[[2,2],[6,2],[6,6],[2,6],[2,2]]]}}
                ]
            }"#,
        );

        // (3,3) is inside both; the earlier feature must win
        let result = locate(&boundaries, GeoPoint::new(3.0, 3.0));
        assert_eq!(result.region.as_deref(), Some("First"));

        let result = locate(&boundaries, GeoPoint::new(5.0, 5.0));
        assert_eq!(result.region.as_deref(), Some("Second"));
    }

    #[test]
    fn test_edge_inclusive() {
        // A point exactly on the ring counts as inside
        let result = locate(&square(), GeoPoint::new(0.0, 1.0));
        assert!(result.inside);
    }

    #[test]
    fn test_shared_edge_resolves_to_earlier_feature() {
        let boundaries = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"Name": "West"},
                     "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]}},
                    {"type": "Feature", "properties": {"Name": "East"},
                     "geometry": {"type": "Polygon", "coordinates": [[[2,0],[4,0],[4,2],[2,2],[2,0]]]}}
                ]
            }"#,
        );

        // lat 1.0, lon 2.0: exactly on the vertical edge both squares share
        let result = locate(&boundaries, GeoPoint::new(1.0, 2.0));
        assert_eq!(result.region.as_deref(), Some("West"));
    }

    #[test]
    fn test_hole_excluded() {
        let boundaries = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"Name": "Donut"},
                    "geometry": {"type": "Polygon", "coordinates": [
                        [[0,0],[10,0],[10,10],[0,10],[0,0]],
                        [[4,4],[6,4],[6,6],[4,6],[4,4]]
                    ]}
                }]
            }"#,
        );

        assert!(locate(&boundaries, GeoPoint::new(2.0, 2.0)).inside);
        assert!(!locate(&boundaries, GeoPoint::new(5.0, 5.0)).inside);
    }

    #[test]
    fn test_unnamed_feature_has_no_region() {
        let boundaries = collection(
            r#"{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]}
            }"#,
        );
        let result = locate(&boundaries, GeoPoint::new(1.0, 1.0));
        assert!(result.inside);
        assert_eq!(result.region, None);
    }

    #[test]
    fn test_malformed_point_degrades_to_outside() {
        let boundaries = square();
        assert!(!locate(&boundaries, GeoPoint::new(f64::NAN, 1.0)).inside);
        assert!(!locate(&boundaries, GeoPoint::new(1.0, f64::NAN)).inside);
        assert!(!locate(&boundaries, GeoPoint::new(95.0, 0.0)).inside);
    }
}
