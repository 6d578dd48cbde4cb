//! Boundary features built from a GeoJSON document.

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};

use super::LoadError;
use crate::models::geojson::{GeoJsonDocument, GeoJsonFeature, GeoJsonGeometry};

/// A single named competition region.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// Display name, when the source feature carries one
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl BoundaryFeature {
    fn from_raw(raw: GeoJsonFeature) -> Result<Self, LoadError> {
        let name = raw.display_name();
        let geometry = match raw.geometry {
            None => return Err(LoadError::MissingGeometry),
            Some(GeoJsonGeometry::Polygon { coordinates }) => {
                MultiPolygon::new(vec![build_polygon(coordinates)?])
            }
            Some(GeoJsonGeometry::MultiPolygon { coordinates }) => {
                if coordinates.is_empty() {
                    return Err(LoadError::MissingGeometry);
                }
                let polygons = coordinates
                    .into_iter()
                    .map(build_polygon)
                    .collect::<Result<Vec<_>, _>>()?;
                MultiPolygon::new(polygons)
            }
            Some(GeoJsonGeometry::Unsupported) => return Err(LoadError::UnsupportedGeometry),
        };

        Ok(Self { name, geometry })
    }

    /// Bounding box of this feature (min_lon, min_lat, max_lon, max_lat)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Ordered, immutable set of boundary features.
///
/// Insertion order is evaluation priority: the first feature containing a
/// point is the match. Built once per session; never mutated after load.
#[derive(Debug, Clone)]
pub struct BoundaryCollection {
    features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    /// Validate a parsed GeoJSON document into a collection.
    ///
    /// A bare Feature is wrapped into a one-element collection. Any
    /// structural problem fails the whole load; consumers never see a
    /// partially populated collection.
    pub fn from_document(doc: GeoJsonDocument) -> Result<Self, LoadError> {
        let raw = match doc {
            GeoJsonDocument::FeatureCollection { features } => features,
            GeoJsonDocument::Feature(feature) => vec![feature],
            GeoJsonDocument::Unsupported => return Err(LoadError::UnsupportedDocument),
        };

        if raw.is_empty() {
            return Err(LoadError::EmptyCollection);
        }

        let features = raw
            .into_iter()
            .map(BoundaryFeature::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { features })
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounding box over all features (min_lon, min_lat, max_lon, max_lat)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.features
            .iter()
            .filter_map(BoundaryFeature::bbox)
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    }
}

fn build_polygon(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>, LoadError> {
    let mut rings = rings.into_iter();
    let exterior = match rings.next() {
        Some(ring) => build_ring(ring)?,
        None => return Err(LoadError::MissingGeometry),
    };
    let interiors = rings.map(build_ring).collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Build a closed ring from [lon, lat, ...] positions.
fn build_ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>, LoadError> {
    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(positions.len() + 1);
    for position in &positions {
        if position.len() < 2 {
            return Err(LoadError::InvalidRing);
        }
        ring.push(Coord {
            x: position[0],
            y: position[1],
        });
    }

    if ring.len() < 3 {
        return Err(LoadError::InvalidRing);
    }

    // Close the ring if needed
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    if ring.len() < 4 {
        return Err(LoadError::InvalidRing);
    }

    Ok(LineString::new(ring))
}
