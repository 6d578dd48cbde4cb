//! Raw GeoJSON document types.
//!
//! Only the subset needed for boundary data: a FeatureCollection or a bare
//! Feature, with Polygon/MultiPolygon geometry. Positions are kept as
//! variable-length number arrays since upstream data may carry altitude.

use serde::Deserialize;
use serde_json::Value;

/// Top-level GeoJSON document shape.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonDocument {
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Feature(GeoJsonFeature),
    #[serde(other)]
    Unsupported,
}

/// A single GeoJSON feature: properties plus (possibly null) geometry.
#[derive(Debug, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
}

impl GeoJsonFeature {
    /// Display name from properties. The upstream boundary data set uses a
    /// capitalized "Name" key; plain "name" is accepted as a fallback.
    pub fn display_name(&self) -> Option<String> {
        let props = self.properties.as_ref()?;
        props
            .get("Name")
            .or_else(|| props.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Geometry variants we know how to turn into boundary polygons.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Polygon {
        /// Rings of [lon, lat, ...] positions; first ring is the exterior
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}
