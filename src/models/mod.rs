//! Core data models for boundary checking.

pub mod geojson;
pub mod sample;

pub use sample::{GeoPoint, LocationSample};
