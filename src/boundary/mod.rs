//! Boundary collection loading and storage.
//!
//! Fetches a GeoJSON boundary document, validates it into an immutable
//! ordered collection of polygon features, and holds it for the session.

mod feature;
mod store;

pub use feature::{BoundaryCollection, BoundaryFeature};
pub use store::{BoundarySource, BoundaryStore, LoadError, LoadState};
