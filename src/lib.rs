//! Warbler - boundary membership checking for a birding competition.
//!
//! Given a set of named polygon boundaries loaded from a GeoJSON source and
//! location samples from an unreliable platform, decide whether the user is
//! inside a competition region and project the answer into a small set of
//! display statuses.

pub mod boundary;
pub mod config;
pub mod geometry;
pub mod location;
pub mod models;
pub mod session;
pub mod status;

pub use boundary::{BoundaryCollection, BoundaryFeature, BoundarySource, BoundaryStore, LoadError, LoadState};
pub use geometry::{locate, Membership};
pub use location::{Acquirer, AcquisitionError, AcquisitionPolicy, AcquisitionState, LocationProvider};
pub use models::{GeoPoint, LocationSample};
pub use session::{DisplaySink, Session};
pub use status::{project, StatusCategory, StatusReport};
