//! Platform location source abstraction.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::models::LocationSample;

/// Whether the platform can attempt acquisition at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Available,
    /// No location capability on this platform
    Unsupported,
    /// The execution context is not secure (e.g. plain HTTP)
    InsecureContext,
}

/// Why an acquisition attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    #[error("location permission denied")]
    Denied,
    #[error("location unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location requires a secure context")]
    InsecureContext,
    #[error("location capability unavailable")]
    CapabilityUnavailable,
}

/// Options passed to the platform for one acquisition attempt.
#[derive(Debug, Clone, Copy)]
pub struct AcquireOptions {
    /// Request precise positioning. Off by default: precise GPS can trigger
    /// stricter permission flows on some platforms.
    pub high_accuracy: bool,
    /// How long the platform may spend producing a sample
    pub timeout: Duration,
    /// A cached sample newer than this may be returned without a fresh read
    pub max_age: Duration,
}

/// A source of location samples.
///
/// Mirrors the platform capability split: a single-shot bounded request and
/// a continuous watch. Dropping the watch stream cancels it.
pub trait LocationProvider: Send + Sync {
    fn capability(&self) -> Capability;

    /// Single-shot bounded request.
    fn current_position(
        &self,
        opts: AcquireOptions,
    ) -> BoxFuture<'static, Result<LocationSample, AcquisitionError>>;

    /// Continuous stream of samples.
    fn watch_position(
        &self,
        opts: AcquireOptions,
    ) -> BoxStream<'static, Result<LocationSample, AcquisitionError>>;
}
