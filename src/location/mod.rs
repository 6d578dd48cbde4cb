//! Location acquisition: provider abstraction and the state machine that
//! turns unreliable platform requests into a single resolved sample or a
//! terminal error per user-triggered cycle.

mod acquirer;
mod provider;

pub use acquirer::{Acquirer, AcquisitionPolicy, AcquisitionState, CycleState};
pub use provider::{AcquireOptions, AcquisitionError, Capability, LocationProvider};
