//! Location acquisition state machine.
//!
//! Location platforms are unreliable: a single request may silently hang,
//! prompt dialogs may not fire, and a first-class denial may really be a
//! transient prompt issue. One user-triggered acquisition cycle runs a
//! bounded primary request, optionally falls back to a short watch-based
//! retry, and ends in exactly one terminal state. Starting a new cycle
//! supersedes any cycle still in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::debug;

use super::provider::{AcquireOptions, AcquisitionError, Capability, LocationProvider};
use crate::models::LocationSample;

/// State of one acquisition cycle.
///
/// `Resolved` and `Failed` are terminal for the cycle; a new user trigger
/// restarts at `Requesting`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AcquisitionState {
    #[default]
    Idle,
    Requesting,
    Retrying,
    Resolved(LocationSample),
    Failed(AcquisitionError),
}

impl AcquisitionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AcquisitionState::Resolved(_) | AcquisitionState::Failed(_))
    }
}

/// Timeout and retry policy for an acquisition cycle.
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionPolicy {
    /// Bound on the primary single-shot attempt
    pub primary_timeout: Duration,
    /// Bound on the watch-based retry after an ambiguous denial
    pub secondary_timeout: Duration,
    /// Maximum acceptable age of a cached platform sample
    pub max_sample_age: Duration,
    pub high_accuracy: bool,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(15),
            secondary_timeout: Duration::from_secs(3),
            max_sample_age: Duration::from_secs(60),
            high_accuracy: false,
        }
    }
}

/// One entry in the published state stream, tagged with its cycle.
#[derive(Debug, Clone)]
pub struct CycleState {
    pub cycle: u64,
    pub state: AcquisitionState,
}

/// Runs acquisition cycles against a [`LocationProvider`].
///
/// State updates are published through a watch channel. A cycle publishes
/// only while it is still the latest one, so a superseded cycle's late
/// results never overwrite newer state.
pub struct Acquirer {
    provider: Arc<dyn LocationProvider>,
    policy: AcquisitionPolicy,
    cycle: AtomicU64,
    tx: watch::Sender<CycleState>,
}

impl Acquirer {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self::with_policy(provider, AcquisitionPolicy::default())
    }

    pub fn with_policy(provider: Arc<dyn LocationProvider>, policy: AcquisitionPolicy) -> Self {
        let (tx, _) = watch::channel(CycleState {
            cycle: 0,
            state: AcquisitionState::Idle,
        });
        Self {
            provider,
            policy,
            cycle: AtomicU64::new(0),
            tx,
        }
    }

    /// Subscribe to state updates across cycles.
    pub fn subscribe(&self) -> watch::Receiver<CycleState> {
        self.tx.subscribe()
    }

    /// Latest published state, regardless of cycle.
    pub fn state(&self) -> AcquisitionState {
        self.tx.borrow().state.clone()
    }

    /// Run one user-triggered acquisition cycle to a terminal state.
    ///
    /// Returns `None` when a newer cycle superseded this one while it was in
    /// flight; the superseding trigger produces its own resolution, so each
    /// observable cycle resolves exactly once.
    pub async fn acquire(&self) -> Option<AcquisitionState> {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "starting acquisition cycle");

        let state = self.run_cycle(cycle).await;
        if self.publish(cycle, state.clone()) {
            Some(state)
        } else {
            None
        }
    }

    async fn run_cycle(&self, cycle: u64) -> AcquisitionState {
        match self.provider.capability() {
            Capability::Unsupported => {
                return AcquisitionState::Failed(AcquisitionError::CapabilityUnavailable)
            }
            Capability::InsecureContext => {
                return AcquisitionState::Failed(AcquisitionError::InsecureContext)
            }
            Capability::Available => {}
        }

        self.publish(cycle, AcquisitionState::Requesting);

        let opts = AcquireOptions {
            high_accuracy: self.policy.high_accuracy,
            timeout: self.policy.primary_timeout,
            max_age: self.policy.max_sample_age,
        };

        let primary = timeout(
            self.policy.primary_timeout,
            self.provider.current_position(opts),
        )
        .await;

        match primary {
            Ok(Ok(sample)) => AcquisitionState::Resolved(sample),
            Ok(Err(AcquisitionError::Denied)) => {
                // An immediate denial can be a prompt that never fired.
                // Retry briefly with a watch before giving up.
                self.publish(cycle, AcquisitionState::Retrying);
                self.retry(opts).await
            }
            Ok(Err(e)) => AcquisitionState::Failed(e),
            Err(_) => AcquisitionState::Failed(AcquisitionError::Timeout),
        }
    }

    /// Watch-based secondary attempt, bounded by the secondary timeout.
    /// The stream is dropped on return, cancelling the watch.
    async fn retry(&self, opts: AcquireOptions) -> AcquisitionState {
        let watch_opts = AcquireOptions {
            timeout: self.policy.secondary_timeout,
            ..opts
        };
        let mut stream = self.provider.watch_position(watch_opts);

        match timeout(self.policy.secondary_timeout, stream.next()).await {
            Ok(Some(Ok(sample))) => AcquisitionState::Resolved(sample),
            Ok(Some(Err(e))) => AcquisitionState::Failed(e),
            // Stream ended or the secondary timeout elapsed: the denial stands
            Ok(None) | Err(_) => AcquisitionState::Failed(AcquisitionError::Denied),
        }
    }

    /// Publish a state update unless this cycle has been superseded.
    /// `send_replace` records the state even while nobody is subscribed.
    fn publish(&self, cycle: u64, state: AcquisitionState) -> bool {
        if self.cycle.load(Ordering::SeqCst) != cycle {
            debug!(cycle, "dropping update from superseded cycle");
            return false;
        }
        self.tx.send_replace(CycleState { cycle, state });
        true
    }
}
