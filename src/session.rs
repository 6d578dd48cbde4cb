//! Session context tying the boundary store, acquirer, and display together.
//!
//! All shared state lives here rather than in ambient globals: the session
//! owns the store handle, the state machine, and the display sink.

use std::sync::Arc;

use tracing::{debug, info};

use crate::boundary::{BoundaryCollection, BoundarySource, BoundaryStore, LoadError, LoadState};
use crate::location::{Acquirer, AcquisitionPolicy, AcquisitionState, LocationProvider};
use crate::status::{project, StatusReport};

/// Consumes status updates. Fire-and-forget; no return value expected.
pub trait DisplaySink: Send + Sync {
    fn update(&self, report: &StatusReport);
}

/// One user session: a boundary set, an acquirer, and a display.
pub struct Session {
    store: Arc<BoundaryStore>,
    acquirer: Acquirer,
    sink: Arc<dyn DisplaySink>,
}

impl Session {
    pub fn new(
        store: Arc<BoundaryStore>,
        provider: Arc<dyn LocationProvider>,
        policy: AcquisitionPolicy,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            store,
            acquirer: Acquirer::with_policy(provider, policy),
            sink,
        }
    }

    pub fn store(&self) -> &BoundaryStore {
        &self.store
    }

    /// One-time boundary load for the session. Pushes the resulting status
    /// (ready prompt or load error) to the display.
    pub async fn load_boundary(
        &self,
        source: &BoundarySource,
    ) -> Result<Arc<BoundaryCollection>, LoadError> {
        let result = self.store.load(source).await;
        self.sink
            .update(&project(&self.store.state(), &self.acquirer.state()));
        result
    }

    /// The user trigger: run one acquisition cycle and report membership.
    ///
    /// Acquisition is never started autonomously; callers invoke this on an
    /// explicit user action. Returns `None` when a newer trigger superseded
    /// this cycle (the newer one produces its own report) or when the
    /// boundary is not loaded, in which case only the load status is shown
    /// and no acquisition is attempted.
    pub async fn check_location(&self) -> Option<StatusReport> {
        let load = self.store.state();
        if !matches!(load, LoadState::Loaded(_)) {
            // Membership queries are deferred until a successful (re)load
            debug!("check requested without a loaded boundary");
            let report = project(&load, &AcquisitionState::Idle);
            self.sink.update(&report);
            return Some(report);
        }

        // Mirror the state machine's own transitions onto the display while
        // the cycle runs, rather than synthesizing progress reports here.
        let mut updates = self.acquirer.subscribe();
        let acquire = self.acquirer.acquire();
        tokio::pin!(acquire);

        let state = loop {
            tokio::select! {
                biased;
                changed = updates.changed() => {
                    if changed.is_ok() {
                        let state = updates.borrow().state.clone();
                        if !state.is_terminal() {
                            self.sink.update(&project(&load, &state));
                        }
                    }
                }
                outcome = &mut acquire => break outcome?,
            }
        };
        info!("acquisition cycle finished: {:?}", state);

        let report = project(&self.store.state(), &state);
        self.sink.update(&report);
        Some(report)
    }
}
