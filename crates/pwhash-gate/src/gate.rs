use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::error::{GateError, GateResult};
use crate::state::{DrainStatus, GateSnapshot, Released, RunState};

struct Inner {
    state: Mutex<RunState>,
    terminal: watch::Sender<bool>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, RunState> {
        // Critical sections only do integer updates; a poisoned guard still
        // holds consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn signal_terminal(&self) {
        info!("drain complete, signalling termination");
        self.terminal.send_replace(true);
    }

    fn release(&self) {
        let outcome = self.lock().release();
        match outcome {
            Released::Ok => debug!("admission released"),
            Released::Terminal => self.signal_terminal(),
            Released::Underflow => {
                error!("admission released without a matching admit");
                debug_assert!(false, "admission released without a matching admit");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DrainGate
// ---------------------------------------------------------------------------

/// Admission counter and drain gate.
///
/// The `(accepting, in_flight)` pair lives under a single mutex, so admission,
/// release and close each check the terminal condition in the same critical
/// section that changed it. When the gate is closed and the last admitted
/// operation finishes, a termination signal fires exactly once; the owner of
/// the process observes it through [`DrainGate::terminated`].
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct DrainGate {
    inner: Arc<Inner>,
}

impl DrainGate {
    /// Create an open gate with nothing in flight.
    pub fn new() -> Self {
        let (terminal, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(RunState::default()),
                terminal,
            }),
        }
    }

    /// Admit one operation.
    ///
    /// Fails with [`GateError::Draining`] once [`Self::close_admission`] has
    /// run, with no side effects. On success the returned permit holds one
    /// in-flight slot until it is dropped.
    pub fn try_admit(&self) -> GateResult<AdmissionPermit> {
        let admitted = self.inner.lock().admit();
        if !admitted {
            return Err(GateError::Draining);
        }
        debug!("admission granted");
        Ok(AdmissionPermit {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Stop admitting new work.
    ///
    /// Idempotent. If nothing is in flight the termination signal fires
    /// right away.
    pub fn close_admission(&self) -> DrainStatus {
        let (fired, snapshot) = {
            let mut state = self.inner.lock();
            let fired = state.close();
            (fired, state.snapshot())
        };
        if fired {
            self.inner.signal_terminal();
        } else if !snapshot.terminated {
            info!(in_flight = snapshot.in_flight, "admission closed, draining");
        }
        if snapshot.terminated {
            DrainStatus::Terminated
        } else {
            DrainStatus::Draining {
                in_flight: snapshot.in_flight,
            }
        }
    }

    /// Current state of the gate.
    pub fn snapshot(&self) -> GateSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn is_accepting(&self) -> bool {
        self.snapshot().accepting
    }

    pub fn in_flight(&self) -> u64 {
        self.snapshot().in_flight
    }

    /// Returns `true` once the termination signal has fired.
    pub fn is_terminated(&self) -> bool {
        *self.inner.terminal.borrow()
    }

    /// Resolves once the gate is closed and every admitted operation has
    /// released. Resolves immediately if that already happened.
    pub async fn terminated(&self) {
        let mut rx = self.inner.terminal.subscribe();
        // The sender lives in `inner`, which `self` keeps alive, so the
        // channel cannot close while we wait.
        let _ = rx.wait_for(|done| *done).await;
    }

    #[cfg(test)]
    fn terminations(&self) -> u32 {
        self.inner.lock().terminations()
    }
}

impl Default for DrainGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DrainGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrainGate")
            .field("state", &self.snapshot())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AdmissionPermit
// ---------------------------------------------------------------------------

/// One in-flight slot.
///
/// Dropping the permit releases the slot and, if the gate is closed and this
/// was the last slot, fires termination. Releasing on drop covers early
/// returns and panics in the work that followed admission.
#[must_use = "dropping the permit releases the admission immediately"]
pub struct AdmissionPermit {
    inner: Arc<Inner>,
}

impl fmt::Debug for AdmissionPermit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionPermit").finish_non_exhaustive()
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        self.inner.release();
    }
}
