use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use pwhash_protocol::StatsResponse;

#[derive(Debug, Default)]
struct Totals {
    completed: u64,
    nanos: u128,
}

/// Processing-time aggregate over all completed hashes.
///
/// Count and total are updated together under one lock so a snapshot never
/// sees one without the other.
#[derive(Debug, Default)]
pub struct Stats {
    totals: Mutex<Totals>,
}

/// Point-in-time copy of [`Stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub average_nanos: u64,
}

impl StatsSnapshot {
    pub fn average(&self) -> Duration {
        Duration::from_nanos(self.average_nanos)
    }

    pub fn average_micros(&self) -> u64 {
        self.average_nanos / 1_000
    }
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(s: StatsSnapshot) -> Self {
        StatsResponse {
            total: s.total,
            average: s.average_micros(),
        }
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed operation.
    pub fn record(&self, elapsed: Duration) {
        let mut t = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        t.completed += 1;
        t.nanos += elapsed.as_nanos();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let t = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        let average_nanos = match t.completed {
            0 => 0,
            n => u64::try_from(t.nanos / u128::from(n)).unwrap_or(u64::MAX),
        };
        StatsSnapshot {
            total: t.completed,
            average_nanos,
        }
    }
}
