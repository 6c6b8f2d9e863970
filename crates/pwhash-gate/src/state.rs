use serde::{Deserialize, Serialize};

/// The `(accepting, in_flight)` pair plus the record of whether termination
/// has fired.
///
/// Every transition is a plain `&mut self` method. Callers hold the gate's
/// single lock across the whole transition, so the terminal check is never
/// separated from the update that made it true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunState {
    accepting: bool,
    in_flight: u64,
    terminations: u32,
}

/// Outcome of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Released {
    /// Counter decremented; terminal condition not newly reached.
    Ok,
    /// Counter decremented and this release reached the terminal condition.
    Terminal,
    /// Release without a matching admission. Counter left at zero.
    Underflow,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            accepting: true,
            in_flight: 0,
            terminations: 0,
        }
    }
}

impl RunState {
    /// Admit one operation if still accepting.
    pub(crate) fn admit(&mut self) -> bool {
        if !self.accepting {
            return false;
        }
        self.in_flight += 1;
        true
    }

    pub(crate) fn release(&mut self) -> Released {
        if self.in_flight == 0 {
            return Released::Underflow;
        }
        self.in_flight -= 1;
        if self.fire_if_terminal() {
            Released::Terminal
        } else {
            Released::Ok
        }
    }

    /// Stop accepting. Returns `true` if this call reached the terminal
    /// condition.
    pub(crate) fn close(&mut self) -> bool {
        self.accepting = false;
        self.fire_if_terminal()
    }

    fn fire_if_terminal(&mut self) -> bool {
        if !self.accepting && self.in_flight == 0 && self.terminations == 0 {
            self.terminations += 1;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn terminations(&self) -> u32 {
        self.terminations
    }

    pub(crate) fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            accepting: self.accepting,
            in_flight: self.in_flight,
            terminated: self.terminations > 0,
        }
    }
}

/// Point-in-time view of the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub accepting: bool,
    pub in_flight: u64,
    pub terminated: bool,
}

/// Result of a drain request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrainStatus {
    /// Admission is closed but operations are still running.
    Draining { in_flight: u64 },
    /// Admission is closed and nothing is running; termination has fired.
    Terminated,
}

impl DrainStatus {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_open_and_idle() {
        let s = RunState::default();
        assert_eq!(
            s.snapshot(),
            GateSnapshot { accepting: true, in_flight: 0, terminated: false }
        );
    }

    #[test]
    fn close_when_idle_fires_immediately() {
        let mut s = RunState::default();
        assert!(s.close());
        assert!(!s.close());
        assert_eq!(s.terminations(), 1);
    }

    #[test]
    fn last_release_after_close_fires() {
        let mut s = RunState::default();
        assert!(s.admit());
        assert!(s.admit());
        assert!(!s.close());
        assert!(!s.admit());
        assert_eq!(s.release(), Released::Ok);
        assert_eq!(s.release(), Released::Terminal);
        assert_eq!(s.terminations(), 1);
    }

    #[test]
    fn release_while_open_never_fires() {
        let mut s = RunState::default();
        s.admit();
        assert_eq!(s.release(), Released::Ok);
        assert_eq!(s.terminations(), 0);
    }

    #[test]
    fn underflow_is_reported_and_clamped() {
        let mut s = RunState::default();
        assert_eq!(s.release(), Released::Underflow);
        assert_eq!(s.snapshot().in_flight, 0);
    }

    #[test]
    fn drain_status_serde() {
        let json = serde_json::to_string(&DrainStatus::Draining { in_flight: 3 }).unwrap();
        assert_eq!(json, r#"{"status":"draining","in_flight":3}"#);
        let json = serde_json::to_string(&DrainStatus::Terminated).unwrap();
        assert_eq!(json, r#"{"status":"terminated"}"#);
    }

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Admit,
        Release,
        Close,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Admit), Just(Op::Release), Just(Op::Close)]
    }

    proptest! {
        #[test]
        fn terminal_fires_once_exactly_when_reached(ops in prop::collection::vec(op(), 0..64)) {
            let mut s = RunState::default();
            let mut admitted: u64 = 0;
            let mut fired = 0u32;
            for op in ops {
                let was_closed = !s.snapshot().accepting;
                match op {
                    Op::Admit => {
                        let ok = s.admit();
                        prop_assert_eq!(ok, !was_closed);
                        if ok {
                            admitted += 1;
                        }
                    }
                    // Releases only for admitted work, as the permit type enforces.
                    Op::Release if admitted > 0 => {
                        admitted -= 1;
                        if s.release() == Released::Terminal {
                            fired += 1;
                        }
                    }
                    Op::Release => {}
                    Op::Close => {
                        if s.close() {
                            fired += 1;
                        }
                    }
                }
                let snap = s.snapshot();
                prop_assert_eq!(snap.in_flight, admitted);
                let terminal = !snap.accepting && snap.in_flight == 0;
                prop_assert_eq!(snap.terminated, terminal);
                prop_assert!(fired <= 1);
                prop_assert_eq!(fired, s.terminations());
            }
        }
    }
}
