/// Errors that can occur when asking the gate for admission.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    /// Admission is closed; the service is draining and takes no new work.
    #[error("service is draining and no longer accepts new work")]
    Draining,
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;
