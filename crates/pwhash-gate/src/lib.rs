//! Admission counting and graceful drain for pwhash.
//!
//! Every hashing request must pass through the [`DrainGate`] before it is
//! allowed to allocate a key. The gate counts admitted work and, once a drain
//! has been requested, refuses new work and signals termination exactly once
//! when the last admitted operation finishes.
//!
//! # Modules
//!
//! - [`gate`] -- [`DrainGate`] and the RAII [`AdmissionPermit`]
//! - [`state`] -- The guarded run state, [`GateSnapshot`], [`DrainStatus`]
//! - [`error`] -- [`GateError`]

pub mod error;
pub mod gate;
pub mod state;

pub use error::{GateError, GateResult};
pub use gate::{AdmissionPermit, DrainGate};
pub use state::{DrainStatus, GateSnapshot};
