//! HTTP protocol definitions shared by the pwhash server and its clients.

pub mod endpoint;
pub mod message;

pub use endpoint::{endpoints, PENDING_BODY};
pub use message::{HealthResponse, StatsResponse, SubmitForm};
