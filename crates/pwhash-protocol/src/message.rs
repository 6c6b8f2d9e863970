use serde::{Deserialize, Serialize};

/// Form body of a hash submission (`password=<clear text>`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub password: Option<String>,
}

/// Aggregate processing statistics.
///
/// `average` is in microseconds per completed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: u64,
    pub average: u64,
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub accepting: bool,
    pub in_flight: u64,
}

impl HealthResponse {
    pub fn new(accepting: bool, in_flight: u64) -> Self {
        Self {
            status: if accepting { "ok" } else { "draining" }.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            accepting,
            in_flight,
        }
    }
}
