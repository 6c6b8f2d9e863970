use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use pwhash_gate::GateError;
use pwhash_store::StoreError;
use pwhash_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors surfaced to HTTP callers.
///
/// Input problems, draining and unknown keys are distinct so a client can
/// tell "fix your request" from "the service is going away" from "no such
/// key".
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("expecting body of: \"password=<string>\"")]
    MissingPassword,

    #[error("missing or invalid hash key: {0}")]
    InvalidKey(#[from] TypeError),

    #[error("server is not accepting new requests")]
    Draining(#[from] GateError),

    #[error("no hash stored under key {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingPassword | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::Draining(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, format!("{self}\n")).into_response()
    }
}
