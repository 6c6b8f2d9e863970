use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Form;

use pwhash_gate::DrainStatus;
use pwhash_protocol::{HealthResponse, StatsResponse, SubmitForm, PENDING_BODY};
use pwhash_store::Lookup;

use crate::config::ResponseMode;
use crate::error::{ServiceError, ServiceResult};
use crate::service::HashService;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: HashService,
    pub mode: ResponseMode,
}

/// `POST /hash`: admit a password and answer with its key or its digest.
///
/// The hash always runs as its own task, so a client that hangs up in
/// synchronous mode does not abandon admitted work.
pub async fn submit_handler(
    State(state): State<AppState>,
    form: Option<Form<SubmitForm>>,
) -> ServiceResult<String> {
    let password = form
        .and_then(|Form(f)| f.password)
        .ok_or(ServiceError::MissingPassword)?;
    let pending = state.service.begin(&password)?;
    let key = pending.key();
    let task = pending.spawn();

    match state.mode {
        ResponseMode::Deferred => Ok(format!("{key}\n")),
        ResponseMode::Synchronous => {
            let digest = task
                .await
                .map_err(|e| ServiceError::Internal(format!("hash task for key {key}: {e}")))??;
            Ok(format!("{digest}\n"))
        }
    }
}

/// `GET /hash/:key`: return the stored digest, or `202 pending` while it is
/// still being computed.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ServiceResult<Response> {
    Ok(match state.service.lookup_path(&raw)? {
        Lookup::Ready(digest) => (StatusCode::OK, format!("{digest}\n")).into_response(),
        Lookup::Pending => (StatusCode::ACCEPTED, format!("{PENDING_BODY}\n")).into_response(),
        Lookup::NotFound => return Err(ServiceError::NotFound(raw)),
    })
}

/// `GET /stats`
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().into())
}

/// `PUT /shutdown`: close admission. Answers `202` while work is still
/// draining and `200` when the server is about to stop.
pub async fn shutdown_handler(State(state): State<AppState>) -> (StatusCode, Json<DrainStatus>) {
    let status = state.service.shutdown();
    let code = if status.is_terminated() {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };
    (code, Json(status))
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let gate = state.service.gate().snapshot();
    Json(HealthResponse::new(gate.accepting, gate.in_flight))
}
