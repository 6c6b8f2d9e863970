use std::future::Future;
use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

use pwhash_gate::DrainGate;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;
use crate::service::HashService;

/// pwhash HTTP server.
pub struct HashServer {
    config: ServerConfig,
    service: HashService,
}

impl HashServer {
    pub fn new(config: ServerConfig) -> Self {
        let service = HashService::from_config(&config);
        Self { config, service }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The service behind the routes; shares state with the running server.
    pub fn service(&self) -> &HashService {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            service: self.service.clone(),
            mode: self.config.response_mode,
        })
    }

    /// Bind the configured address and serve until drained.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener until drained.
    ///
    /// Returns once admission has been closed (via `/shutdown` or Ctrl-C),
    /// every admitted hash has finished, and open responses have been sent.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        let addr: SocketAddr = listener.local_addr()?;
        let app = self.router();
        info!(
            %addr,
            delay_ms = self.config.hash_delay_ms,
            mode = %self.config.response_mode,
            "pwhash server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(drained(
                self.service.gate().clone(),
                tokio::signal::ctrl_c(),
            ))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        info!("pwhash server stopped");
        Ok(())
    }
}

/// Resolves when the gate reports termination. An interrupt signal closes
/// admission instead of stopping the server outright.
async fn drained(gate: DrainGate, interrupt: impl Future<Output = io::Result<()>>) {
    tokio::select! {
        _ = gate.terminated() => return,
        res = interrupt => match res {
            Ok(()) => {
                info!("interrupt received, closing admission");
                gate.close_admission();
            }
            Err(e) => warn!(error = %e, "cannot listen for interrupt signal"),
        },
    }
    gate.terminated().await;
}
