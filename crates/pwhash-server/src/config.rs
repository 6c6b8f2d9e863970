use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default artificial processing delay per hash.
pub const DEFAULT_HASH_DELAY_MS: u64 = 5_000;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8088;

/// What a submission answers with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Answer with the retrieval key right away; hash in the background.
    #[default]
    Deferred,
    /// Wait for the hash and answer with the encoded digest.
    Synchronous,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred => write!(f, "deferred"),
            Self::Synchronous => write!(f, "synchronous"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Artificial delay before each hash is computed, in milliseconds.
    pub hash_delay_ms: u64,
    pub response_mode: ResponseMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            hash_delay_ms: DEFAULT_HASH_DELAY_MS,
            response_mode: ResponseMode::default(),
        }
    }
}

impl ServerConfig {
    pub fn hash_delay(&self) -> Duration {
        Duration::from_millis(self.hash_delay_ms)
    }

    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}
