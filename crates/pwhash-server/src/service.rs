use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use pwhash_crypto::PasswordHasher;
use pwhash_gate::{AdmissionPermit, DrainGate, DrainStatus};
use pwhash_store::{HashStore, InMemoryHashStore, Lookup};
use pwhash_types::HashKey;

use crate::config::ServerConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::stats::{Stats, StatsSnapshot};

/// The hashing service: store, drain gate, statistics and hasher.
///
/// One instance is built at startup and cloned into every request; clones
/// share all state.
#[derive(Clone)]
pub struct HashService {
    store: Arc<dyn HashStore>,
    gate: DrainGate,
    stats: Arc<Stats>,
    hasher: PasswordHasher,
    delay: Duration,
}

impl HashService {
    /// Service backed by an in-memory store.
    pub fn new(delay: Duration) -> Self {
        Self::with_store(Arc::new(InMemoryHashStore::new()), delay)
    }

    pub fn with_store(store: Arc<dyn HashStore>, delay: Duration) -> Self {
        Self {
            store,
            gate: DrainGate::new(),
            stats: Arc::new(Stats::new()),
            hasher: PasswordHasher::new(),
            delay,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.hash_delay())
    }

    pub fn gate(&self) -> &DrainGate {
        &self.gate
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Admit a password for hashing and allocate its key.
    ///
    /// Input is validated before admission, so a rejected request never
    /// touches the gate or the store. The returned [`PendingHash`] holds the
    /// admission until it has run (or is dropped).
    pub fn begin(&self, password: &str) -> ServiceResult<PendingHash> {
        if password.is_empty() {
            return Err(ServiceError::MissingPassword);
        }
        let permit = self.gate.try_admit()?;
        let started = Instant::now();
        let key = self.store.allocate()?;
        debug!(%key, "hash request admitted");
        Ok(PendingHash {
            key,
            password: password.to_owned(),
            started,
            permit,
            service: self.clone(),
        })
    }

    /// Look up a key given as a signed integer.
    pub fn lookup(&self, key: i64) -> ServiceResult<Lookup> {
        Ok(self.store.lookup(key)?)
    }

    /// Look up a key given as a URL path segment.
    ///
    /// Malformed keys are input errors; well-formed keys that were never
    /// issued are [`ServiceError::NotFound`].
    pub fn lookup_path(&self, raw: &str) -> ServiceResult<Lookup> {
        let key = HashKey::parse(raw)?;
        let lookup = match i64::try_from(key.get()) {
            Ok(k) => self.store.lookup(k)?,
            Err(_) => Lookup::NotFound,
        };
        match lookup {
            Lookup::NotFound => Err(ServiceError::NotFound(raw.to_string())),
            found => Ok(found),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop accepting new hashes. Termination fires once the in-flight ones
    /// finish.
    pub fn shutdown(&self) -> DrainStatus {
        self.gate.close_admission()
    }
}

impl fmt::Debug for HashService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashService")
            .field("gate", &self.gate)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// An admitted hash request with an allocated key and no digest yet.
pub struct PendingHash {
    key: HashKey,
    password: String,
    started: Instant,
    permit: AdmissionPermit,
    service: HashService,
}

impl PendingHash {
    pub fn key(&self) -> HashKey {
        self.key
    }

    /// Wait out the processing delay, hash, store the digest and record the
    /// elapsed time. The admission is released when this returns, whatever
    /// the outcome.
    pub async fn run(self) -> ServiceResult<String> {
        let PendingHash {
            key,
            password,
            started,
            permit,
            service,
        } = self;

        if !service.delay.is_zero() {
            tokio::time::sleep(service.delay).await;
        }
        let digest = service.hasher.hash(&password);
        if let Err(e) = service.store.complete(key, digest.clone()) {
            error!(%key, error = %e, "failed to store digest");
            return Err(e.into());
        }
        let elapsed = started.elapsed();
        service.stats.record(elapsed);
        debug!(%key, elapsed_us = elapsed.as_micros() as u64, "hash stored");
        drop(permit);
        Ok(digest)
    }

    /// Run on the runtime as its own task so the work finishes even if the
    /// caller goes away.
    pub fn spawn(self) -> tokio::task::JoinHandle<ServiceResult<String>> {
        let key = self.key;
        tokio::spawn(async move {
            let result = self.run().await;
            if let Err(e) = &result {
                warn!(%key, error = %e, "background hash failed");
            }
            result
        })
    }
}

impl fmt::Debug for PendingHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingHash")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
