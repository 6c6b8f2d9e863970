//! Keyed hash storage for pwhash.
//!
//! The store maps integer keys to computed digests. A key is allocated (and
//! recorded as pending) before its digest exists, so callers can hand the key
//! out immediately and fill in the digest later.
//!
//! # Storage Backends
//!
//! All backends implement the [`HashStore`] trait:
//!
//! - [`InMemoryHashStore`] -- `Vec`-backed store, the only backend; nothing
//!   survives a restart.
//!
//! # Design Rules
//!
//! 1. Keys are never reused and entries are never deleted.
//! 2. `Pending -> Ready` happens exactly once per key.
//! 3. Completing an unknown key is a caller bug, reported as an error.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryHashStore;
pub use traits::{HashStore, Lookup};
