//! Foundation types for pwhash.
//!
//! Every other pwhash crate depends on `pwhash-types`.
//!
//! # Key Types
//!
//! - [`HashKey`] -- Integer retrieval key, unique and never reused
//! - [`EntryState`] -- `Pending` or `Ready(digest)` for one stored hash

pub mod entry;
pub mod error;
pub mod key;

pub use entry::EntryState;
pub use error::TypeError;
pub use key::HashKey;
