//! Digest primitives for pwhash.
//!
//! Passwords are hashed with SHA-512 and rendered as URL-safe base64. Both
//! steps wrap established libraries; there is no custom cryptography here.

pub mod hasher;

pub use hasher::{PasswordHasher, DIGEST_LEN, ENCODED_LEN};

/// Hash a clear-text password with the default hasher.
pub fn hashify(clear: &str) -> String {
    PasswordHasher::new().hash(clear)
}
