use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha512};

/// Length of a raw SHA-512 digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// Length of an encoded digest: URL-safe base64 of 64 bytes, padded.
pub const ENCODED_LEN: usize = 88;

/// SHA-512 password hasher with URL-safe base64 output.
///
/// Hashing is pure and infallible: the same clear text always produces the
/// same encoded string.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub const fn new() -> Self {
        Self
    }

    /// Raw SHA-512 digest of `data`.
    pub fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha512::new();
        hasher.update(data);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Printable form of a digest (URL-safe alphabet, `=` padding kept).
    pub fn encode(&self, digest: &[u8]) -> String {
        URL_SAFE.encode(digest)
    }

    /// Digest and encode a clear-text password.
    pub fn hash(&self, clear: &str) -> String {
        self.encode(&self.digest(clear.as_bytes()))
    }
}
