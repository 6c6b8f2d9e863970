use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Retrieval key for a stored hash.
///
/// Keys are handed out by the store in strictly increasing order starting at
/// zero and are never reused. The textual form is plain decimal digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashKey(u64);

impl HashKey {
    /// The first key issued by a fresh store.
    pub const FIRST: Self = Self(0);

    /// Wrap a raw key value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Convert a signed lookup value into a key.
    ///
    /// Returns `None` for negative values, which can never name an entry.
    pub fn from_signed(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().map(Self)
    }

    /// Parse a key from a URL path segment.
    ///
    /// Only ASCII digits are accepted: signs, whitespace and empty strings are
    /// rejected so that `-1` or `+3` never reach the store.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::EmptyKey);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidKey(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::KeyOverflow(s.to_string()))
    }
}

impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashKey({})", self.0)
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HashKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for HashKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<HashKey> for u64 {
    fn from(key: HashKey) -> Self {
        key.0
    }
}
