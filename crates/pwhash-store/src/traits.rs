use pwhash_types::HashKey;

use crate::error::StoreResult;

/// Outcome of looking up a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The digest has been computed.
    Ready(String),
    /// The key was issued but its digest is still being computed.
    Pending,
    /// The key is negative or beyond the highest issued key.
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Append-only keyed store for computed hashes.
///
/// All implementations must satisfy these invariants:
/// - Keys are unique and strictly increasing; concurrent `allocate` calls
///   never return the same key.
/// - A key is visible to `lookup` (as `Pending`) as soon as `allocate`
///   returns, never before.
/// - Each entry moves from `Pending` to `Ready` exactly once and is never
///   removed.
/// - Once `complete` returns, every later `lookup` sees `Ready`.
pub trait HashStore: Send + Sync {
    /// Issue the next key and record it as pending.
    fn allocate(&self) -> StoreResult<HashKey>;

    /// Record the encoded digest for a previously allocated key.
    fn complete(&self, key: HashKey, digest: String) -> StoreResult<()>;

    /// Look up a key.
    ///
    /// Takes a signed value so that negative keys coming from callers are
    /// answered with `NotFound` rather than rejected at the type level.
    fn lookup(&self, key: i64) -> StoreResult<Lookup>;

    /// Number of keys issued so far.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if no key has been issued.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// The highest key issued so far, if any.
    fn last_key(&self) -> StoreResult<Option<HashKey>> {
        let len = self.len()?;
        Ok(len.checked_sub(1).map(|k| HashKey::new(k as u64)))
    }
}
