use serde::{Deserialize, Serialize};

/// State of a single stored hash.
///
/// An entry is created `Pending` when its key is allocated and moves to
/// `Ready` exactly once, when the digest has been computed. Entries are never
/// removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "digest", rename_all = "snake_case")]
pub enum EntryState {
    Pending,
    Ready(String),
}

impl EntryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
