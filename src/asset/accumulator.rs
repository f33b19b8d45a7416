//! Append-only keyed aggregate with a single sealing point.
//!
//! Entries are keyed so the flushed artifact does not depend on the order
//! in which interleaved file tasks register them: the first registration of
//! a key wins and the snapshot is ordered by key.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<String, String>,
    sealed: bool,
    rejected: usize,
}

/// Shared, cloneable handle to an accumulator.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    inner: Arc<Mutex<State>>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` under `key`.
    ///
    /// Returns `false` once the accumulator is sealed; the entry is dropped.
    /// A repeated key is accepted but keeps the first source.
    pub fn register(&self, key: impl Into<String>, source: impl Into<String>) -> bool {
        let mut state = self.inner.lock();
        if state.sealed {
            state.rejected += 1;
            return false;
        }
        state.entries.entry(key.into()).or_insert_with(|| source.into());
        true
    }

    /// Seal and take a snapshot. Later calls return the same snapshot.
    pub fn seal(&self) -> Sealed {
        let mut state = self.inner.lock();
        state.sealed = true;
        Sealed {
            entries: state
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Registered keys in order, without sealing.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().entries.keys().cloned().collect()
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.lock().sealed
    }

    /// Number of registrations refused after sealing.
    pub fn rejected(&self) -> usize {
        self.inner.lock().rejected
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view of a sealed accumulator, ordered by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    entries: Vec<(String, String)>,
}

impl Sealed {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
