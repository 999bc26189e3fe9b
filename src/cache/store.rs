//! Concurrent Store Module
//!
//! Sharded key/value storage shared by every caller of a cache and by its
//! eviction task.

use dashmap::DashMap;

// == Concurrent Store ==
/// In-memory mapping from string keys to values of a single type.
///
/// Backed by a sharded map, so readers and writers only contend on the shard
/// holding their key. A full clear visits every shard in turn rather than
/// freezing the whole store at once; writes racing with a clear may land on
/// either side of it.
#[derive(Debug)]
pub struct ConcurrentStore<T> {
    /// Key-value storage
    entries: DashMap<String, T>,
}

impl<T: Clone> ConcurrentStore<T> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    // == Load ==
    /// Returns a copy of the value stored under `key`, if any.
    pub fn load(&self, key: &str) -> Option<T> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    // == Store ==
    /// Inserts or overwrites the value stored under `key`.
    pub fn store(&self, key: String, value: T) {
        self.entries.insert(key, value);
    }

    // == Clear ==
    /// Removes every entry and returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, _| {
            removed += 1;
            false
        });
        removed
    }

    // == Length ==
    /// Returns a point-in-time count of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for ConcurrentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
