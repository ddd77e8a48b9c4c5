//! Bounded query result cache.
//!
//! Entries are evicted in insertion order (FIFO). Reading an entry does not
//! move it, so a popular query is evicted as soon as it becomes the oldest.

use std::collections::{HashMap, VecDeque};

/// Number of queries the engine remembers.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// FIFO cache keyed by normalized query.
#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    capacity: usize,
    entries: HashMap<String, V>,
    /// Keys, oldest first
    order: VecDeque<String>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<V> QueryCache<V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Get a cached value
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Whether `key` is cached
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a value, evicting the oldest entry when full.
    ///
    /// Returns the evicted key, if any. Replacing an existing key keeps its
    /// original position.
    pub fn insert(&mut self, key: String, value: V) -> Option<String> {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return None;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);

        if self.entries.len() > self.capacity {
            let oldest = self.order.pop_front()?;
            self.entries.remove(&oldest);
            return Some(oldest);
        }
        None
    }

    /// Clear all cached values
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
