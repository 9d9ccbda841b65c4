//! Bounded cache backed by the standard `HashMap`.
//!
//! Holds at most `2^bits` entries. Inserting into a full table flushes it
//! first, which keeps memory bounded without per-entry bookkeeping.

use std::collections::HashMap;
use std::hash::Hash;

pub struct HashMapCache<K, V> {
    map: HashMap<K, V>,
    capacity: usize,
    hits: usize,
    misses: usize,
    flushes: usize,
}

impl<K, V> Default for HashMapCache<K, V> {
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> HashMapCache<K, V> {
    /// Creates a cache holding at most `2^bits` entries.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        let capacity = 1 << bits;
        Self {
            map: HashMap::with_capacity(capacity.min(1 << 12)),
            capacity,
            hits: 0,
            misses: 0,
            flushes: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of times the table was flushed because it was full.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Drops all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> HashMapCache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.map.clear();
            self.flushes += 1;
        }
        self.map.insert(key, value);
    }
}
