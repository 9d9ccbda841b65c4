//! Computed table for memoizing recursive operations.
//!
//! The computed table only ever holds *floating* results: entries do not pin
//! their values. It is therefore cleared on every garbage collection and every
//! reordering, after which any cached node id may be stale.

mod hashmap;

pub use hashmap::HashMapCache;

/// Default cache implementation.
pub type Cache<K, V> = HashMapCache<K, V>;
