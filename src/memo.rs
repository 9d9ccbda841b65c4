//! Per-call memo tables for the rebuilding algorithms.
//!
//! A [`MemoTable`] maps operand node ids to result edges in a target manager.
//! Unlike the computed table, every stored result is pinned in the target, so
//! it survives garbage collection for the whole call; the pins are released
//! when the table is drained or dropped.
//!
//! Entries may carry a *fanout*: the number of lookups after which the entry
//! is evicted and its pin released early. An operand node with `n` incoming
//! edges is visited `n` times in one traversal, so after the first visit
//! stores the result, exactly `n - 1` lookups remain.

use std::collections::HashMap;

use log::debug;

use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::NodeId;

#[derive(Debug, Copy, Clone)]
struct Entry {
    value: Ref,
    remaining: Option<u32>,
}

pub struct MemoTable<'a> {
    bdd: &'a Bdd,
    map: HashMap<NodeId, Entry>,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl<'a> MemoTable<'a> {
    /// Creates an empty table whose values live in `bdd`.
    pub fn new(bdd: &'a Bdd) -> Self {
        Self {
            bdd,
            map: HashMap::new(),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn evictions(&self) -> usize {
        self.evictions
    }

    /// Looks up the result stored for `key`.
    ///
    /// When the entry's fanout is exhausted by this lookup, the entry is
    /// removed and its pin released; the returned edge is then floating and
    /// must be pinned by the caller before the next allocation.
    pub fn get(&mut self, key: NodeId) -> Option<Ref> {
        let Some(entry) = self.map.get_mut(&key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;

        let value = entry.value;
        if let Some(remaining) = entry.remaining.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                self.map.remove(&key);
                self.bdd.dereference(value);
                self.evictions += 1;
                debug!("memo: evicted {} -> {}", key, value);
            }
        }
        Some(value)
    }

    /// Stores `value` for `key`, pinning it in the target manager.
    ///
    /// With `fanout = Some(n)`, the entry is evicted after `n` lookups.
    /// `n` must be positive.
    pub fn insert(&mut self, key: NodeId, value: Ref, fanout: Option<u32>) {
        debug_assert!(fanout != Some(0), "Memo entry for {} would never be looked up", key);
        self.bdd.reference(value);
        let old = self.map.insert(
            key,
            Entry {
                value,
                remaining: fanout,
            },
        );
        if let Some(old) = old {
            self.bdd.dereference(old.value);
        }
    }

    /// Releases every stored pin and empties the table.
    ///
    /// Returns the number of drained entries.
    pub fn drain(&mut self) -> usize {
        let n = self.map.len();
        for (_, entry) in self.map.drain() {
            self.bdd.dereference(entry.value);
        }
        if n > 0 {
            debug!(
                "memo: drained {} entries ({} hits, {} misses, {} evictions)",
                n, self.hits, self.misses, self.evictions
            );
        }
        n
    }
}

impl Drop for MemoTable<'_> {
    fn drop(&mut self) {
        self.drain();
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Var;

    #[test]
    fn test_values_pinned_until_drop() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let f = bdd.apply_xor(x, y).unwrap();
        bdd.dereference(f);
        assert_eq!(bdd.ref_count(f), 0);

        {
            let mut memo = MemoTable::new(&bdd);
            memo.insert(NodeId::new(100), -f, None);
            assert_eq!(bdd.ref_count(f), 1);
            assert_eq!(memo.get(NodeId::new(100)), Some(-f));
            assert_eq!(memo.get(NodeId::new(100)), Some(-f));
            assert_eq!(memo.get(NodeId::new(101)), None);
            assert_eq!(memo.hits(), 2);
            assert_eq!(memo.misses(), 1);
        }
        assert_eq!(bdd.ref_count(f), 0);
    }

    #[test]
    fn test_fanout_eviction() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let f = bdd.apply_and(x, y).unwrap();

        let mut memo = MemoTable::new(&bdd);
        memo.insert(NodeId::new(7), f, Some(2));
        assert_eq!(bdd.ref_count(f), 2);

        assert_eq!(memo.get(NodeId::new(7)), Some(f));
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get(NodeId::new(7)), Some(f));
        assert!(memo.is_empty());
        assert_eq!(memo.evictions(), 1);
        assert_eq!(bdd.ref_count(f), 1);

        assert_eq!(memo.get(NodeId::new(7)), None);
    }

    #[test]
    fn test_drain() {
        let bdd = Bdd::with_vars(3);
        let vars: Vec<Ref> = (0..3).map(|i| bdd.mk_var(Var::new(i))).collect();
        let counts: Vec<u32> = vars.iter().map(|&v| bdd.ref_count(v)).collect();

        let mut memo = MemoTable::new(&bdd);
        for (i, &v) in vars.iter().enumerate() {
            memo.insert(NodeId::new(10 + i as u32), v, Some(5));
        }
        assert_eq!(memo.drain(), 3);
        assert!(memo.is_empty());
        let after: Vec<u32> = vars.iter().map(|&v| bdd.ref_count(v)).collect();
        assert_eq!(after, counts);
    }
}
