//! Variable reordering.
//!
//! # Adjacent swap
//!
//! Every reordering is a sequence of swaps of two adjacent levels. A swap is
//! performed *in place*: a node `f` labelled with the upper variable `x` whose
//! children depend on the lower variable `y`,
//!
//! ```text
//! f = ite(x, ite(y, f11, f10), ite(y, f01, f00))
//! ```
//!
//! is rewritten into a node labelled `y`,
//!
//! ```text
//! f = ite(y, ite(x, f11, f01), ite(x, f10, f00))
//! ```
//!
//! keeping its node id. Every edge held outside the manager therefore keeps
//! denoting the same function across a reordering, and no root needs to be
//! tracked or remapped. Nodes of `x` that do not depend on `y` simply move one
//! level down; nodes of `y` move one level up and may become dead.
//!
//! # Sifting
//!
//! Rudell's sifting moves each variable (largest subtable first) through all
//! levels, measuring the number of live nodes after each swap, and leaves it
//! at the level with the fewest.
//!
//! # Dynamic reordering
//!
//! When enabled, node construction calls [`Bdd::reduce_heap`] once the number
//! of live nodes reaches the manager's threshold, and then fails with
//! [`BddError::Reordered`][crate::error::BddError::Reordered]. The threshold
//! is then raised to twice the live node count after reordering.
//!
//! # References
//!
//! - R. Rudell. "Dynamic variable ordering for ordered binary decision diagrams."
//!   ICCAD 1993. DOI: 10.1109/ICCAD.1993.580054

use std::collections::HashSet;

use log::{debug, info};

use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::{Level, NodeId, Var};

/// Statistics collected during reordering.
#[derive(Debug, Clone, Default)]
pub struct ReorderStats {
    /// Number of variable swaps performed
    pub swaps: usize,
    /// Live nodes before reordering
    pub initial_size: usize,
    /// Live nodes after reordering
    pub final_size: usize,
    /// Number of variables sifted
    pub variables_processed: usize,
}

impl ReorderStats {
    /// Calculate the size reduction ratio.
    pub fn reduction_ratio(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        1.0 - (self.final_size as f64 / self.initial_size as f64)
    }

    /// Calculate the percentage reduction.
    pub fn reduction_percent(&self) -> f64 {
        self.reduction_ratio() * 100.0
    }
}

impl Bdd {
    fn var_cofactors(&self, f: Ref, var: Var) -> (Ref, Ref) {
        if !self.is_terminal(f) && self.variable(f.id()) == var {
            (self.low_node(f), self.high_node(f))
        } else {
            (f, f)
        }
    }

    /// Swaps the variables at `level` and `level + 1` in place.
    ///
    /// Returns the number of restructured nodes. Clears the computed table;
    /// nodes of the lower variable orphaned by the swap are left dead.
    ///
    /// # Panics
    ///
    /// Panics if `level` is the bottom level.
    pub fn swap_adjacent(&self, level: Level) -> usize {
        let lower = level.next();
        assert!(lower.index() < self.num_vars(), "No level below {}", level);

        let x = self.var_at_level(level);
        let y = self.var_at_level(lower);

        let moving: Vec<NodeId> = self
            .subtable_ids(x)
            .into_iter()
            .filter(|&id| {
                let node = self.node(id);
                self.level_of(node.low) == lower || self.level_of(node.high) == lower
            })
            .collect();
        for &id in &moving {
            self.detach(id);
        }

        self.exchange_levels(level);

        for &id in &moving {
            let node = self.node(id);
            let (f00, f01) = self.var_cofactors(node.low, y);
            let (f10, f11) = self.var_cofactors(node.high, y);

            let new_high = self.find_or_alloc(x, f01, f11);
            let new_low = self.find_or_alloc(x, f00, f10);
            debug_assert!(!new_high.is_negated());
            debug_assert_ne!(new_low, new_high);

            self.reference(new_high);
            self.reference(new_low);
            self.dereference(node.high);
            self.dereference(node.low);
            self.relocate(id, y, new_low, new_high);
        }

        self.clear_cache();
        debug!("Swapped {} and {} at {}: {} nodes restructured", x, y, level, moving.len());
        moving.len()
    }

    /// Sifts a single variable to the level minimizing the live node count.
    ///
    /// Returns the number of swaps performed.
    pub fn sift_variable(&self, var: Var) -> usize {
        let num_levels = self.num_vars();
        if num_levels <= 1 {
            return 0;
        }

        let mut level = self.level(var);
        let mut best = (level, self.num_live());
        let mut swaps = 0;
        debug!("Sifting {} (initially at {}, size {})", var, level, best.1);

        // Up to the top.
        while let Some(prev) = level.prev() {
            self.swap_adjacent(prev);
            self.collect_garbage();
            level = prev;
            swaps += 1;
            let size = self.num_live();
            if size < best.1 {
                best = (level, size);
            }
        }

        // Down to the bottom.
        while level.index() + 1 < num_levels {
            self.swap_adjacent(level);
            self.collect_garbage();
            level = level.next();
            swaps += 1;
            let size = self.num_live();
            if size < best.1 {
                best = (level, size);
            }
        }

        // Back to the best position.
        while let Some(prev) = level.prev().filter(|&p| p >= best.0) {
            self.swap_adjacent(prev);
            level = prev;
            swaps += 1;
        }
        self.collect_garbage();

        debug!("Sifted {} to {} (size {}) in {} swaps", var, best.0, self.num_live(), swaps);
        swaps
    }

    /// Sifts every variable, largest subtable first.
    pub fn sift_all_variables(&self) -> ReorderStats {
        self.collect_garbage();
        let initial_size = self.num_live();

        let mut vars: Vec<Var> = (0..self.num_vars() as u32).map(Var::new).collect();
        vars.sort_by_key(|&v| std::cmp::Reverse(self.subtable_len(v)));

        let mut swaps = 0;
        for &var in &vars {
            swaps += self.sift_variable(var);
        }

        ReorderStats {
            swaps,
            initial_size,
            final_size: self.num_live(),
            variables_processed: vars.len(),
        }
    }

    /// Reorders the whole manager by sifting and raises the dynamic threshold.
    ///
    /// Nodes not pinned by anyone are collected first, so every edge the
    /// caller still needs must be referenced.
    pub fn reduce_heap(&self) -> ReorderStats {
        info!(
            "Reordering {} variables: {} live nodes (threshold {})",
            self.num_vars(),
            self.num_live(),
            self.next_reorder()
        );

        let stats = self.sift_all_variables();
        self.reorderings.set(self.reorderings.get() + 1);
        self.next_reorder
            .set(std::cmp::max(2 * self.num_live(), self.config().reorder_threshold));

        info!(
            "Reordering done: {} -> {} live nodes ({:.1}% reduction, {} swaps), next at {}",
            stats.initial_size,
            stats.final_size,
            stats.reduction_percent(),
            stats.swaps,
            self.next_reorder()
        );
        stats
    }

    /// Moves the listed variables to the top levels, in the given order.
    ///
    /// Variables not listed keep their relative order below. Missing
    /// variables are declared first.
    ///
    /// # Panics
    ///
    /// Panics if a variable is listed twice.
    pub fn reorder_to(&self, order: &[Var]) {
        let mut seen = HashSet::new();
        for &var in order {
            assert!(seen.insert(var), "Variable {} appears twice in the requested order", var);
            self.ensure_var(var);
        }

        self.collect_garbage();
        for (target, &var) in order.iter().enumerate() {
            let target = Level::new(target);
            let mut level = self.level(var);
            while let Some(prev) = level.prev().filter(|&p| p >= target) {
                self.swap_adjacent(prev);
                level = prev;
            }
        }
        self.collect_garbage();
        debug!("Reordered to {:?}", self.var_order());
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn var(i: u32) -> Var {
        Var::new(i)
    }

    fn truth_table(bdd: &Bdd, f: Ref, n: usize) -> Vec<bool> {
        (0..1u32 << n)
            .map(|bits| {
                let assignment: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
                bdd.evaluate(f, &assignment)
            })
            .collect()
    }

    #[test]
    fn test_swap_adjacent_preserves_functions() {
        let bdd = Bdd::with_vars(3);
        let x = bdd.mk_var(var(0));
        let y = bdd.mk_var(var(1));
        let z = bdd.mk_var(var(2));

        let xy = bdd.apply_and(x, y).unwrap();
        let f = bdd.apply_or(xy, z).unwrap();
        let g = bdd.apply_xor(x, y).unwrap();
        let tf = truth_table(&bdd, f, 3);
        let tg = truth_table(&bdd, g, 3);

        bdd.swap_adjacent(Level::new(0));
        assert_eq!(bdd.var_order(), vec![var(1), var(0), var(2)]);
        assert_eq!(bdd.level(var(1)), Level::new(0));
        assert_eq!(bdd.level_of(f), Level::new(0));
        assert_eq!(truth_table(&bdd, f, 3), tf);
        assert_eq!(truth_table(&bdd, g, 3), tg);

        bdd.swap_adjacent(Level::new(1));
        assert_eq!(bdd.var_order(), vec![var(1), var(2), var(0)]);
        assert_eq!(truth_table(&bdd, f, 3), tf);
        assert_eq!(truth_table(&bdd, g, 3), tg);

        // Node identity is preserved: recomputing yields the same edges.
        let xy2 = bdd.apply_and(x, y).unwrap();
        assert_eq!(bdd.apply_or(xy2, z).unwrap(), f);
        assert_eq!(bdd.apply_xor(y, x).unwrap(), g);
    }

    #[test]
    fn test_swap_keeps_projections() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(var(0));
        bdd.swap_adjacent(Level::new(0));
        assert_eq!(bdd.mk_var(var(0)), x);
        assert_eq!(bdd.high_node(x), bdd.one());
        assert_eq!(bdd.level_of(x), Level::new(1));
    }

    #[test]
    fn test_sift_reduces_interleaving() {
        // f = (x0 ∧ x3) ∨ (x1 ∧ x4) ∨ (x2 ∧ x5) is exponential under the identity order.
        let bdd = Bdd::with_vars(6);
        let v: Vec<Ref> = (0..6).map(|i| bdd.mk_var(var(i))).collect();
        let mut f = bdd.zero();
        for i in 0..3 {
            let t = bdd.apply_and(v[i], v[i + 3]).unwrap();
            let next = bdd.apply_or(f, t).unwrap();
            bdd.dereference(t);
            bdd.dereference(f);
            f = next;
        }
        let table = truth_table(&bdd, f, 6);
        let size_before = bdd.size(f);

        let stats = bdd.sift_all_variables();
        assert!(stats.final_size <= stats.initial_size);
        assert!(bdd.size(f) < size_before);
        assert_eq!(truth_table(&bdd, f, 6), table);
        assert_eq!(stats.variables_processed, 6);
    }

    #[test]
    fn test_reduce_heap_raises_threshold() {
        let bdd = Bdd::new(crate::bdd::BddConfig::default().with_auto_reorder(10));
        let x = bdd.mk_var(var(0));
        let y = bdd.mk_var(var(1));
        let f = bdd.apply_or(x, y).unwrap();

        bdd.reduce_heap();
        assert_eq!(bdd.reorderings(), 1);
        assert_eq!(bdd.next_reorder(), 10);
        assert_eq!(truth_table(&bdd, f, 2), vec![false, true, true, true]);
    }

    #[test]
    fn test_reorder_to() {
        let bdd = Bdd::with_vars(4);
        let x0 = bdd.mk_var(var(0));
        let x2 = bdd.mk_var(var(2));
        let f = bdd.apply_imply(x0, x2).unwrap();
        let table = truth_table(&bdd, f, 4);

        bdd.reorder_to(&[var(3), var(0)]);
        assert_eq!(bdd.var_order(), vec![var(3), var(0), var(1), var(2)]);
        assert_eq!(truth_table(&bdd, f, 4), table);

        bdd.reorder_to(&[var(2), var(1), var(0), var(3)]);
        assert_eq!(bdd.var_order(), vec![var(2), var(1), var(0), var(3)]);
        assert_eq!(truth_table(&bdd, f, 4), table);
    }

    #[test]
    #[should_panic(expected = "appears twice")]
    fn test_reorder_to_rejects_duplicates() {
        let bdd = Bdd::with_vars(2);
        bdd.reorder_to(&[var(1), var(1)]);
    }

    #[test]
    fn test_reorder_stats() {
        let stats = ReorderStats {
            swaps: 10,
            initial_size: 100,
            final_size: 80,
            variables_processed: 5,
        };

        assert!((stats.reduction_ratio() - 0.2).abs() < 1e-10);
        assert!((stats.reduction_percent() - 20.0).abs() < 1e-8);
    }
}
