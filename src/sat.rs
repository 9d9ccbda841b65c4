use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::{NodeId, Var};

impl Bdd {
    /// Returns one satisfying assignment of `f` as `(variable, value)` pairs
    /// along a path to ONE, or `None` if `f` is the constant false.
    pub fn one_sat(&self, f: Ref) -> Option<Vec<(Var, bool)>> {
        if self.is_zero(f) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;
        while !self.is_one(current) {
            let var = self.variable(current.id());
            let high = self.high_node(current);
            if !self.is_zero(high) {
                path.push((var, true));
                current = high;
            } else {
                path.push((var, false));
                current = self.low_node(current);
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments of `f` over `num_vars` variables.
    ///
    /// Independent of the current variable order: each node's count is the
    /// mean of its children's counts, scaled to the full space.
    pub fn sat_count(&self, f: Ref, num_vars: usize) -> BigUint {
        let max = BigUint::from(1u32) << num_vars;
        let mut cache = HashMap::new();
        let count = self.sat_count_rec(f.regular(), &max, &mut cache);
        if f.is_negated() {
            max - count
        } else {
            count
        }
    }

    fn sat_count_rec(&self, f: Ref, max: &BigUint, cache: &mut HashMap<NodeId, BigUint>) -> BigUint {
        debug_assert!(!f.is_negated());
        if self.is_one(f) {
            return max.clone();
        }
        if let Some(count) = cache.get(&f.id()) {
            return count.clone();
        }

        let count_of = |this: &Self, child: Ref, cache: &mut HashMap<NodeId, BigUint>| {
            let count = this.sat_count_rec(child.regular(), max, cache);
            if child.is_negated() {
                max - count
            } else {
                count
            }
        };
        let low = count_of(self, self.low(f.id()), cache);
        let high = count_of(self, self.high(f.id()), cache);

        let count: BigUint = (low + high) >> 1;
        cache.insert(f.id(), count.clone());
        count
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_sat_count() {
        let bdd = Bdd::with_vars(3);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let z = bdd.mk_var(Var::new(2));

        let xy = bdd.apply_and(x, y).unwrap();
        let f = bdd.apply_or(xy, z).unwrap();

        assert_eq!(bdd.sat_count(f, 3), BigUint::from(5u32));
        assert_eq!(bdd.sat_count(-f, 3), BigUint::from(3u32));
        assert_eq!(bdd.sat_count(f, 4), BigUint::from(10u32));
        assert_eq!(bdd.sat_count(bdd.one(), 3), BigUint::from(8u32));
        assert_eq!(bdd.sat_count(bdd.zero(), 3), BigUint::ZERO);
    }

    #[test]
    fn test_one_sat() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let f = bdd.apply_and(x, -y).unwrap();

        let path = bdd.one_sat(f).unwrap();
        assert_eq!(path, vec![(Var::new(0), true), (Var::new(1), false)]);
        assert_eq!(bdd.one_sat(bdd.zero()), None);
        assert_eq!(bdd.one_sat(bdd.one()), Some(vec![]));
    }
}
