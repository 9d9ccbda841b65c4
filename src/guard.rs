//! Scoped pins on nodes.
//!
//! Intermediate results of a recursive rebuild must stay pinned while sibling
//! sub-results are computed, because node construction may collect garbage.
//! A [`RefGuard`] holds such a pin and releases it on every exit path, so an
//! early return through `?` never leaks a reference.

use std::fmt::{Debug, Formatter};
use std::mem::ManuallyDrop;

use crate::bdd::Bdd;
use crate::reference::Ref;

/// A pin on a node, released when the guard goes out of scope.
pub struct RefGuard<'a> {
    bdd: &'a Bdd,
    node: Ref,
}

impl<'a> RefGuard<'a> {
    /// Pins `node` in `bdd`.
    pub fn new(bdd: &'a Bdd, node: Ref) -> Self {
        bdd.reference(node);
        Self { bdd, node }
    }

    pub fn get(&self) -> Ref {
        self.node
    }

    /// Hands the pin over to the caller, who becomes responsible for
    /// releasing it with [`Bdd::dereference`].
    pub fn into_inner(self) -> Ref {
        let this = ManuallyDrop::new(self);
        this.node
    }
}

impl Drop for RefGuard<'_> {
    fn drop(&mut self) {
        self.bdd.dereference(self.node);
    }
}

impl Debug for RefGuard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RefGuard").field(&self.node).finish()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Var;

    #[test]
    fn test_guard_releases_on_drop() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let f = bdd.apply_and(x, y).unwrap();
        assert_eq!(bdd.ref_count(f), 1);

        {
            let guard = RefGuard::new(&bdd, f);
            assert_eq!(guard.get(), f);
            assert_eq!(bdd.ref_count(f), 2);
        }
        assert_eq!(bdd.ref_count(f), 1);
    }

    #[test]
    fn test_guard_into_inner_keeps_pin() {
        let bdd = Bdd::with_vars(2);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let f = bdd.apply_or(x, y).unwrap();

        let g = RefGuard::new(&bdd, -f).into_inner();
        assert_eq!(g, -f);
        assert_eq!(bdd.ref_count(f), 2);
        bdd.dereference(g);
        assert_eq!(bdd.ref_count(f), 1);
    }

    #[test]
    fn test_guard_released_on_early_return() {
        fn step(bdd: &Bdd, f: Ref, fail: bool) -> Result<Ref, ()> {
            let guard = RefGuard::new(bdd, f);
            if fail {
                return Err(());
            }
            Ok(guard.into_inner())
        }

        let bdd = Bdd::with_vars(1);
        let x = bdd.mk_var(Var::new(0));
        let before = bdd.ref_count(x);
        assert!(step(&bdd, x, true).is_err());
        assert_eq!(bdd.ref_count(x), before);
        let pinned = step(&bdd, x, false).unwrap();
        assert_eq!(bdd.ref_count(x), before + 1);
        bdd.dereference(pinned);
        assert_eq!(bdd.ref_count(x), before);
    }
}
