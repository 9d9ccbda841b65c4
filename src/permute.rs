//! Variable permutation and substitution within one manager.
//!
//! [`Bdd::permute`] replaces every variable `x` of a function by
//! `permutation[x]`. Rebuilding happens in the same manager the operand lives
//! in, with ITE keeping the result canonical. Only operand nodes reachable
//! through more than one edge get memoized, and their entries are evicted as
//! soon as every other edge has been followed.

use std::collections::HashMap;

use log::debug;

use crate::bdd::Bdd;
use crate::error::BddError;
use crate::rebuild::{MemoPolicy, Rebuild, Relabel};
use crate::reference::Ref;
use crate::types::Var;

impl Bdd {
    /// Replaces every variable `x` of `f` by `permutation[x]`.
    ///
    /// Fails with [`BddError::UnmappedVariable`] if a variable of `f` lies
    /// beyond the end of `permutation`. The result is pinned.
    pub fn permute(&self, f: Ref, permutation: &[Var]) -> Result<Ref, BddError> {
        debug!("permute(f = {}, permutation = {:?})", f, permutation);
        self.retrying(|| {
            let mut rebuild = Rebuild::new(self, self, Relabel::Map(permutation), MemoPolicy::Shared);
            let res = rebuild.run(f)?;
            Ok(self.pin(res))
        })
    }

    /// Exchanges `xs[i]` with `ys[i]` for every `i`.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `ys` differ in length.
    pub fn swap_variables(&self, f: Ref, xs: &[Var], ys: &[Var]) -> Result<Ref, BddError> {
        assert_eq!(xs.len(), ys.len(), "Swapped variable lists differ in length");
        for &v in xs.iter().chain(ys) {
            self.ensure_var(v);
        }
        let mut permutation = self.identity_permutation();
        for (&x, &y) in xs.iter().zip(ys) {
            permutation[x.index()] = y;
            permutation[y.index()] = x;
        }
        self.permute(f, &permutation)
    }

    /// Substitutes variables according to `renaming`; unlisted variables stay.
    ///
    /// The renaming need not be injective, in which case the substituted
    /// variables merge.
    pub fn rename(&self, f: Ref, renaming: &HashMap<Var, Var>) -> Result<Ref, BddError> {
        let mut permutation = self.identity_permutation();
        for (&from, &to) in renaming {
            if from.index() < permutation.len() {
                permutation[from.index()] = to;
            }
        }
        self.permute(f, &permutation)
    }

    fn identity_permutation(&self) -> Vec<Var> {
        (0..self.num_vars() as u32).map(Var::new).collect()
    }
}
