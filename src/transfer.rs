//! Moving diagrams between managers.
//!
//! [`Bdd::transfer_to`] rebuilds a function of one manager in another,
//! keeping variable indices; [`Bdd::transfer_rename`] additionally maps every
//! variable through a renaming array. The two managers may use different
//! variable orders: the result is canonical under the destination's order.
//!
//! The source is only read. The destination is where nodes get allocated, so
//! its limits, time limit and dynamic reordering govern the call, and its
//! retry harness restarts the whole transfer when reordering interrupts it.

use log::{debug, info};

use crate::bdd::Bdd;
use crate::error::BddError;
use crate::guard::RefGuard;
use crate::rebuild::{MemoPolicy, Rebuild, Relabel};
use crate::reference::Ref;
use crate::types::Var;

impl Bdd {
    /// Rebuilds `f` in `target`, keeping variable indices.
    ///
    /// Variables missing in `target` are declared at its bottom level.
    /// The result is pinned in `target`.
    pub fn transfer_to(&self, f: Ref, target: &Bdd) -> Result<Ref, BddError> {
        debug!("transfer_to(f = {})", f);
        self.transfer_with(f, target, Relabel::Identity)
    }

    /// Rebuilds `f` in `target`, replacing every variable `x` by `renaming[x]`.
    ///
    /// The renaming does not have to be injective; a non-injective renaming
    /// substitutes several variables by the same one. Fails with
    /// [`BddError::UnmappedVariable`] if a variable of `f` has no entry.
    /// The result is pinned in `target`.
    pub fn transfer_rename(&self, f: Ref, target: &Bdd, renaming: &[Var]) -> Result<Ref, BddError> {
        debug!("transfer_rename(f = {}, renaming = {:?})", f, renaming);
        self.transfer_with(f, target, Relabel::Map(renaming))
    }

    fn transfer_with(&self, f: Ref, target: &Bdd, relabel: Relabel) -> Result<Ref, BddError> {
        let res = target.retrying(|| {
            let mut rebuild = Rebuild::new(self, target, relabel, MemoPolicy::Always);
            let res = rebuild.run(f)?;
            Ok(target.pin(res))
        })?;
        info!("Transferred {} ({} nodes) to {} ({} nodes)", f, self.size(f), res, target.size(res));
        Ok(res)
    }

    /// Rebuilds several functions in `target`, sharing one memo table so
    /// that common sub-diagrams are translated once.
    ///
    /// Either every result is returned pinned, or none is.
    pub fn transfer_many(&self, roots: &[Ref], target: &Bdd) -> Result<Vec<Ref>, BddError> {
        debug!("transfer_many({} roots)", roots.len());
        target.retrying(|| {
            let mut rebuild = Rebuild::new(self, target, Relabel::Identity, MemoPolicy::Always);
            let mut results = Vec::with_capacity(roots.len());
            for &f in roots {
                let res = rebuild.run(f)?;
                results.push(RefGuard::new(target, res));
            }
            Ok(results.into_iter().map(RefGuard::into_inner).collect())
        })
    }

    /// Declares in `target` every variable of this manager and gives them
    /// the same relative order, on top of `target`'s other variables.
    pub fn copy_vars_to(&self, target: &Bdd) {
        let order = self.var_order();
        debug!("copy_vars_to: {:?}", order);
        target.reorder_to(&order);
    }
}
