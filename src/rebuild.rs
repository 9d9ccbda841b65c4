//! Generic structural rebuild of a diagram.
//!
//! Both transfer between managers and permutation within one manager walk the
//! operand top-down and rebuild it bottom-up, combining the rebuilt children
//! with ITE on the (possibly relabelled) projection of each node's variable:
//!
//! ```text
//! rebuild(f) = ITE(var(relabel(x)), rebuild(f|x=1), rebuild(f|x=0))
//! ```
//!
//! Using ITE instead of creating nodes directly keeps the result canonical
//! under the target's current order, whatever the relabelling does to it.
//! The two algorithms differ only in how variables are relabelled
//! ([`Relabel`]) and in which operand nodes get memoized ([`MemoPolicy`]).

use log::debug;

use crate::bdd::Bdd;
use crate::error::BddError;
use crate::guard::RefGuard;
use crate::memo::MemoTable;
use crate::reference::Ref;
use crate::types::Var;

/// How an operand variable maps to a target variable.
#[derive(Debug, Copy, Clone)]
pub enum Relabel<'m> {
    /// Keep the same variable index.
    Identity,
    /// Look the variable up in a map indexed by operand variable.
    Map(&'m [Var]),
}

impl Relabel<'_> {
    pub fn resolve(&self, var: Var) -> Result<Var, BddError> {
        match self {
            Relabel::Identity => Ok(var),
            Relabel::Map(map) => map.get(var.index()).copied().ok_or(BddError::UnmappedVariable {
                var,
                len: map.len(),
            }),
        }
    }
}

/// Which operand nodes get their results memoized.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MemoPolicy {
    /// Every visited node, kept until the end of the call.
    Always,
    /// Only nodes with a reference count other than one, evicted once all
    /// their other incoming edges have been followed.
    Shared,
}

/// State of one rebuild call: operand and target managers plus the memo table.
///
/// `source` and `target` may be the same manager.
pub struct Rebuild<'s, 't, 'm> {
    source: &'s Bdd,
    target: &'t Bdd,
    relabel: Relabel<'m>,
    policy: MemoPolicy,
    memo: MemoTable<'t>,
}

impl<'s, 't, 'm> Rebuild<'s, 't, 'm> {
    pub fn new(source: &'s Bdd, target: &'t Bdd, relabel: Relabel<'m>, policy: MemoPolicy) -> Self {
        Self {
            source,
            target,
            relabel,
            policy,
            memo: MemoTable::new(target),
        }
    }

    /// Rebuilds `f` in the target manager.
    ///
    /// The result is floating: the caller must pin it before this `Rebuild`
    /// is dropped, since dropping drains the memo table.
    pub fn run(&mut self, f: Ref) -> Result<Ref, BddError> {
        self.rebuild(f)
    }

    fn rebuild(&mut self, f: Ref) -> Result<Ref, BddError> {
        let source = self.source;
        let target = self.target;

        if source.is_terminal(f) {
            return Ok(target.one().negate_if(f.is_negated()));
        }

        let id = f.id();
        let fanout = match self.policy {
            MemoPolicy::Always => Some(None),
            MemoPolicy::Shared => match source.ref_count(f) {
                1 => None,
                rc => Some(Some(rc.saturating_sub(1).max(1))),
            },
        };

        if fanout.is_some() {
            if let Some(res) = self.memo.get(id) {
                return Ok(res.negate_if(f.is_negated()));
            }
        }

        let node = source.node(id);
        let var = self.relabel.resolve(node.variable)?;

        let t = RefGuard::new(target, self.rebuild(node.high)?);
        let e = RefGuard::new(target, self.rebuild(node.low)?);
        let v = target.mk_var(var);
        let res = target.ite_rec(v, t.get(), e.get())?;
        debug!("rebuild: {} ({} -> {}) => {}", id, node.variable, var, res);

        if let Some(fanout) = fanout {
            self.memo.insert(id, res, fanout);
        }
        Ok(res.negate_if(f.is_negated()))
    }
}
