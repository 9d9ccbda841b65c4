//! # bdd-bridge: moving BDDs between managers
//!
//! **`bdd-bridge`** is a reference-counted BDD package with complemented edges
//! whose focus is rebuilding functions: transferring them into another manager
//! (optionally renaming variables on the way) and permuting their variables in
//! place, correctly under dynamic variable reordering, resource limits and
//! time limits.
//!
//! ## Managers
//!
//! All nodes live in a [`Bdd`][crate::bdd::Bdd] manager and are reached through
//! [`Ref`][crate::reference::Ref] edges. Every public operation returns its
//! result pinned; release it with [`Bdd::dereference`][crate::bdd::Bdd::dereference]
//! once done. Operations fail with a [`BddError`][crate::error::BddError]
//! instead of returning a wrong node, and a failed operation leaves every
//! reference count as it was.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bdd_bridge::bdd::Bdd;
//! use bdd_bridge::types::Var;
//!
//! let source = Bdd::with_vars(3);
//! let x0 = source.mk_var(Var::new(0));
//! let x1 = source.mk_var(Var::new(1));
//! let x2 = source.mk_var(Var::new(2));
//!
//! // f = (x0 ∧ x1) ∨ x2
//! let x0x1 = source.apply_and(x0, x1).unwrap();
//! let f = source.apply_or(x0x1, x2).unwrap();
//!
//! // Rename x0 → x2, x2 → x0 while moving f into another manager.
//! let target = Bdd::default();
//! let renaming = [Var::new(2), Var::new(1), Var::new(0)];
//! let g = source.transfer_rename(f, &target, &renaming).unwrap();
//! assert!(target.evaluate(g, &[false, true, true]));
//! assert!(!target.evaluate(g, &[false, true, false]));
//!
//! // Same substitution within the source manager.
//! let h = source.permute(f, &renaming).unwrap();
//! assert!(source.evaluate(h, &[true, false, false]));
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The manager: unique table, reference counting, garbage collection and ITE.
//! - **[`transfer`]**: Rebuilding functions in another manager.
//! - **[`permute`]**: Permuting and substituting variables within a manager.
//! - **[`reorder`]**: In-place adjacent swaps, sifting and dynamic reordering.
//! - **[`retry`]**: The restart-on-reorder harness shared by all operations.

pub mod bdd;
pub mod cache;
pub mod error;
pub mod eval;
pub mod guard;
pub mod memo;
pub mod node;
pub mod permute;
pub mod rebuild;
pub mod reference;
pub mod reorder;
pub mod retry;
pub mod sat;
pub mod subtable;
pub mod transfer;
pub mod types;
