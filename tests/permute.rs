//! Permutation of variables within one manager.
//!
//! Tests cover permutation semantics, inverse permutations, substitution
//! helpers, and failure behavior under node limits and dynamic reordering.

use std::collections::HashMap;

use bdd_bridge::bdd::Bdd;
use bdd_bridge::error::BddError;
use bdd_bridge::reference::Ref;
use bdd_bridge::types::Var;
use test_log::test;

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

/// Truth table of `f` with inputs routed through `permutation`.
fn permuted_table(bdd: &Bdd, f: Ref, n: usize, permutation: &[Var]) -> Vec<bool> {
    (0..1u32 << n)
        .map(|bits| {
            let assignment: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
            let inner: Vec<bool> = (0..n).map(|i| assignment[permutation[i].index()]).collect();
            bdd.evaluate(f, &inner)
        })
        .collect()
}

/// (x0 ∧ x1) ∨ x2
fn example(bdd: &Bdd) -> Ref {
    let x0 = bdd.mk_var(var(0));
    let x1 = bdd.mk_var(var(1));
    let x2 = bdd.mk_var(var(2));
    let x0x1 = bdd.apply_and(x0, x1).unwrap();
    let f = bdd.apply_or(x0x1, x2).unwrap();
    bdd.dereference(x0x1);
    f
}

/// Majority of x0..x4 combined with x5 by xor: plenty of shared sub-diagrams.
fn shared(bdd: &Bdd) -> Ref {
    let vars: Vec<Ref> = (0..6).map(|i| bdd.mk_var(var(i))).collect();
    let mut terms = Vec::new();
    for i in 0..5 {
        for j in i + 1..5 {
            for k in j + 1..5 {
                let t = bdd.apply_and_many([vars[i], vars[j], vars[k]]).unwrap();
                terms.push(t);
            }
        }
    }
    let majority = bdd.apply_or_many(terms.iter().copied()).unwrap();
    for t in terms {
        bdd.dereference(t);
    }
    let f = bdd.apply_xor(majority, vars[5]).unwrap();
    bdd.dereference(majority);
    f
}

fn settled_live(bdd: &Bdd) -> usize {
    bdd.collect_garbage();
    bdd.num_live()
}

// ─── Semantics ─────────────────────────────────────────────────────────────────

#[test]
fn permute_swaps_outer_variables() {
    let bdd = Bdd::with_vars(3);
    let f = example(&bdd);

    let g = bdd.permute(f, &[var(2), var(1), var(0)]).unwrap();

    let x0 = bdd.mk_var(var(0));
    let x1 = bdd.mk_var(var(1));
    let x2 = bdd.mk_var(var(2));
    let x2x1 = bdd.apply_and(x2, x1).unwrap();
    assert_eq!(g, bdd.apply_or(x2x1, x0).unwrap());
}

#[test]
fn permute_then_inverse_is_identity() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let permutation = [var(3), var(5), var(0), var(4), var(1), var(2)];
    let mut inverse = vec![var(0); 6];
    for (i, p) in permutation.iter().enumerate() {
        inverse[p.index()] = var(i as u32);
    }

    let g = bdd.permute(f, &permutation).unwrap();
    assert_eq!(truth_table(&bdd, g, 6), permuted_table(&bdd, f, 6, &permutation));

    let back = bdd.permute(g, &inverse).unwrap();
    assert_eq!(back, f);
}

#[test]
fn permute_commutes_with_complement() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let permutation = [var(5), var(4), var(3), var(2), var(1), var(0)];

    let g = bdd.permute(f, &permutation).unwrap();
    let not_g = bdd.permute(-f, &permutation).unwrap();
    assert_eq!(not_g, -g);
}

#[test]
fn permute_releases_memo_pins() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let permutation = [var(1), var(2), var(3), var(4), var(5), var(0)];
    let baseline = settled_live(&bdd);

    let g = bdd.permute(f, &permutation).unwrap();
    assert_eq!(bdd.ref_count(g), 1);
    bdd.dereference(g);
    assert_eq!(settled_live(&bdd), baseline);
}

#[test]
fn swap_variables_exchanges_pairs() {
    let bdd = Bdd::with_vars(4);
    let x0 = bdd.mk_var(var(0));
    let x1 = bdd.mk_var(var(1));
    let x2 = bdd.mk_var(var(2));
    let x3 = bdd.mk_var(var(3));
    let a = bdd.apply_and(x0, -x1).unwrap();
    let f = bdd.apply_or(a, x3).unwrap();

    let g = bdd.swap_variables(f, &[var(0), var(1)], &[var(2), var(3)]).unwrap();

    let b = bdd.apply_and(x2, -x3).unwrap();
    assert_eq!(g, bdd.apply_or(b, x1).unwrap());
}

#[test]
fn rename_substitutes_listed_variables() {
    let bdd = Bdd::with_vars(3);
    let f = example(&bdd);

    let renaming = HashMap::from([(var(2), var(5))]);
    let g = bdd.rename(f, &renaming).unwrap();
    assert_eq!(bdd.support(g), vec![var(0), var(1), var(5)]);

    // x0 ↦ x1 turns x0 ∧ x1 into x1.
    let renaming = HashMap::from([(var(0), var(1))]);
    let h = bdd.rename(f, &renaming).unwrap();
    let x1 = bdd.mk_var(var(1));
    let x2 = bdd.mk_var(var(2));
    assert_eq!(h, bdd.apply_or(x1, x2).unwrap());
}

// ─── Failure ───────────────────────────────────────────────────────────────────

#[test]
fn permute_out_of_memory_at_every_depth_leaks_nothing() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let permutation = [var(5), var(3), var(1), var(0), var(2), var(4)];
    let expected = permuted_table(&bdd, f, 6, &permutation);

    let baseline = settled_live(&bdd);
    let rc = bdd.ref_count(f);

    let mut failures = 0;
    let mut limit = baseline;
    let g = loop {
        bdd.set_max_live(Some(limit));
        match bdd.permute(f, &permutation) {
            Ok(g) => break g,
            Err(e) => {
                assert_eq!(e, BddError::OutOfMemory);
                assert_eq!(settled_live(&bdd), baseline, "leak with limit {}", limit);
                assert_eq!(bdd.ref_count(f), rc);
                failures += 1;
                limit += 1;
            }
        }
    };

    assert!(failures > 0);
    assert_eq!(truth_table(&bdd, g, 6), expected);
}

#[test]
fn permute_unmapped_variable_leaks_nothing() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let baseline = settled_live(&bdd);

    let res = bdd.permute(f, &[var(1), var(0), var(2)]);
    assert!(matches!(res, Err(BddError::UnmappedVariable { var, len: 3 }) if var.index() >= 3));
    assert_eq!(settled_live(&bdd), baseline);
}

// ─── Dynamic Reordering ────────────────────────────────────────────────────────

#[test]
fn permute_retries_after_reordering() {
    let bdd = Bdd::with_vars(6);
    let f = shared(&bdd);
    let permutation = [var(5), var(4), var(3), var(2), var(1), var(0)];
    let expected = permuted_table(&bdd, f, 6, &permutation);

    bdd.collect_garbage();
    bdd.set_next_reorder(bdd.num_live() + 1);
    bdd.enable_auto_reorder();

    let g = bdd.permute(f, &permutation).unwrap();

    assert!(bdd.reorderings() >= 1);
    assert!(!bdd.reordered());
    assert_eq!(truth_table(&bdd, g, 6), expected);
    assert_eq!(truth_table(&bdd, f, 6), permuted_table(&bdd, g, 6, &permutation));
}
