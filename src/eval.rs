use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Evaluates `f` under a full assignment indexed by variable.
    ///
    /// Variables beyond the end of `assignment` are taken as false.
    pub fn evaluate(&self, f: Ref, assignment: &[bool]) -> bool {
        let mut current = f;
        while !self.is_terminal(current) {
            let var = self.variable(current.id());
            let value = assignment.get(var.index()).copied().unwrap_or(false);
            current = if value {
                self.high_node(current)
            } else {
                self.low_node(current)
            };
        }
        self.is_one(current)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Var;

    #[test]
    fn test_evaluate() {
        let bdd = Bdd::with_vars(3);
        let x = bdd.mk_var(Var::new(0));
        let y = bdd.mk_var(Var::new(1));
        let z = bdd.mk_var(Var::new(2));

        // f = (x ∧ y) ∨ ¬z
        let xy = bdd.apply_and(x, y).unwrap();
        let f = bdd.apply_or(xy, -z).unwrap();

        assert!(bdd.evaluate(f, &[false, false, false]));
        assert!(!bdd.evaluate(f, &[true, false, true]));
        assert!(bdd.evaluate(f, &[true, true, true]));
        assert!(!bdd.evaluate(-f, &[true, true, true]));
        assert!(bdd.evaluate(f, &[]));
        assert!(bdd.evaluate(bdd.one(), &[]));
        assert!(!bdd.evaluate(bdd.zero(), &[true]));
    }
}
