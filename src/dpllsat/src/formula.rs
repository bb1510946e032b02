/*****************************************************************************************[formula.rs]
Copyright (c) 2018-2018, Masaki Hara

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or
substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
**************************************************************************************************/

use crate::{
    clause::{lbool, CRef, Clause, Lit, Var},
    cnf::Cnf,
    intmap::{IntMap, IntMapBool},
};

/// Per-variable data: status, static occurrence lists, and undo stacks.
#[derive(Debug, Clone, Default)]
pub(crate) struct VarData {
    pub(crate) value: lbool,
    /// Clauses containing the variable positively. Never modified after loading.
    pub(crate) pos_occ: Vec<CRef>,
    /// Clauses containing the variable negatively. Never modified after loading.
    pub(crate) neg_occ: Vec<CRef>,
    /// Clauses marked satisfied by the current assignment of this variable.
    pub(crate) satisfied_by: Vec<CRef>,
    /// Clauses from which the falsified literal of this variable was removed.
    pub(crate) removed_from: Vec<CRef>,
}

impl VarData {
    #[inline(always)]
    pub(crate) fn occurrences(&self, sign: bool) -> &[CRef] {
        if sign {
            &self.pos_occ
        } else {
            &self.neg_occ
        }
    }
}

/// The clause store and the occurrence index.
///
/// Both arrays are sized once from the input and never reallocated; clause
/// and variable indices are stable for the lifetime of the formula.
#[derive(Debug, Clone)]
pub struct Formula {
    pub(crate) clauses: IntMap<CRef, Clause>,
    pub(crate) vars: IntMap<Var, VarData>,
    /// Number of clauses not yet satisfied.
    pub(crate) n_unsat: u32,
}

impl Formula {
    /// Build the store from `cnf`, removing duplicate literals in each
    /// clause and recording every literal in its variable's occurrence list.
    pub fn new(cnf: &Cnf) -> Self {
        let mut clauses = IntMap::new();
        let mut vars: IntMap<Var, VarData> = IntMap::with_len(cnf.num_vars() as usize);
        let mut seen: IntMapBool<Lit> = IntMapBool::new();

        for lits in cnf.clauses() {
            let mut c_lits = Vec::with_capacity(lits.len());
            for &lit in lits {
                seen.reserve(lit);
                if !seen[lit] {
                    seen.set(lit, true);
                    c_lits.push(lit);
                }
            }
            for &lit in c_lits.iter() {
                seen.set(lit, false);
            }

            let cr = CRef::from_idx(clauses.len());
            for &lit in c_lits.iter() {
                let vd = &mut vars[lit.var()];
                if lit.sign() {
                    vd.pos_occ.push(cr);
                } else {
                    vd.neg_occ.push(cr);
                }
            }
            clauses.push(Clause::new(c_lits));
        }

        let n_unsat = clauses.len() as u32;
        Formula { clauses, vars, n_unsat }
    }

    #[inline]
    pub fn num_vars(&self) -> u32 {
        self.vars.len() as u32
    }
    #[inline]
    pub fn num_clauses(&self) -> u32 {
        self.clauses.len() as u32
    }
    /// Number of clauses that are not satisfied yet.
    #[inline]
    pub fn num_unsat(&self) -> u32 {
        self.n_unsat
    }
    #[inline]
    pub fn clause(&self, c: CRef) -> &Clause {
        &self.clauses[c]
    }
    pub fn iter_clauses(&self) -> impl Iterator<Item = (CRef, &Clause)> {
        self.clauses.iter()
    }
    #[inline]
    pub fn value(&self, v: Var) -> lbool {
        self.vars[v].value
    }
    #[inline]
    pub fn value_lit(&self, lit: Lit) -> lbool {
        self.value(lit.var()) ^ !lit.sign()
    }
    /// Clauses containing `lit` (static, whatever the current assignment).
    #[inline]
    pub fn occurrences(&self, lit: Lit) -> &[CRef] {
        self.vars[lit.var()].occurrences(lit.sign())
    }
    pub fn iter_vars(&self) -> impl Iterator<Item = Var> {
        self.vars.keys()
    }

    /// Longest active clause among the clauses not yet satisfied.
    pub fn max_unsat_len(&self) -> usize {
        self.clauses
            .values()
            .filter(|c| !c.satisfied())
            .map(|c| c.len())
            .max()
            .unwrap_or(0)
    }

    /// Count clauses in `occ` that are not satisfied and pass `filter`.
    #[inline]
    pub(crate) fn count_unsat<F>(&self, occ: &[CRef], filter: F) -> u32
    where
        F: Fn(&Clause) -> bool,
    {
        occ.iter()
            .map(|&c| &self.clauses[c])
            .filter(|c| !c.satisfied() && filter(c))
            .count() as u32
    }

    /// Forget the undo information of all current assignments.
    ///
    /// Used after preprocessing: top-level assignments are never undone.
    pub(crate) fn drop_undo_info(&mut self) {
        for (_, vd) in self.vars.iter_mut() {
            vd.satisfied_by.clear();
            vd.removed_from.clear();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lit(i: i32) -> Lit {
        Lit::from_dimacs(i)
    }

    #[test]
    fn test_dedup_and_occurrences() {
        let mut cnf = Cnf::new(3);
        cnf.add_clause_dimacs(&[1, -2, 1, -2, 3]);
        cnf.add_clause_dimacs(&[-1, 2]);
        cnf.add_clause_dimacs(&[2, 2]);
        let f = Formula::new(&cnf);

        assert_eq!(f.num_vars(), 3);
        assert_eq!(f.num_clauses(), 3);
        assert_eq!(f.num_unsat(), 3);

        let c0 = CRef::from_idx(0);
        let c1 = CRef::from_idx(1);
        let c2 = CRef::from_idx(2);
        assert_eq!(f.clause(c0).lits(), &[lit(1), lit(-2), lit(3)]);
        assert_eq!(f.clause(c2).lits(), &[lit(2)]);

        assert_eq!(f.occurrences(lit(1)), &[c0]);
        assert_eq!(f.occurrences(lit(-1)), &[c1]);
        assert_eq!(f.occurrences(lit(2)), &[c1, c2]);
        assert_eq!(f.occurrences(lit(-2)), &[c0]);
        assert_eq!(f.occurrences(lit(-3)), &[] as &[CRef]);
    }

    #[test]
    fn test_unused_var() {
        let mut cnf = Cnf::new(4);
        cnf.add_clause_dimacs(&[1, 2]);
        let f = Formula::new(&cnf);
        let v4 = Var::from_id(4);
        assert!(f.value(v4).is_undef());
        assert!(f.occurrences(Lit::new(v4, true)).is_empty());
        assert_eq!(f.max_unsat_len(), 2);
    }
}
