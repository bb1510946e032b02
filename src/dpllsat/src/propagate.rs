/*****************************************************************************************[propagate.rs]
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
    clause::{lbool, Lit},
    cnf::Cnf,
    formula::Formula,
    intmap::IntQueue,
};

/// Outcome of one step of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Satisfied,
    Unsatisfied,
    Continued,
    /// A conflict was repaired; the flipped decision is the next literal.
    BacktrackingDone,
}

/// Mutable state of one search: the formula, the queue of literals forced
/// by unit clauses, and the pending-conflict flag.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) f: Formula,
    /// Literals forced by unit clauses, not yet applied.
    pub(crate) units: IntQueue<Lit>,
    /// Set when a clause loses its last literal; consumed by the driver.
    pub(crate) conflict: bool,
    /// Longest unsatisfied clause after preprocessing, an upper bound on
    /// clause lengths during search.
    pub(crate) max_len: usize,
    pub(crate) propagations: u64,
}

impl SearchState {
    pub(crate) fn new(cnf: &Cnf) -> Self {
        let f = Formula::new(cnf);
        let mut units = IntQueue::new();
        let mut conflict = false;
        for (_, c) in f.iter_clauses() {
            match c.len() {
                0 => conflict = true,
                1 => {
                    units.push(c.lits()[0]);
                }
                _ => (),
            }
        }
        if conflict {
            debug!("empty clause in input");
        }
        SearchState { f, units, conflict, max_len: 0, propagations: 0 }
    }

    /// Assign `lit` to true and update every clause it touches.
    ///
    /// Clauses containing `lit` become satisfied; `!lit` is removed from the
    /// other ones. A clause left with one literal queues it; a clause left
    /// empty raises the conflict flag and stops the scan. Every change is
    /// recorded on the variable's undo stacks.
    pub(crate) fn apply(&mut self, lit: Lit) {
        let SearchState { f, units, conflict, propagations, .. } = self;
        let Formula { clauses, vars, n_unsat } = f;
        *propagations += 1;

        let vd = &mut vars[lit.var()];
        debug_assert!(vd.value.is_undef(), "{:?} is already assigned", lit);
        debug_assert!(!*conflict, "assignment with a pending conflict");
        vd.value = lbool::new(lit.sign());

        let (sat_occ, del_occ) = if lit.sign() {
            (&vd.pos_occ, &vd.neg_occ)
        } else {
            (&vd.neg_occ, &vd.pos_occ)
        };

        for &cr in sat_occ.iter() {
            let c = &mut clauses[cr];
            if !c.satisfied() {
                c.set_satisfied(true);
                vd.satisfied_by.push(cr);
                *n_unsat -= 1;
            }
        }

        for &cr in del_occ.iter() {
            let c = &mut clauses[cr];
            if c.satisfied() {
                continue;
            }
            c.remove_lit(!lit);
            vd.removed_from.push(cr);
            match c.len() {
                0 => {
                    trace!("conflict on clause {:?} after {:?}", cr, lit);
                    *conflict = true;
                    break;
                }
                1 => {
                    units.push(c.lits()[0]);
                }
                _ => (),
            }
        }
    }

    /// Exact inverse of `apply(lit)`.
    pub(crate) fn undo(&mut self, lit: Lit) {
        let Formula { clauses, vars, n_unsat } = &mut self.f;
        let vd = &mut vars[lit.var()];
        debug_assert_eq!(vd.value, lbool::new(lit.sign()), "undo of unassigned {:?}", lit);
        vd.value = lbool::UNDEF;

        while let Some(cr) = vd.satisfied_by.pop() {
            clauses[cr].set_satisfied(false);
            *n_unsat += 1;
        }
        while let Some(cr) = vd.removed_from.pop() {
            clauses[cr].restore_lit(!lit);
        }
    }

    /// Status after the last assignment, without backtracking.
    #[inline]
    pub(crate) fn status(&self) -> Step {
        if self.f.n_unsat == 0 {
            Step::Satisfied
        } else if self.conflict {
            Step::Unsatisfied
        } else {
            Step::Continued
        }
    }

    /// Propagate the unit clauses of the input before any decision.
    ///
    /// Assignments made here hold for the whole search, so their undo
    /// information is dropped. Also records `max_len` for MOMS.
    pub(crate) fn preprocess(&mut self) -> Step {
        let mut res = self.status();
        while res == Step::Continued {
            match self.units.pop() {
                None => break,
                Some(lit) => {
                    trace!("preprocess unit {:?}", lit);
                    self.apply(lit);
                    res = self.status();
                }
            }
        }
        if res != Step::Continued {
            debug!("preprocessing: {:?}", res);
            return res;
        }

        self.f.drop_undo_info();
        self.max_len = self.f.max_unsat_len();
        debug!(
            "preprocessing done: {} propagations, {}/{} clauses left, max length {}",
            self.propagations,
            self.f.num_unsat(),
            self.f.num_clauses(),
            self.max_len
        );
        Step::Continued
    }
}
