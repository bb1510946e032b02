/*****************************************************************************************[heuristic.rs]
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

use {
    crate::{
        clause::{Lit, Var},
        formula::Formula,
    },
    std::fmt,
};

/// Branching heuristic, fixed when the solver is created.
///
/// Both heuristics scan the unassigned variables by increasing id and keep
/// the first variable with the strictly best score. The literal returned is
/// positive unless the variable occurs strictly more often negatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Dynamic Largest Combined Sum: maximize `P + Q`, the number of
    /// unsatisfied clauses containing the variable positively / negatively.
    Dlcs,
    /// Maximum Occurrences on clauses of Minimum Size: maximize
    /// `(P + 1) * (Q + 1)` counted over the shortest unsatisfied clauses.
    Moms,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Dlcs
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Heuristic::Dlcs => write!(out, "DLCS(Dynamic Largest Combined Sum)"),
            Heuristic::Moms => write!(out, "MOMS(Maximum Occurrences on clauses of Minimum Size)"),
        }
    }
}

impl Heuristic {
    /// `false` selects DLCS, `true` selects MOMS.
    pub fn from_flag(moms: bool) -> Self {
        if moms {
            Heuristic::Moms
        } else {
            Heuristic::Dlcs
        }
    }

    /// Pick the next decision literal, or `None` if there is nothing to
    /// decide on.
    ///
    /// `max_len` bounds the length of any unsatisfied clause (see
    /// `SearchState::max_len`).
    pub(crate) fn pick(&self, f: &Formula, max_len: usize) -> Option<Lit> {
        match self {
            Heuristic::Dlcs => pick_dlcs(f),
            Heuristic::Moms => pick_moms(f, max_len),
        }
    }
}

#[inline]
fn polarity(v: Var, pos: u32, neg: u32) -> Lit {
    Lit::new(v, pos >= neg)
}

/// Returns `None` if every unassigned variable only occurs in satisfied
/// clauses (in particular, if all variables are assigned).
fn pick_dlcs(f: &Formula) -> Option<Lit> {
    let mut best = 0;
    let mut next = None;
    for v in f.iter_vars() {
        if !f.value(v).is_undef() {
            continue;
        }
        let vd = &f.vars[v];
        let pos = f.count_unsat(&vd.pos_occ, |_| true);
        let neg = f.count_unsat(&vd.neg_occ, |_| true);
        if pos + neg > best {
            best = pos + neg;
            next = Some(polarity(v, pos, neg));
        }
    }
    next
}

/// Returns `None` only if all variables are assigned.
fn pick_moms(f: &Formula, max_len: usize) -> Option<Lit> {
    let mut min_len = max_len;
    for (_, c) in f.iter_clauses() {
        if min_len == 2 {
            // no unsatisfied clause is shorter outside of propagation
            break;
        }
        if !c.satisfied() && c.len() < min_len {
            min_len = c.len();
        }
    }

    let mut best = 0;
    let mut next = None;
    for v in f.iter_vars() {
        if !f.value(v).is_undef() {
            continue;
        }
        let vd = &f.vars[v];
        let pos = f.count_unsat(&vd.pos_occ, |c| c.len() == min_len);
        let neg = f.count_unsat(&vd.neg_occ, |c| c.len() == min_len);
        let score = (pos + 1) * (neg + 1);
        if score > best {
            best = score;
            next = Some(polarity(v, pos, neg));
        }
    }
    next
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{cnf::Cnf, propagate::SearchState};

    fn lit(i: i32) -> Lit {
        Lit::from_dimacs(i)
    }

    fn state(n: u32, clauses: &[&[i32]]) -> SearchState {
        let mut cnf = Cnf::new(n);
        for c in clauses {
            cnf.add_clause_dimacs(c);
        }
        let mut st = SearchState::new(&cnf);
        st.preprocess();
        st
    }

    #[test]
    fn test_dlcs_max_combined() {
        let st = state(3, &[&[1, 2], &[-2, 3], &[2, -3], &[-2, 1]]);
        // var 2: P=2, Q=2
        assert_eq!(Heuristic::Dlcs.pick(&st.f, st.max_len), Some(lit(2)));
    }

    #[test]
    fn test_dlcs_negative_majority() {
        let st = state(2, &[&[-1, 2], &[-1, -2], &[1, 2]]);
        // var 1: P=1, Q=2; var 2: P=2, Q=1; first strict max wins
        assert_eq!(Heuristic::Dlcs.pick(&st.f, st.max_len), Some(lit(-1)));
    }

    #[test]
    fn test_dlcs_ignores_satisfied() {
        let mut st = state(3, &[&[1, 2], &[1, 3], &[-2, -3], &[2, 3]]);
        st.apply(lit(1));
        // remaining: -2 -3, 2 3 ; tie between 2 and 3, first wins, tie on polarity -> positive
        assert_eq!(Heuristic::Dlcs.pick(&st.f, st.max_len), Some(lit(2)));
    }

    #[test]
    fn test_dlcs_nothing_left() {
        let mut st = state(2, &[&[1, 2]]);
        st.apply(lit(1));
        assert_eq!(Heuristic::Dlcs.pick(&st.f, st.max_len), None);
    }

    #[test]
    fn test_moms_prefers_short_clauses() {
        // var 1 is everywhere in long clauses, var 4 sits in both binary clauses
        let st = state(
            5,
            &[&[1, 2, 3], &[1, -2, 5], &[1, 3, -5], &[4, 5], &[-4, 2]],
        );
        assert_eq!(st.max_len, 3);
        assert_eq!(Heuristic::Moms.pick(&st.f, st.max_len), Some(lit(4)));
    }

    #[test]
    fn test_moms_all_long() {
        let st = state(3, &[&[1, 2, 3], &[-1, 2, 3], &[1, -2, -3]]);
        // var1: (2+1)(1+1)=6 ; var2: (2+1)(1+1)=6 ; var3 same; first wins
        assert_eq!(Heuristic::Moms.pick(&st.f, st.max_len), Some(lit(1)));
    }

    #[test]
    fn test_moms_balanced_beats_larger_sum() {
        let st = state(
            6,
            &[&[-1, 3], &[-1, 4], &[-1, 5], &[-1, 6], &[2, 3], &[-2, 4], &[-2, 5]],
        );
        // var1: P=0, Q=4 -> 1*5=5 ; var2: P=1, Q=2 -> 2*3=6, negative majority
        assert_eq!(Heuristic::Moms.pick(&st.f, st.max_len), Some(lit(-2)));
        // DLCS goes for the larger sum instead
        assert_eq!(Heuristic::Dlcs.pick(&st.f, st.max_len), Some(lit(-1)));
    }

    #[test]
    fn test_moms_picks_unused_var() {
        let mut st = state(3, &[&[1, 2]]);
        st.apply(lit(1));
        // no unsatisfied clause: every unassigned var scores 1
        assert_eq!(Heuristic::Moms.pick(&st.f, st.max_len), Some(lit(2)));
    }
}
