/*****************************************************************************************[trail.rs]
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

use crate::{clause::Lit, propagate::SearchState};

/// One decision and the unit literals it implied.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    lit: Lit,
    /// Second polarity of this variable: discarded, not flipped, on conflict.
    forced: bool,
    /// Literals propagated after the decision, in application order.
    implied: Vec<Lit>,
}

/// Stack of decision frames.
#[derive(Debug, Clone, Default)]
pub(crate) struct Trail {
    frames: Vec<Frame>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Open a frame for the decision `lit`.
    ///
    /// `forced` is set when `lit` is the flip of a decision that already
    /// failed, i.e. both polarities are now being tried.
    pub(crate) fn push_decision(&mut self, lit: Lit, forced: bool) {
        trace!("decision {:?} (forced: {}) at depth {}", lit, forced, self.frames.len());
        self.frames.push(Frame { lit, forced, implied: vec![] });
    }

    /// Record a literal propagated under the current decision.
    pub(crate) fn push_implied(&mut self, lit: Lit) {
        debug_assert!(!self.frames.is_empty(), "propagation outside of a decision");
        if let Some(top) = self.frames.last_mut() {
            top.implied.push(lit);
        }
    }

    /// Undo frames until one can be flipped.
    ///
    /// Each frame is undone in reverse order: implied literals from the most
    /// recent one, then the decision. A free frame is popped and its negated
    /// decision returned; forced frames are discarded and the search moves
    /// to the frame below. Returns `None` once the trail is empty, meaning
    /// every branch has been refuted.
    pub(crate) fn backtrack(&mut self, st: &mut SearchState) -> Option<Lit> {
        while let Some(frame) = self.frames.pop() {
            for &lit in frame.implied.iter().rev() {
                st.undo(lit);
            }
            st.undo(frame.lit);
            if !frame.forced {
                trace!("backtrack: flip {:?} at depth {}", frame.lit, self.frames.len());
                return Some(!frame.lit);
            }
        }
        trace!("backtrack: trail exhausted");
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{clause::lbool, cnf::Cnf};

    fn lit(i: i32) -> Lit {
        Lit::from_dimacs(i)
    }

    fn state(n: u32, clauses: &[&[i32]]) -> SearchState {
        let mut cnf = Cnf::new(n);
        for c in clauses {
            cnf.add_clause_dimacs(c);
        }
        SearchState::new(&cnf)
    }

    #[test]
    fn test_backtrack_flips_free_frame() {
        let mut st = state(3, &[&[1, 2, 3], &[-1, 2], &[-2, 3, 1]]);
        let mut trail = Trail::new();

        st.apply(lit(1));
        trail.push_decision(lit(1), false);
        let unit = st.units.pop().unwrap();
        assert_eq!(unit, lit(2));
        st.apply(unit);
        trail.push_implied(unit);

        assert_eq!(trail.backtrack(&mut st), Some(lit(-1)));
        assert!(trail.is_empty());
        assert!(st.f.value(lit(1).var()).is_undef());
        assert!(st.f.value(lit(2).var()).is_undef());
        assert_eq!(st.f.num_unsat(), 3);
    }

    #[test]
    fn test_backtrack_discards_forced_frames() {
        let mut st = state(3, &[&[1, 2, 3], &[-1, -2, -3]]);
        let mut trail = Trail::new();

        st.apply(lit(1));
        trail.push_decision(lit(1), false);
        st.apply(lit(-2));
        trail.push_decision(lit(-2), true);
        st.apply(lit(3));
        trail.push_decision(lit(3), true);
        assert_eq!(trail.len(), 3);

        // both forced frames go, the free one is flipped
        assert_eq!(trail.backtrack(&mut st), Some(lit(-1)));
        assert!(trail.is_empty());
        for v in st.f.iter_vars() {
            assert_eq!(st.f.value(v), lbool::UNDEF);
        }

        st.apply(lit(-1));
        trail.push_decision(lit(-1), true);
        assert_eq!(trail.backtrack(&mut st), None);
        assert!(trail.is_empty());
        assert_eq!(st.f.num_unsat(), 2);
    }
}
