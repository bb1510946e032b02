/*****************************************************************************************[interface.rs]
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

/* Main Interface */

use crate::clause::{lbool, Lit, Var};

/// Main interface for a solver: statistics, solving, and model queries.
pub trait SolverInterface {
    fn num_vars(&self) -> u32;
    fn num_clauses(&self) -> u64;
    fn num_conflicts(&self) -> u64;
    fn num_propagations(&self) -> u64;
    fn num_decisions(&self) -> u64;

    /// Print some current statistics to standard output.
    fn print_stats(&self);

    /// Decide satisfiability of the formula.
    ///
    /// Returns `lbool::TRUE` or `lbool::FALSE`; never `lbool::UNDEF`.
    /// Calling it again returns the same answer without searching.
    fn solve(&mut self) -> lbool;

    /// Result of the last call to `solve`, `lbool::UNDEF` if it was not called.
    fn result(&self) -> lbool;

    /// Query the model for a variable.
    ///
    /// Precondition: last result was `lbool::TRUE`. A variable the search
    /// never had to assign is `lbool::UNDEF`; either value satisfies the formula.
    fn value_var(&self, v: Var) -> lbool;

    /// Query the model for a literal.
    fn value_lit(&self, lit: Lit) -> lbool {
        self.value_var(lit.var()) ^ !lit.sign()
    }

    /// Query the whole model, indexed by `Var::idx`.
    fn get_model(&self) -> Vec<lbool> {
        (0..self.num_vars())
            .map(|i| self.value_var(Var::from_idx(i)))
            .collect()
    }
}
