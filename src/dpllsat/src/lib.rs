/*****************************************************************************************[lib.rs]
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

//! A DPLL SAT solver.
//!
//! The engine decides satisfiability of a CNF formula by unit propagation
//! and chronological backtracking over a trail of decisions, choosing
//! branching literals with DLCS or MOMS. It also ships a DIMACS reader and
//! a Sudoku encoding.
//!
//! ```
//! use dpllsat::{Cnf, Solver, SolverInterface, SolverOpts, lbool};
//!
//! let mut cnf = Cnf::new(2);
//! cnf.add_clause_dimacs(&[1, 2]);
//! cnf.add_clause_dimacs(&[-1, -2]);
//! let mut solver = Solver::new(&cnf, SolverOpts::default());
//! assert_eq!(solver.solve(), lbool::TRUE);
//! assert!(cnf.eval(|v| solver.value_var(v)));
//! ```

//======== LOG ============

// stubs when logging is not enabled
#[cfg(not(feature = "logging"))]
#[macro_use]
pub(crate) mod log {
    macro_rules! trace {
        ($( $x:expr ),*) => {};
    }
    macro_rules! debug {
        ($( $x:expr ),*) => {};
    }
    macro_rules! info {
        ($( $x:expr ),*) => {};
    }
}

#[cfg(feature = "logging")]
#[macro_use]
pub extern crate log;

//======== PUBLIC INTERFACE ============

pub mod clause;
pub mod cnf;
pub mod core;
pub mod dimacs;
pub mod error;
pub mod formula;
pub mod heuristic;
pub mod interface;
pub mod intmap;
pub mod sudoku;

mod propagate;
mod trail;

pub use crate::{
    clause::{display::Print, lbool, Lit, Var},
    cnf::Cnf,
    core::{Report, Solver, SolverOpts},
    error::{Error, Result},
    formula::Formula,
    heuristic::Heuristic,
    interface::SolverInterface,
};
