/*****************************************************************************************[core.rs]
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
        clause::{lbool, Lit, Var},
        cnf::Cnf,
        dimacs,
        error::Result,
        formula::Formula,
        heuristic::Heuristic,
        interface::SolverInterface,
        propagate::{SearchState, Step},
        trail::Trail,
    },
    std::{
        fmt,
        io::BufRead,
        time::{Duration, Instant},
    },
};

/// The main solver structure
///
/// A `Solver` owns its formula, the search state and the trail of
/// decisions. It runs a single, synchronous DPLL search: there is no
/// interruption and no shared state, so independent solvers can run on
/// as many threads as needed.
#[derive(Debug, Clone)]
pub struct Solver {
    opts: SolverOpts,
    v: SearchState,
    trail: Trail,
    /// `UNDEF` until `solve` returns.
    result: lbool,
    /// Time spent in the one search that produced `result`.
    solve_time: Duration,

    // Statistics
    decisions: u64,
    conflicts: u64,
}

/// Result of a timed solve, printable in the solver's report format:
///
/// ```text
/// s 1
/// v 1 -2 [3]
/// t 0.042
/// ```
///
/// `[3]` marks a variable that was never assigned: any value works.
#[derive(Debug, Clone)]
pub struct Report {
    pub satisfiable: bool,
    pub model: Vec<lbool>,
    pub elapsed: Duration,
}

impl Report {
    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs() as f64 * 1e3 + self.elapsed.subsec_nanos() as f64 * 1e-6
    }
}

impl fmt::Display for Report {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        writeln!(out, "s {}", self.satisfiable as u8)?;
        if self.satisfiable {
            write!(out, "v")?;
            for (i, &val) in self.model.iter().enumerate() {
                let id = i + 1;
                if val == lbool::TRUE {
                    write!(out, " {}", id)?
                } else if val == lbool::FALSE {
                    write!(out, " -{}", id)?
                } else {
                    write!(out, " [{}]", id)?
                }
            }
            writeln!(out)?;
        }
        writeln!(out, "t {:.3}", self.elapsed_ms())
    }
}

// public API
impl SolverInterface for Solver {
    fn num_vars(&self) -> u32 {
        self.v.f.num_vars()
    }
    fn num_clauses(&self) -> u64 {
        self.v.f.num_clauses() as u64
    }
    fn num_conflicts(&self) -> u64 {
        self.conflicts
    }
    fn num_propagations(&self) -> u64 {
        self.v.propagations
    }
    fn num_decisions(&self) -> u64 {
        self.decisions
    }

    fn print_stats(&self) {
        println!("c heuristic             : {}", self.opts.heuristic);
        println!("c decisions             : {:<12}", self.decisions);
        println!("c conflicts             : {:<12}", self.conflicts);
        println!("c propagations          : {:<12}", self.v.propagations);
    }

    fn solve(&mut self) -> lbool {
        if self.result.is_undef() {
            let start = Instant::now();
            self.result = self.solve_internal();
            self.solve_time = start.elapsed();
            debug!(
                "result {:?} ({} decisions, {} conflicts, {} propagations)",
                self.result, self.decisions, self.conflicts, self.v.propagations
            );
        }
        self.result
    }

    fn result(&self) -> lbool {
        self.result
    }

    fn value_var(&self, v: Var) -> lbool {
        self.v.f.value(v)
    }
}

impl Solver {
    /// Create a new solver for `cnf`.
    pub fn new(cnf: &Cnf, opts: SolverOpts) -> Self {
        Self {
            opts,
            v: SearchState::new(cnf),
            trail: Trail::new(),
            result: lbool::UNDEF,
            solve_time: Duration::default(),
            decisions: 0,
            conflicts: 0,
        }
    }

    /// Parse a DIMACS formula from `input` and create a solver for it.
    pub fn from_dimacs<R: BufRead>(input: &mut R, opts: SolverOpts) -> Result<Self> {
        let cnf = dimacs::parse(input)?;
        Ok(Solver::new(&cnf, opts))
    }

    pub fn heuristic(&self) -> Heuristic {
        self.opts.heuristic
    }

    /// The clause store, in its current state.
    pub fn formula(&self) -> &Formula {
        &self.v.f
    }

    /// Number of open decision frames.
    pub fn trail_depth(&self) -> usize {
        self.trail.len()
    }

    /// Solve, if not done yet, and report the result.
    ///
    /// The elapsed time is the one of the search itself, even when the
    /// result was already known.
    pub fn report(&mut self) -> Report {
        let res = self.solve();
        Report {
            satisfiable: res == lbool::TRUE,
            model: self.get_model(),
            elapsed: self.solve_time,
        }
    }

    fn solve_internal(&mut self) -> lbool {
        match self.v.preprocess() {
            Step::Satisfied => return lbool::TRUE,
            Step::Unsatisfied => return lbool::FALSE,
            _ => (),
        }

        let mut next = Lit::UNDEF;
        loop {
            if self.v.conflict {
                // second polarity of the decision that just failed
                self.v.conflict = false;
                self.v.apply(next);
                self.trail.push_decision(next, true);
            } else {
                match self.opts.heuristic.pick(&self.v.f, self.v.max_len) {
                    Some(lit) => {
                        self.decisions += 1;
                        next = lit;
                        self.v.apply(next);
                        self.trail.push_decision(next, false);
                    }
                    None => {
                        // clauses remain but none can be helped by a decision
                        self.v.conflict = true;
                    }
                }
            }

            match self.check_with_backtracking(&mut next) {
                Step::BacktrackingDone => continue,
                Step::Satisfied => return lbool::TRUE,
                Step::Unsatisfied => return lbool::FALSE,
                Step::Continued => (),
            }

            // unit propagation, checking after every single literal
            while let Some(lit) = self.v.units.pop() {
                self.v.apply(lit);
                self.trail.push_implied(lit);
                match self.check_with_backtracking(&mut next) {
                    Step::BacktrackingDone => break,
                    Step::Satisfied => return lbool::TRUE,
                    Step::Unsatisfied => return lbool::FALSE,
                    Step::Continued => (),
                }
            }
        }
    }

    /// Check the state after an assignment and repair a conflict.
    ///
    /// On conflict, the unit queue is dropped and the trail backtracked;
    /// `next` receives the flipped decision, which the main loop applies
    /// while the conflict flag is still set.
    fn check_with_backtracking(&mut self, next: &mut Lit) -> Step {
        match self.v.status() {
            Step::Unsatisfied => {
                self.conflicts += 1;
                self.v.units.clear();
                match self.trail.backtrack(&mut self.v) {
                    Some(lit) => {
                        *next = lit;
                        Step::BacktrackingDone
                    }
                    None => {
                        debug_assert!(self.trail.is_empty());
                        Step::Unsatisfied
                    }
                }
            }
            res => res,
        }
    }
}

/// Solver options.
///
/// The only option is the branching heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOpts {
    pub heuristic: Heuristic,
}

impl SolverOpts {
    pub fn dlcs() -> Self {
        SolverOpts { heuristic: Heuristic::Dlcs }
    }

    pub fn moms() -> Self {
        SolverOpts { heuristic: Heuristic::Moms }
    }

    /// `false` selects DLCS, `true` selects MOMS.
    pub fn from_flag(moms: bool) -> Self {
        SolverOpts { heuristic: Heuristic::from_flag(moms) }
    }
}
