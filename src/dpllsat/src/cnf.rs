/*****************************************************************************************[cnf.rs]
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
    crate::clause::{display::Print, lbool, Lit, Var},
    std::fmt,
};

/// A formula in conjunctive normal form, as read from the input.
///
/// This is the immutable description the solver is built from; the
/// solver's own clause store lives in `Formula`.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    /// Empty formula over variables `1..=num_vars`.
    pub fn new(num_vars: u32) -> Self {
        Cnf { num_vars, clauses: vec![] }
    }

    pub fn with_capacity(num_vars: u32, num_clauses: usize) -> Self {
        Cnf { num_vars, clauses: Vec::with_capacity(num_clauses) }
    }

    #[inline]
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }
    #[inline]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Add a clause. Every literal must be over a variable in `1..=num_vars`.
    pub fn add_clause(&mut self, lits: &[Lit]) {
        assert!(
            lits.iter().all(|l| l.var().id() <= self.num_vars),
            "clause {:?} mentions a variable above {}",
            lits,
            self.num_vars
        );
        self.clauses.push(lits.to_vec());
    }

    /// Add a clause given as DIMACS integers (without the final `0`).
    pub fn add_clause_dimacs(&mut self, lits: &[i32]) {
        let lits: Vec<Lit> = lits.iter().map(|&i| Lit::from_dimacs(i)).collect();
        self.add_clause(&lits)
    }

    /// Evaluate the formula under `value`.
    ///
    /// Returns `true` if every clause has at least one literal that is
    /// `lbool::TRUE`. Undefined variables make no literal true.
    pub fn eval<F>(&self, value: F) -> bool
    where
        F: Fn(Var) -> lbool,
    {
        self.clauses
            .iter()
            .all(|c| c.iter().any(|&lit| value(lit.var()) ^ !lit.sign() == lbool::TRUE))
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        writeln!(out, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for c in self.clauses.iter() {
            writeln!(out, "{}", c.pp_dimacs())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_eval() {
        let mut cnf = Cnf::new(2);
        cnf.add_clause_dimacs(&[1, 2]);
        cnf.add_clause_dimacs(&[-1, -2]);
        let model = |v: Var| if v.id() == 1 { lbool::TRUE } else { lbool::FALSE };
        assert!(cnf.eval(model));
        assert!(!cnf.eval(|_| lbool::TRUE));
        assert!(!cnf.eval(|_| lbool::UNDEF));
    }

    #[test]
    fn test_display() {
        let mut cnf = Cnf::new(3);
        cnf.add_clause_dimacs(&[1, -3]);
        cnf.add_clause_dimacs(&[2]);
        assert_eq!(format!("{}", cnf), "p cnf 3 2\n1 -3 0\n2 0\n");
    }

    #[test]
    #[should_panic]
    fn test_var_out_of_range() {
        let mut cnf = Cnf::new(2);
        cnf.add_clause_dimacs(&[1, 3]);
    }
}
