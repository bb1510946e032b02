/*****************************************************************************************[sudoku.rs]
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

//! Sudoku as a SAT problem.
//!
//! A 9×9 grid is encoded over 729 variables, one per (row, column, digit),
//! numbered `81(r-1) + 9(c-1) + d` with all three coordinates from 1.
//! The encoding is the extended one: every cell holds exactly one digit,
//! and every digit appears exactly once in each row, column and block.

use crate::{
    clause::{lbool, Lit, Var},
    cnf::Cnf,
    core::{Solver, SolverOpts},
    error::{Error, Result},
    interface::SolverInterface,
};

/// Side of the grid.
pub const DIM: usize = 9;

/// Number of clauses of the encoding of an empty grid.
pub const NUM_CLAUSES: usize = 11988;

/// A grid of digits, indexed `[row][col]` from 0; `0` is a blank cell.
pub type Digits = [[u8; DIM]; DIM];

/// Variable for digit `d` in cell (`r`, `c`), all three from 1.
#[inline]
pub fn var_of(r: usize, c: usize, d: usize) -> Var {
    debug_assert!((1..=DIM).contains(&r) && (1..=DIM).contains(&c) && (1..=DIM).contains(&d));
    Var::from_id((81 * (r - 1) + 9 * (c - 1) + d) as u32)
}

fn pos(r: usize, c: usize, d: usize) -> Lit {
    Lit::new(var_of(r, c, d), true)
}

fn neg(r: usize, c: usize, d: usize) -> Lit {
    Lit::new(var_of(r, c, d), false)
}

/// Encode `grid` as a formula; given cells become unit clauses placed
/// after the `NUM_CLAUSES` clauses of the rules.
pub fn encode(grid: &Digits) -> Result<Cnf> {
    let mut givens = vec![];
    for (r, row) in grid.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            if value as usize > DIM {
                return Err(Error::InvalidCell { row: r + 1, col: c + 1, value });
            } else if value != 0 {
                givens.push(pos(r + 1, c + 1, value as usize));
            }
        }
    }

    let mut cnf = Cnf::with_capacity((DIM * DIM * DIM) as u32, NUM_CLAUSES + givens.len());
    let digits = 1..=DIM;

    // at least one digit per cell
    for r in 1..=DIM {
        for c in 1..=DIM {
            let lits: Vec<Lit> = digits.clone().map(|d| pos(r, c, d)).collect();
            cnf.add_clause(&lits);
        }
    }
    // at most once per column (pairs of rows)
    for c in 1..=DIM {
        for d in 1..=DIM {
            for r in 1..DIM {
                for r2 in r + 1..=DIM {
                    cnf.add_clause(&[neg(r, c, d), neg(r2, c, d)]);
                }
            }
        }
    }
    // at most once per row (pairs of columns)
    for r in 1..=DIM {
        for d in 1..=DIM {
            for c in 1..DIM {
                for c2 in c + 1..=DIM {
                    cnf.add_clause(&[neg(r, c, d), neg(r, c2, d)]);
                }
            }
        }
    }
    // at most once per block
    for d in 1..=DIM {
        for br in 0..3 {
            for bc in 0..3 {
                for x in 1..=3 {
                    for y in 1..=3 {
                        let (r, c) = (3 * br + x, 3 * bc + y);
                        for k in y + 1..=3 {
                            cnf.add_clause(&[neg(r, c, d), neg(r, 3 * bc + k, d)]);
                        }
                        for k in x + 1..=3 {
                            for l in 1..=3 {
                                cnf.add_clause(&[neg(r, c, d), neg(3 * br + k, 3 * bc + l, d)]);
                            }
                        }
                    }
                }
            }
        }
    }
    // at most one digit per cell
    for r in 1..=DIM {
        for c in 1..=DIM {
            for d in 1..DIM {
                for d2 in d + 1..=DIM {
                    cnf.add_clause(&[neg(r, c, d), neg(r, c, d2)]);
                }
            }
        }
    }
    // at least once per column
    for c in 1..=DIM {
        for d in 1..=DIM {
            let lits: Vec<Lit> = (1..=DIM).map(|r| pos(r, c, d)).collect();
            cnf.add_clause(&lits);
        }
    }
    // at least once per row
    for r in 1..=DIM {
        for d in 1..=DIM {
            let lits: Vec<Lit> = (1..=DIM).map(|c| pos(r, c, d)).collect();
            cnf.add_clause(&lits);
        }
    }
    // at least once per block
    for br in 0..3 {
        for bc in 0..3 {
            for d in 1..=DIM {
                let mut lits = Vec::with_capacity(DIM);
                for x in 1..=3 {
                    for y in 1..=3 {
                        lits.push(pos(3 * br + x, 3 * bc + y, d));
                    }
                }
                cnf.add_clause(&lits);
            }
        }
    }
    debug_assert_eq!(cnf.num_clauses(), NUM_CLAUSES);

    for lit in givens {
        cnf.add_clause(&[lit]);
    }
    Ok(cnf)
}

/// A solver for `grid`. Sudoku instances always branch with MOMS.
pub fn solver(grid: &Digits) -> Result<Solver> {
    let cnf = encode(grid)?;
    Ok(Solver::new(&cnf, SolverOpts::moms()))
}

/// Does `grid` have at least one solution?
pub fn is_satisfiable(grid: &Digits) -> Result<bool> {
    let mut s = solver(grid)?;
    Ok(s.solve() == lbool::TRUE)
}

/// Solve `grid` in place.
///
/// Returns `false`, leaving `grid` untouched, if it has no solution.
pub fn solve(grid: &mut Digits) -> Result<bool> {
    let mut s = solver(grid)?;
    if s.solve() != lbool::TRUE {
        return Ok(false);
    }
    for r in 1..=DIM {
        for c in 1..=DIM {
            // exactly one digit per cell holds in any model
            if let Some(d) = (1..=DIM).find(|&d| s.value_var(var_of(r, c, d)) == lbool::TRUE) {
                grid[r - 1][c - 1] = d as u8;
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn digits(s: &str) -> Digits {
        let mut g = [[0; DIM]; DIM];
        for (i, ch) in s.bytes().enumerate() {
            g[i / DIM][i % DIM] = ch - b'0';
        }
        g
    }

    #[test]
    fn test_var_numbering() {
        assert_eq!(var_of(1, 1, 1).id(), 1);
        assert_eq!(var_of(1, 2, 1).id(), 10);
        assert_eq!(var_of(2, 1, 1).id(), 82);
        assert_eq!(var_of(9, 9, 9).id(), 729);
    }

    #[test]
    fn test_encode_size() {
        let cnf = encode(&digits(PUZZLE)).unwrap();
        assert_eq!(cnf.num_vars(), 729);
        let givens = PUZZLE.bytes().filter(|&b| b != b'0').count();
        assert_eq!(cnf.num_clauses(), NUM_CLAUSES + givens);
    }

    #[test]
    fn test_empty_grid() {
        let mut g = [[0; DIM]; DIM];
        assert!(is_satisfiable(&g).unwrap());
        assert!(solve(&mut g).unwrap());
        assert!(g.iter().all(|row| row.iter().all(|&d| d >= 1 && d <= 9)));
        // the solution must satisfy the rules
        let cnf = encode(&g).unwrap();
        let model = |v: Var| {
            let i = v.idx() as usize;
            let (r, c, d) = (i / 81, (i / 9) % 9, i % 9 + 1);
            lbool::new(g[r][c] as usize == d)
        };
        assert!(cnf.eval(model));
    }

    #[test]
    fn test_repeated_digit() {
        let mut g = [[0; DIM]; DIM];
        g[0][0] = 5;
        g[0][7] = 5;
        assert!(!is_satisfiable(&g).unwrap());
        let copy = g;
        assert!(!solve(&mut g).unwrap());
        assert_eq!(g, copy);
    }

    #[test]
    fn test_known_puzzle() {
        let mut g = digits(PUZZLE);
        assert!(solve(&mut g).unwrap());
        assert_eq!(g, digits(SOLUTION));
    }

    #[test]
    fn test_invalid_cell() {
        let mut g = [[0; DIM]; DIM];
        g[3][4] = 12;
        match encode(&g) {
            Err(Error::InvalidCell { row: 4, col: 5, value: 12 }) => (),
            r => panic!("unexpected {:?}", r.map(|c| c.num_clauses())),
        }
    }
}
