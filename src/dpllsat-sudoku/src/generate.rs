//! Sudoku generator.
//!
//! A full grid is first obtained by the Las Vegas method: a few digits are
//! scattered at random and the SAT solver is asked to complete the grid,
//! starting over when it can't. Holes are then dug top to bottom, left to
//! right, keeping only the removals after which the solution stays unique.

use {
    crate::{
        grid::{Cell, Grid, Position, DIM},
        Result,
    },
    dpllsat::sudoku,
    rand::{rngs::StdRng, Rng, SeedableRng},
};

/// Digits placed at random before completing the grid.
pub const LAS_VEGAS_CELLS: usize = 11;

/// Smallest number of givens a sudoku with a unique solution can have.
pub const MIN_GIVENS: usize = 17;

/// A generated puzzle and its unique solution.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Generator seeded with `seed`, or from the OS if `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Generator { rng }
    }

    /// Generate a puzzle with `givens` full cells, or as close to it as
    /// digging allows.
    pub fn generate(&mut self, givens: usize) -> Result<Puzzle> {
        if givens < MIN_GIVENS || givens > DIM * DIM {
            return Err(format!("givens must be in {}..={}, not {}", MIN_GIVENS, DIM * DIM, givens).into());
        }
        let solution = self.full_grid()?;
        let puzzle = dig(&solution, givens)?;
        Ok(Puzzle { puzzle, solution })
    }

    /// A random full correct grid.
    pub fn full_grid(&mut self) -> Result<Grid> {
        let mut tries = 1;
        loop {
            if let Some(g) = self.las_vegas(LAS_VEGAS_CELLS)? {
                debug!("full grid after {} tries", tries);
                return Ok(g);
            }
            tries += 1;
        }
    }

    /// Place `n` random digits, then complete the grid with the solver.
    ///
    /// Returns `None` if the random digits admit no completion.
    pub fn las_vegas(&mut self, n: usize) -> Result<Option<Grid>> {
        let mut g = Grid::default();
        let mut placed = 0;
        while placed < n {
            let p: Position = (self.rng.random_range(0..DIM as u8), self.rng.random_range(0..DIM as u8));
            let d = self.rng.random_range(1..=DIM as u8);
            if g[p].empty() && g.can_place(p, d) {
                g[p] = Cell::Full(d);
                placed += 1;
            }
        }

        let mut digits = g.to_digits();
        if sudoku::solve(&mut digits)? {
            Ok(Some(Grid::from_digits(&digits)))
        } else {
            Ok(None)
        }
    }
}

/// Blank cells of `solution` until `givens` remain or no cell can be
/// removed without making the solution ambiguous.
pub fn dig(solution: &Grid, givens: usize) -> Result<Grid> {
    let mut puzzle = solution.clone();
    let mut to_dig = (DIM * DIM).saturating_sub(givens);
    for i in 0..DIM as u8 {
        for j in 0..DIM as u8 {
            if to_dig == 0 {
                return Ok(puzzle);
            }
            if is_unique_without(&puzzle, (i, j))? {
                puzzle[(i, j)] = Cell::Empty;
                to_dig -= 1;
            }
        }
    }
    if to_dig > 0 {
        info!("could only reach {} givens", puzzle.num_givens());
    }
    Ok(puzzle)
}

/// Would `puzzle` still have a single solution if cell `p` were blank?
fn is_unique_without(puzzle: &Grid, p: Position) -> Result<bool> {
    let current = match puzzle[p] {
        Cell::Full(d) => d,
        Cell::Empty => return Ok(true),
    };
    let mut tmp = puzzle.clone();
    for d in 1..=DIM as u8 {
        if d == current || !tmp.can_place(p, d) {
            continue;
        }
        tmp[p] = Cell::Full(d);
        if sudoku::is_satisfiable(&tmp.to_digits())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Number of solutions of `g`, counting at most up to `limit`.
#[cfg(test)]
fn count_solutions(g: &mut Grid, limit: usize) -> usize {
    let p = match g.iter().find(|(c, _)| c.empty()) {
        None => return 1,
        Some((_, p)) => p,
    };
    let mut n = 0;
    for d in 1..=DIM as u8 {
        if n >= limit {
            break;
        }
        if g.can_place(p, d) {
            g[p] = Cell::Full(d);
            n += count_solutions(g, limit - n);
            g[p] = Cell::Empty;
        }
    }
    n
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_grid() {
        let mut gen = Generator::new(Some(1));
        let g = gen.full_grid().unwrap();
        assert!(g.full());
        assert!(g.is_correct());
    }

    #[test]
    fn test_seed_reproducible() {
        let g1 = Generator::new(Some(17)).full_grid().unwrap();
        let g2 = Generator::new(Some(17)).full_grid().unwrap();
        assert_eq!(g1, g2);
    }

    #[test]
    fn test_generate_unique() {
        let mut gen = Generator::new(Some(42));
        let Puzzle { puzzle, solution } = gen.generate(40).unwrap();
        assert_eq!(puzzle.num_givens(), 40);
        assert!(solution.full() && solution.is_correct());
        assert!(puzzle.extends_to(&solution));
        let mut tmp = puzzle.clone();
        assert_eq!(count_solutions(&mut tmp, 2), 1);
    }

    #[test]
    fn test_dig_nothing() {
        let sol = Generator::new(Some(3)).full_grid().unwrap();
        assert_eq!(dig(&sol, 81).unwrap(), sol);
    }

    #[test]
    fn test_givens_out_of_range() {
        let mut gen = Generator::new(Some(0));
        assert!(gen.generate(16).is_err());
        assert!(gen.generate(82).is_err());
    }
}
