//! Representation of sudoku grids.

use dpllsat::sudoku::Digits;

/// Dimension of the grid
pub use dpllsat::sudoku::DIM;

pub type CellValue = u8;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Cell {
    Empty,
    Full(CellValue),
}

/// A sudoku grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; DIM]; DIM],
}

/// A position in the grid, `(row, column)` from 0.
pub type Position = (u8, u8);

impl std::cmp::PartialEq<u8> for Cell {
    fn eq(&self, x: &u8) -> bool {
        match self {
            Cell::Full(n) => n == x,
            Cell::Empty => false,
        }
    }
}

impl Cell {
    /// Is the cell empty?
    #[inline(always)]
    pub fn empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline(always)]
    pub fn full(&self) -> bool {
        !self.empty()
    }

    fn digit(&self) -> u8 {
        match *self {
            Cell::Empty => 0,
            Cell::Full(n) => n,
        }
    }

    fn from_digit(d: u8) -> Self {
        if d == 0 {
            Cell::Empty
        } else {
            Cell::Full(d)
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid { cells: [[Cell::Empty; DIM]; DIM] }
    }
}

impl Grid {
    /// Grid from the solver's representation, where `0` is a blank.
    pub fn from_digits(digits: &Digits) -> Self {
        let mut g = Grid::default();
        for (i, row) in digits.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                g.cells[i][j] = Cell::from_digit(d);
            }
        }
        g
    }

    pub fn to_digits(&self) -> Digits {
        let mut digits = [[0; DIM]; DIM];
        for (c, (i, j)) in self.iter() {
            digits[i as usize][j as usize] = c.digit();
        }
        digits
    }

    /// Parse 81 characters, `.` or `0` for blanks and `1-9` for digits.
    pub fn from_line(line: &[u8]) -> std::result::Result<Self, String> {
        if line.len() != DIM * DIM {
            return Err(format!("expected {} cells, got {}", DIM * DIM, line.len()));
        }
        let mut g = Grid::default();
        for (idx, &c) in line.iter().enumerate() {
            let cell = match c {
                b'0' | b'.' => Cell::Empty,
                b'1'..=b'9' => Cell::Full(c - b'0'),
                _ => return Err(format!("unknown cell {:?}", c as char)),
            };
            g.cells[idx / DIM][idx % DIM] = cell;
        }
        Ok(g)
    }

    /// The grid as 81 digits, `0` for blanks.
    pub fn to_line(&self) -> String {
        self.iter_cells().map(|c| (c.digit() + b'0') as char).collect()
    }

    /// Iterate over all cells.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }

    /// Iterate over all cells, with their position.
    pub fn iter(&self) -> impl Iterator<Item = (&Cell, Position)> {
        self.cells.iter().enumerate().flat_map(move |(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, c)| (c, (i as u8, j as u8)))
        })
    }

    /// All cells are full?
    pub fn full(&self) -> bool {
        self.iter_cells().all(|c| c.full())
    }

    /// Number of full cells.
    pub fn num_givens(&self) -> usize {
        self.iter_cells().filter(|c| c.full()).count()
    }

    /// Can `d` be written at `p` without repeating a digit of its row,
    /// column or block? The current content of `p` is ignored.
    pub fn can_place(&self, p: Position, d: CellValue) -> bool {
        let (i, j) = p;
        let (bi, bj) = (3 * (i / 3), 3 * (j / 3));
        (0..DIM as u8).all(|k| {
            (k == j || self[(i, k)] != d)
                && (k == i || self[(k, j)] != d)
                && ((bi + k / 3, bj + k % 3) == p || self[(bi + k / 3, bj + k % 3)] != d)
        })
    }

    /// Make a string representing the grid.
    pub fn render(&self) -> String {
        let mut s = String::new();
        for _i in 0..11 {
            s.push('-');
        }
        s.push('\n');
        for row in self.cells.iter() {
            s.push('|');
            for &c in row.iter() {
                s.push(match c {
                    Cell::Empty => '.',
                    Cell::Full(n) => (n + b'0') as char,
                });
            }
            s.push('|');
            s.push('\n');
        }
        for _i in 0..11 {
            s.push('-');
        }
        s.push('\n');
        s
    }

    /// Iterate over distinct pairs of `(position,cell)` that belong in the same square.
    pub fn iter_square_pairs(
        &self,
    ) -> impl Iterator<Item = ((Position, &Cell), (Position, &Cell))> {
        IterSq {
            grid: self,
            line: 0,
            col: 0,
            i: 0,
            j: 1,
        }
    }

    /// No digit appears twice in a row, a column or a square.
    /// Empty cells are ignored.
    pub fn is_correct(&self) -> bool {
        let clash = |c1: &Cell, c2: &Cell| c1.full() && c1 == c2;

        for row in self.cells.iter() {
            for i in 0..DIM {
                for j in i + 1..DIM {
                    if clash(&row[i], &row[j]) {
                        return false;
                    }
                }
            }
        }

        for col in 0..DIM as u8 {
            for i in 0..DIM as u8 {
                for j in i + 1..DIM as u8 {
                    if clash(&self[(i, col)], &self[(j, col)]) {
                        return false;
                    }
                }
            }
        }

        !self
            .iter_square_pairs()
            .any(|((_, c1), (_, c2))| clash(c1, c2))
    }

    /// Is `self` obtained from `sol` by blanking some cells?
    pub fn extends_to(&self, sol: &Grid) -> bool {
        self.iter().all(|(c, p)| c.empty() || *c == sol[p])
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;
    #[inline(always)]
    fn index(&self, p: Position) -> &Self::Output {
        &self.cells[p.0 as usize][p.1 as usize]
    }
}

impl std::ops::IndexMut<Position> for Grid {
    #[inline(always)]
    fn index_mut(&mut self, p: Position) -> &mut Self::Output {
        &mut self.cells[p.0 as usize][p.1 as usize]
    }
}

// iterator over squares.
// invariant: i<j
struct IterSq<'a> {
    grid: &'a Grid,
    line: u8,
    col: u8,
    i: u8,
    j: u8,
}

impl<'a> Iterator for IterSq<'a> {
    type Item = ((Position, &'a Cell), (Position, &'a Cell));
    fn next(&mut self) -> Option<Self::Item> {
        if self.j == 9 {
            self.i += 1;
            self.j = self.i + 1;
        }
        if self.i >= 8 {
            self.j = 1;
            self.i = 0;
            self.col += 1;
        }
        if self.col == 3 {
            self.line += 1;
            self.col = 0;
        }
        if self.line == 3 {
            return None;
        }

        let pos1 = (3 * self.line + self.i / 3, 3 * self.col + self.i % 3);
        let pos2 = (3 * self.line + self.j / 3, 3 * self.col + self.j % 3);
        self.j += 1;

        Some(((pos1, &self.grid[pos1]), (pos2, &self.grid[pos2])))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SOLVED: &[u8] =
        b"534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_line() {
        let g = Grid::from_line(SOLVED).unwrap();
        assert!(g.full());
        assert!(g.is_correct());
        assert_eq!(g.to_line().as_bytes(), SOLVED);
        assert_eq!(g[(0, 0)], Cell::Full(5));
        assert_eq!(Grid::from_digits(&g.to_digits()), g);
    }

    #[test]
    fn test_blanks() {
        let line = b"5.0".iter().chain([b'.'; 78].iter()).copied().collect::<Vec<u8>>();
        let g = Grid::from_line(&line).unwrap();
        assert_eq!(g.num_givens(), 1);
        assert!(!g.full());
        assert!(g.is_correct());
        assert!(g.to_line().starts_with("500000"));
    }

    #[test]
    fn test_bad_lines() {
        assert!(Grid::from_line(b"123").is_err());
        let mut line = SOLVED.to_vec();
        line[40] = b'x';
        assert!(Grid::from_line(&line).is_err());
    }

    #[test]
    fn test_square_clash() {
        let mut g = Grid::default();
        g[(0, 0)] = Cell::Full(4);
        g[(2, 2)] = Cell::Full(4);
        assert!(!g.is_correct());
        assert!(!g.can_place((1, 1), 4));
        assert!(g.can_place((1, 1), 5));
        g[(2, 2)] = Cell::Empty;
        // the cell itself does not count
        assert!(g.can_place((0, 0), 4));
        assert!(!g.can_place((0, 8), 4));
        assert!(!g.can_place((8, 0), 4));
    }

    #[test]
    fn test_iter_square_pairs() {
        let g = Grid::default();
        // 9 squares, 36 pairs each
        assert_eq!(g.iter_square_pairs().count(), 9 * 36);
    }

    #[test]
    fn test_extends_to() {
        let sol = Grid::from_line(SOLVED).unwrap();
        let mut puzzle = sol.clone();
        puzzle[(4, 4)] = Cell::Empty;
        assert!(puzzle.extends_to(&sol));
        puzzle[(4, 4)] = Cell::Full(1);
        assert!(!puzzle.extends_to(&sol));
    }
}
