//! Sudoku parser.
//!
//! A sudoku is represented by 81 characters, either `.`, `0` or a `1-9` integer.
//! Lines starting with `#` are comments.

use {
    crate::{Grid, Result},
    std::io::{BufRead, BufReader, Read},
};

/// Parse grids from the given reader.
pub fn parse<R: Read>(r: R) -> Result<Vec<Grid>> {
    let r = BufReader::new(r);
    let mut res = vec![];

    for (n, line) in r.lines().enumerate() {
        let line = line?;
        let line = line.trim().as_bytes();
        if line.is_empty() || line[0] == b'#' {
            continue;
        } else if line.len() < 81 {
            return Err(format!("line {}: cannot parse grid, too short", n + 1).into());
        }

        // ignore the end of the line
        let grid = Grid::from_line(&line[..81]).map_err(|e| format!("line {}: {}", n + 1, e))?;
        res.push(grid)
    }

    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let input = "# two grids\n\
            53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79\n\
            \n\
            000000010400000000020000000000050407008000300001090000300400200050100000000806000 extra\n";
        let grids = parse(input.as_bytes()).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].num_givens(), 30);
        assert_eq!(grids[1].num_givens(), 17);
    }

    #[test]
    fn test_too_short() {
        let err = parse("1234\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_bad_char() {
        let line = format!("{}x\n", ".".repeat(80));
        assert!(parse(line.as_bytes()).is_err());
    }
}
