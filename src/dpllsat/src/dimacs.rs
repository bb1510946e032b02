/*****************************************************************************************[dimacs.rs]
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
        clause::Lit,
        cnf::Cnf,
        error::{Error, Result},
    },
    std::io::BufRead,
};

/// `parse(input)` reads a DIMACS formula from `input`.
///
/// Anything before the `p cnf <vars> <clauses>` header is skipped. After
/// it, exactly `<clauses>` clauses are read, each a list of signed
/// integers ended by `0`; `c` comment lines may appear between them and
/// whatever follows the last declared clause is ignored.
///
/// ```
/// let mut input = "c example\np cnf 2 2\n1 2 0\n-1 -2 0\n".as_bytes();
/// let cnf = dpllsat::dimacs::parse(&mut input).unwrap();
/// assert_eq!(cnf.num_vars(), 2);
/// assert_eq!(cnf.num_clauses(), 2);
/// ```
pub fn parse<R: BufRead>(input: &mut R) -> Result<Cnf> {
    let mut p = Parser { input, line: 1 };
    let (num_vars, num_clauses) = p.read_header()?;
    debug!("header: {} vars, {} clauses", num_vars, num_clauses);

    // the clause count is not trusted for allocation, a truncated file may lie
    let mut cnf = Cnf::new(num_vars);
    let mut lits = vec![];
    while cnf.num_clauses() < num_clauses {
        p.skip_whitespace()?;
        match p.next_byte()? {
            Some(b'c') => p.skip_line()?,
            Some(_) => {
                p.read_clause(num_vars, &mut lits)?;
                cnf.add_clause(&lits);
            }
            None => {
                return p.error(format!(
                    "unexpected EOF: {} clauses declared, {} read",
                    num_clauses,
                    cnf.num_clauses()
                ))
            }
        }
    }
    Ok(cnf)
}

struct Parser<'a, R> {
    input: &'a mut R,
    /// Current line, from 1.
    line: usize,
}

impl<'a, R: BufRead> Parser<'a, R> {
    fn read_header(&mut self) -> Result<(u32, usize)> {
        loop {
            self.skip_whitespace()?;
            match self.next_byte()? {
                None => return self.error("missing `p cnf` header".to_string()),
                Some(b'p') => {
                    self.consume();
                    self.skip_whitespace()?;
                    if self.read_word()? == "cnf" {
                        break;
                    }
                    // some other kind of `p` line
                    self.skip_line()?
                }
                Some(_) => self.skip_line()?,
            }
        }
        let num_vars = self.parse_int()?;
        let num_clauses = self.parse_int()?;
        if num_vars < 0 || num_clauses < 0 || num_vars > (u32::MAX / 2) as i64 {
            return self.error(format!("invalid header: p cnf {} {}", num_vars, num_clauses));
        }
        Ok((num_vars as u32, num_clauses as usize))
    }

    fn read_clause(&mut self, num_vars: u32, lits: &mut Vec<Lit>) -> Result<()> {
        lits.clear();
        loop {
            let parsed_lit = self.parse_int()?;
            if parsed_lit == 0 {
                return Ok(());
            }
            if parsed_lit.abs() > num_vars as i64 {
                return self.error(format!(
                    "literal {} out of range (max variable is {})",
                    parsed_lit, num_vars
                ));
            }
            lits.push(Lit::from_dimacs(parsed_lit as i32));
        }
    }

    fn read_word(&mut self) -> Result<String> {
        let mut word = String::new();
        while let Some(ch) = self.next_byte()? {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            self.consume();
            word.push(ch as char);
        }
        Ok(word)
    }

    fn parse_int(&mut self) -> Result<i64> {
        self.skip_whitespace()?;
        let ch = self.next_byte()?;
        let neg = if ch == Some(b'+') || ch == Some(b'-') {
            self.consume();
            ch == Some(b'-')
        } else {
            false
        };
        match self.next_byte()? {
            Some(ch) if ch.is_ascii_digit() => (),
            Some(ch) => return self.error(format!("unexpected char: {}", ch as char)),
            None => return self.error("unexpected EOF".to_string()),
        }
        let mut val: i64 = 0;
        while let Some(ch) = self.next_byte()? {
            if !ch.is_ascii_digit() {
                break;
            }
            self.consume();
            val = val * 10 + (ch - b'0') as i64;
            if val > i32::MAX as i64 {
                return self.error("integer too large".to_string());
            }
        }
        Ok(if neg { -val } else { val })
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while is_whitespace(self.next_byte()?) {
            self.consume();
        }
        Ok(())
    }

    fn skip_line(&mut self) -> Result<()> {
        while let Some(ch) = self.next_byte()? {
            self.consume();
            if ch == b'\n' {
                break;
            }
        }
        Ok(())
    }

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    /// Consume the byte returned by the last `next_byte`.
    #[inline]
    fn consume(&mut self) {
        if self.input.fill_buf().ok().and_then(|b| b.first().copied()) == Some(b'\n') {
            self.line += 1;
        }
        self.input.consume(1);
    }

    fn error<T>(&self, msg: String) -> Result<T> {
        Err(Error::MalformedInput { line: self.line, msg })
    }
}

#[inline(always)]
fn is_whitespace(ch: Option<u8>) -> bool {
    ch.map(|ch| (b'\x09'..=b'\x0d').contains(&ch) || ch == b' ')
        .unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_str(s: &str) -> Result<Cnf> {
        parse(&mut s.as_bytes())
    }

    fn line_of(err: Error) -> usize {
        match err {
            Error::MalformedInput { line, .. } => line,
            e => panic!("expected a parse error, got {:?}", e),
        }
    }

    #[test]
    fn test_simple() {
        let cnf = parse_str("p cnf 3 2\n1 -3 0\n2 3 -1 0\n").unwrap();
        assert_eq!(cnf.num_vars(), 3);
        assert_eq!(cnf.clauses()[0], vec![Lit::from_dimacs(1), Lit::from_dimacs(-3)]);
        assert_eq!(cnf.clauses()[1].len(), 3);
    }

    #[test]
    fn test_skips_preamble_and_comments() {
        let input = "c made by hand\nsome junk\n\np cnf 2 2\nc first\n1 2 0\nc second\n-1 0\n";
        let cnf = parse_str(input).unwrap();
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(format!("{}", cnf), "p cnf 2 2\n1 2 0\n-1 0\n");
    }

    #[test]
    fn test_clause_across_lines() {
        let cnf = parse_str("p cnf 3 1\n1\n 2\t-3\n0").unwrap();
        assert_eq!(cnf.clauses()[0].len(), 3);
    }

    #[test]
    fn test_extra_clauses_ignored() {
        let cnf = parse_str("p cnf 2 1\n1 2 0\n-1 0\nnot even a clause").unwrap();
        assert_eq!(cnf.num_clauses(), 1);
    }

    #[test]
    fn test_empty_clause() {
        let cnf = parse_str("p cnf 1 2\n0\n1 0\n").unwrap();
        assert!(cnf.clauses()[0].is_empty());
    }

    #[test]
    fn test_missing_header() {
        let err = parse_str("c nothing here\n1 2 0\n").unwrap_err();
        line_of(err);
    }

    #[test]
    fn test_truncated() {
        let err = parse_str("p cnf 2 3\n1 2 0\n-1 0\n").unwrap_err();
        assert_eq!(line_of(err), 4);
    }

    #[test]
    fn test_huge_clause_count_truncated() {
        let err = parse_str("p cnf 1 2000000000\n1 0\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_out_of_range() {
        let err = parse_str("p cnf 2 2\n1 2 0\n-1 3 0\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_bad_token() {
        let err = parse_str("p cnf 2 1\n1 x 0\n").unwrap_err();
        assert_eq!(line_of(err), 2);
    }

    #[test]
    fn test_unterminated_clause() {
        assert!(parse_str("p cnf 2 1\n1 2").is_err());
    }
}
