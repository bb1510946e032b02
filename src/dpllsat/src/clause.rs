/*****************************************************************************************[clause.rs]
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
    crate::intmap::AsIndex,
    std::{fmt, ops},
};

/// A boolean variable, numbered from 0 internally and from 1 in DIMACS.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var(u32);

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Var {
    #[inline(always)]
    pub fn from_idx(idx: u32) -> Self {
        debug_assert!(idx < u32::MAX / 2, "Var::from_idx: index too large");
        Var(idx)
    }

    /// Variable with the given DIMACS id (`1..=N`).
    #[inline]
    pub fn from_id(id: u32) -> Self {
        debug_assert!(id > 0, "Var::from_id: ids start at 1");
        Var::from_idx(id - 1)
    }

    #[inline(always)]
    pub fn idx(&self) -> u32 {
        self.0
    }

    /// DIMACS id of the variable.
    #[inline(always)]
    pub fn id(&self) -> u32 {
        self.0 + 1
    }
}

impl AsIndex for Var {
    fn as_index(self) -> usize {
        self.0 as usize
    }
    fn from_index(index: usize) -> Self {
        Var(index as u32)
    }
}

/// A literal: a variable and a polarity.
///
/// Encoded as `2 * var + (negated as u32)`, so both literals of a variable
/// are adjacent and `!lit` is a single xor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit(u32);

impl Lit {
    pub const UNDEF: Lit = Lit(!1);

    #[inline(always)]
    pub fn new(var: Var, sign: bool) -> Self {
        Lit(var.0 * 2 + (!sign) as u32)
    }

    /// Literal from its DIMACS form: `3` is variable 3, `-3` its negation.
    ///
    /// ```
    /// use dpllsat::Lit;
    /// let lit = Lit::from_dimacs(-3);
    /// assert!(!lit.sign());
    /// assert_eq!(lit.var().id(), 3);
    /// assert_eq!(lit.to_dimacs(), -3);
    /// assert_eq!(!lit, Lit::from_dimacs(3));
    /// ```
    #[inline]
    pub fn from_dimacs(i: i32) -> Self {
        debug_assert_ne!(i, 0, "0 is not a literal");
        Lit::new(Var::from_id(i.unsigned_abs()), i > 0)
    }

    #[inline]
    pub fn to_dimacs(&self) -> i32 {
        let id = self.var().id() as i32;
        if self.sign() {
            id
        } else {
            -id
        }
    }

    #[inline(always)]
    pub fn idx(&self) -> u32 {
        self.0
    }
    /// `true` for a positive literal.
    #[inline(always)]
    pub fn sign(&self) -> bool {
        (self.0 & 1) == 0
    }
    #[inline(always)]
    pub fn var(&self) -> Var {
        Var(self.0 >> 1)
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == Lit::UNDEF {
            write!(f, "UNDEF")
        } else {
            write!(f, "{}", self.to_dimacs())
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl ops::Not for Lit {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Lit(self.0 ^ 1)
    }
}

impl AsIndex for Lit {
    #[inline(always)]
    fn as_index(self) -> usize {
        self.0 as usize
    }
    #[inline(always)]
    fn from_index(index: usize) -> Self {
        Lit(index as u32)
    }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, PartialEq, Eq)]
/// A ternary boolean (true, false, undefined), the status of a variable.
pub struct lbool(u8);

impl fmt::Debug for lbool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            0 => write!(f, "TRUE"),
            1 => write!(f, "FALSE"),
            _ => write!(f, "UNDEF"),
        }
    }
}

impl Default for lbool {
    fn default() -> Self {
        lbool::UNDEF
    }
}

impl lbool {
    pub const TRUE: lbool = lbool(0);
    pub const FALSE: lbool = lbool(1);
    pub const UNDEF: lbool = lbool(2);

    #[inline(always)]
    pub fn new(v: bool) -> Self {
        lbool((!v) as u8)
    }
    #[inline(always)]
    pub fn is_undef(&self) -> bool {
        self.0 == 2
    }
}

impl ops::Neg for lbool {
    type Output = lbool;

    /// Negation of a `lbool`; `UNDEF` stays `UNDEF`.
    fn neg(self) -> Self {
        if self.is_undef() {
            self
        } else {
            lbool(self.0 ^ 1)
        }
    }
}

impl ops::BitXor<bool> for lbool {
    type Output = lbool;

    /// Flip a defined value if `rhs` is true.
    fn bitxor(self, rhs: bool) -> Self {
        if rhs {
            -self
        } else {
            self
        }
    }
}

impl From<bool> for lbool {
    fn from(x: bool) -> Self {
        lbool::new(x)
    }
}

/// Index of a clause in the formula. Fixed for the lifetime of a solver.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct CRef(u32);

impl CRef {
    #[inline(always)]
    pub fn from_idx(idx: usize) -> Self {
        CRef(idx as u32)
    }
    #[inline(always)]
    pub fn idx(&self) -> u32 {
        self.0
    }
}

impl AsIndex for CRef {
    #[inline(always)]
    fn as_index(self) -> usize {
        self.0 as usize
    }
    #[inline(always)]
    fn from_index(index: usize) -> Self {
        CRef(index as u32)
    }
}

/// A clause of the formula, shrinking as its literals get falsified.
///
/// Only `lits` changes during search: literals are removed when falsified
/// and put back, in reverse order, when the assignment is undone.
#[derive(Debug, Clone)]
pub struct Clause {
    lits: Vec<Lit>,
    satisfied: bool,
}

impl Clause {
    pub(crate) fn new(lits: Vec<Lit>) -> Self {
        Clause { lits, satisfied: false }
    }

    /// Active (not yet falsified) literals.
    #[inline(always)]
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.lits.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
    #[inline(always)]
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    #[inline(always)]
    pub(crate) fn set_satisfied(&mut self, b: bool) {
        self.satisfied = b;
    }

    /// Remove `lit` from the active literals.
    pub(crate) fn remove_lit(&mut self, lit: Lit) {
        let pos = self.lits.iter().position(|&l| l == lit);
        debug_assert!(pos.is_some(), "literal {:?} not in clause", lit);
        if let Some(pos) = pos {
            self.lits.remove(pos);
        }
    }

    #[inline(always)]
    pub(crate) fn restore_lit(&mut self, lit: Lit) {
        self.lits.push(lit);
    }
}

/// Printing in DIMACS format
pub mod display {
    use super::*;

    pub trait Print {
        fn fmt_dimacs(&self, out: &mut fmt::Formatter) -> fmt::Result;

        /// Any type implementing `Print` can be used in a format string by
        /// just using `x.pp_dimacs()` instead of `x`.
        ///
        /// ```
        /// use dpllsat::*;
        /// let v: Vec<Lit> = vec![Lit::from_dimacs(1), Lit::from_dimacs(-2)];
        /// assert_eq!(format!("{}", v.pp_dimacs()), "1 -2 0");
        /// ```
        fn pp_dimacs(&self) -> PrintWrapper<Self> {
            PrintWrapper(self)
        }
    }

    /// A wrapper that can be used to display objects in format strings
    pub struct PrintWrapper<'a, T: 'a + Print + ?Sized>(&'a T);

    impl<'a, T: Print + ?Sized> fmt::Display for PrintWrapper<'a, T> {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            self.0.fmt_dimacs(out)
        }
    }

    impl Print for [Lit] {
        fn fmt_dimacs(&self, out: &mut fmt::Formatter) -> fmt::Result {
            for lit in self.iter() {
                write!(out, "{} ", lit)?;
            }
            write!(out, "0")
        }
    }

    impl Print for Vec<Lit> {
        fn fmt_dimacs(&self, out: &mut fmt::Formatter) -> fmt::Result {
            self.as_slice().fmt_dimacs(out)
        }
    }

    impl Print for Clause {
        fn fmt_dimacs(&self, out: &mut fmt::Formatter) -> fmt::Result {
            self.lits().fmt_dimacs(out)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lit_dimacs() {
        for &i in &[1, -1, 2, -2, 17, -42] {
            let lit = Lit::from_dimacs(i);
            assert_eq!(lit.to_dimacs(), i);
            assert_eq!(lit.sign(), i > 0);
            assert_eq!(lit.var().id() as i32, i.abs());
        }
    }

    #[test]
    fn test_lit_not() {
        let a = Lit::from_dimacs(5);
        assert_eq!(!a, Lit::from_dimacs(-5));
        assert_eq!(!!a, a);
        assert_eq!(a.var(), (!a).var());
        assert_eq!(a.idx() ^ 1, (!a).idx());
    }

    #[test]
    fn test_not() {
        assert_eq!(-lbool::TRUE, lbool::FALSE);
        assert_eq!(-lbool::FALSE, lbool::TRUE);
        assert_eq!(-lbool::UNDEF, lbool::UNDEF);
    }

    #[test]
    fn test_bitxor() {
        assert_eq!(lbool::TRUE ^ true, lbool::FALSE);
        assert_eq!(lbool::TRUE ^ false, lbool::TRUE);
        assert_eq!(lbool::FALSE ^ true, lbool::TRUE);
        assert_eq!(lbool::FALSE ^ false, lbool::FALSE);
        assert_eq!(lbool::UNDEF ^ true, lbool::UNDEF);
        assert_eq!(lbool::UNDEF ^ false, lbool::UNDEF);
    }

    #[test]
    fn test_clause_remove_restore() {
        let lits: Vec<Lit> = [1, -2, 3].iter().map(|&i| Lit::from_dimacs(i)).collect();
        let mut c = Clause::new(lits);
        c.remove_lit(Lit::from_dimacs(-2));
        assert_eq!(c.lits(), &[Lit::from_dimacs(1), Lit::from_dimacs(3)]);
        c.restore_lit(Lit::from_dimacs(-2));
        assert_eq!(c.len(), 3);
        assert!(c.lits().contains(&Lit::from_dimacs(-2)));
    }
}
