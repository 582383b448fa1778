//! 2x2 matrices over GF(2), the field with two elements.

use std::{
    error::Error,
    fmt::{Debug, Display, Formatter},
    ops::Mul,
    str::FromStr,
};

use crate::Group;

/// A 2x2 matrix whose entries are taken from GF(2), so addition is XOR and multiplication is AND.
/// Matrices are ordered row-major, with `0 < 1`.
///
/// # Example
/// ```
/// use permframe::Matrix2;
///
/// let swap: Matrix2 = "01/10".parse()?;
/// assert_eq!(swap * swap, Matrix2::IDENTITY);
/// assert_eq!(swap.to_string(), "01/10");
/// # Ok::<(), permframe::ParseMatrixError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Matrix2 {
    /// Indexed as `cells[row][column]`
    cells: [[bool; 2]; 2],
}

impl Matrix2 {
    pub const IDENTITY: Matrix2 = Matrix2 {
        cells: [[true, false], [false, true]],
    };

    pub const ZERO: Matrix2 = Matrix2 {
        cells: [[false; 2]; 2],
    };

    pub fn new(cells: [[bool; 2]; 2]) -> Self {
        Self { cells }
    }

    /// Creates a `Matrix2` from the lowest 4 bits of `bits`, read row-major from the most
    /// significant bit (so `0b0110` is `01/10`).
    pub fn from_bits(bits: u8) -> Self {
        let bit = |i: u8| bits & (1 << (3 - i)) != 0;
        Self::new([[bit(0), bit(1)], [bit(2), bit(3)]])
    }

    /// Returns an [`Iterator`] over all 16 2x2 matrices over GF(2), in increasing order.
    pub fn all() -> impl Iterator<Item = Matrix2> + Clone {
        (0..16).map(Self::from_bits)
    }

    /// The determinant (`ad - bc`, which is `ad XOR bc` over GF(2))
    pub fn determinant(self) -> bool {
        let [[a, b], [c, d]] = self.cells;
        (a & d) ^ (b & c)
    }

    /// A matrix is invertible exactly when its determinant is non-zero.  Only the 6 invertible
    /// matrices form a group under multiplication.
    pub fn is_invertible(self) -> bool {
        self.determinant()
    }

    /// Writes this matrix in the compact `M` form, e.g. `M0110` for `01/10`.
    pub fn to_compact_string(self) -> String {
        let [[a, b], [c, d]] = self.cells;
        format!("M{}{}{}{}", a as u8, b as u8, c as u8, d as u8)
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    /// Matrix multiplication over GF(2): `c[i][j] = (a[i][0] & b[0][j]) ^ (a[i][1] & b[1][j])`.
    fn mul(self, rhs: Matrix2) -> Matrix2 {
        let a = self.cells;
        let b = rhs.cells;
        let cell = |i: usize, j: usize| (a[i][0] & b[0][j]) ^ (a[i][1] & b[1][j]);
        Matrix2::new([[cell(0, 0), cell(0, 1)], [cell(1, 0), cell(1, 1)]])
    }
}

impl AsRef<Matrix2> for Matrix2 {
    fn as_ref(&self) -> &Matrix2 {
        self
    }
}

impl Debug for Matrix2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matrix2({})", self)
    }
}

impl Display for Matrix2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [[a, b], [c, d]] = self.cells;
        write!(f, "{}{}/{}{}", a as u8, b as u8, c as u8, d as u8)
    }
}

impl FromStr for Matrix2 {
    type Err = ParseMatrixError;

    /// Parses either the row form (`01/10`) or the compact form (`M0110`).  Whitespace and `/`
    /// are ignored between digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('M').unwrap_or(s);
        let mut digits = Vec::with_capacity(4);
        for c in s.chars() {
            match c {
                '0' => digits.push(false),
                '1' => digits.push(true),
                '/' => {}
                c if c.is_whitespace() => {}
                c => return Err(ParseMatrixError::InvalidDigit(c)),
            }
        }
        match digits[..] {
            [a, b, c, d] => Ok(Matrix2::new([[a, b], [c, d]])),
            _ => Err(ParseMatrixError::WrongNumberOfDigits(digits.len())),
        }
    }
}

/// The ways that parsing a [`Matrix2`] can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMatrixError {
    InvalidDigit(char),
    WrongNumberOfDigits(usize),
}

impl Display for ParseMatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMatrixError::InvalidDigit(c) => {
                write!(f, "{:?} is not a GF(2) digit (expected '0' or '1')", c)
            }
            ParseMatrixError::WrongNumberOfDigits(n) => {
                write!(f, "Expected 4 digits, found {}", n)
            }
        }
    }
}

impl Error for ParseMatrixError {}

/// The [`Group`] of invertible 2x2 matrices over GF(2) under multiplication (isomorphic to the
/// symmetric group on 3 points).  Singular matrices can still be passed to the [`Group`]
/// algorithms, but they never return to the identity so have no [order](Group::order).
///
/// # Example
/// ```
/// use permframe::{Gf2MatrixGroup, Group, Matrix2};
///
/// let gens: [Matrix2; 2] = ["01/10".parse()?, "11/10".parse()?];
/// let group = Gf2MatrixGroup.generate_subgroup(gens).unwrap();
/// assert_eq!(group.len(), 6);
/// assert_eq!(Gf2MatrixGroup.order(&"11/00".parse()?), None);
/// # Ok::<(), permframe::ParseMatrixError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf2MatrixGroup;

impl Group for Gf2MatrixGroup {
    type View = Matrix2;
    type Element = Matrix2;

    fn identity(&self) -> Matrix2 {
        Matrix2::IDENTITY
    }

    fn compose(&self, lhs: &Matrix2, rhs: &Matrix2) -> Option<Matrix2> {
        Some(*lhs * *rhs)
    }

    fn describe(&self, elem: &Matrix2) -> Option<String> {
        Some(elem.to_compact_string())
    }

    fn cardinality_bound(&self) -> usize {
        16
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Group, GroupSet};

    use super::{Gf2MatrixGroup, Matrix2, ParseMatrixError};

    fn mat(s: &str) -> Matrix2 {
        s.parse().unwrap()
    }

    #[test]
    fn parse() {
        assert_eq!(mat("10/01"), Matrix2::IDENTITY);
        assert_eq!(mat("M1001"), Matrix2::IDENTITY);
        assert_eq!(mat(" 1 0 / 0 1 "), Matrix2::IDENTITY);
        assert_eq!(mat("00/00"), Matrix2::ZERO);
        assert_eq!("10/02".parse::<Matrix2>(), Err(ParseMatrixError::InvalidDigit('2')));
        assert_eq!(
            "10/0".parse::<Matrix2>(),
            Err(ParseMatrixError::WrongNumberOfDigits(3))
        );
        assert_eq!(
            "MM1001".parse::<Matrix2>(),
            Err(ParseMatrixError::InvalidDigit('M'))
        );
    }

    #[test]
    fn bits() {
        assert_eq!(Matrix2::from_bits(0b1001), Matrix2::IDENTITY);
        assert_eq!(Matrix2::from_bits(0b0110), mat("01/10"));
        let all = Matrix2::all().collect_vec();
        assert_eq!(all.len(), 16);
        assert!(all.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn formatting() {
        let m = mat("11/10");
        assert_eq!(m.to_string(), "11/10");
        assert_eq!(m.to_compact_string(), "M1110");
        assert_eq!(format!("{:?}", m), "Matrix2(11/10)");
        assert_eq!(Gf2MatrixGroup.display(&m).to_string(), "11/10 - M1110");
    }

    #[test]
    fn multiplication() {
        let swap = mat("01/10");
        let shear = mat("11/10");
        assert_eq!(swap * shear, mat("10/11"));
        assert_eq!(shear * swap, mat("11/01"));
        // Non-commutative
        assert_ne!(swap * shear, shear * swap);
        for m in Matrix2::all() {
            assert_eq!(m * Matrix2::IDENTITY, m);
            assert_eq!(Matrix2::IDENTITY * m, m);
            assert_eq!(m * Matrix2::ZERO, Matrix2::ZERO);
        }
        // The determinant is multiplicative
        for (a, b) in Matrix2::all().cartesian_product(Matrix2::all()) {
            assert_eq!((a * b).determinant(), a.determinant() & b.determinant());
        }
    }

    #[test]
    fn general_linear_group() {
        let group = Gf2MatrixGroup
            .generate_subgroup([mat("01/10"), mat("11/10")])
            .unwrap();
        let invertible: GroupSet<Gf2MatrixGroup> =
            Matrix2::all().filter(|m| m.is_invertible()).collect();
        assert_eq!(group.len(), 6);
        assert_eq!(group, invertible);
        assert!(Gf2MatrixGroup.is_subgroup(&group));

        let orders = group
            .iter()
            .map(|m| Gf2MatrixGroup.order(m).unwrap())
            .collect_vec();
        // 1 identity, 3 transpositions and 2 three-cycles (like the symmetric group on 3 points)
        assert_eq!(orders.iter().filter(|&&o| o == 1).count(), 1);
        assert_eq!(orders.iter().filter(|&&o| o == 2).count(), 3);
        assert_eq!(orders.iter().filter(|&&o| o == 3).count(), 2);

        for m in &group {
            let inv = Gf2MatrixGroup.inverse(m).unwrap();
            assert_eq!(*m * inv, Matrix2::IDENTITY);
        }
    }

    #[test]
    fn singular_matrices() {
        for m in Matrix2::all().filter(|m| !m.is_invertible()) {
            assert_eq!(Gf2MatrixGroup.order(&m), None);
            assert_eq!(Gf2MatrixGroup.powers(&m), None);
            assert_eq!(Gf2MatrixGroup.inverse(&m), None);
        }
        // `11/00` is idempotent, so closing it terminates immediately
        let with_singular = Gf2MatrixGroup
            .generate_subgroup([mat("11/00")])
            .unwrap();
        assert_eq!(with_singular.len(), 1);
        assert!(Gf2MatrixGroup.is_closed(&with_singular));
        assert!(!Gf2MatrixGroup.is_subgroup(&with_singular));
    }
}
