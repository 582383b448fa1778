//! A representation of the number of points a permutation acts on.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
};

use factorial::Factorial;

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{extent::Extent, Point};
// Imports used solely by doc comments
#[allow(unused_imports)]
use crate::{Perm, PermBuf};

/// A newtype over [`u8`] that represents the number of [`Point`]s being permuted.  All `Degree`s
/// must contain at least one [`Point`]; zero-point `Degree`s cannot be created.
///
/// To create a new `Degree`, you can either create it directly with [`Degree::try_from`] (which
/// returns a [`Result`]) or with [`Degree::new`] (which panics if passed `0`).
///
/// ```
/// use permframe::Degree;
///
/// assert_eq!(Degree::new(4).num_points(), 4);
/// assert_eq!(Degree::new(4).to_string(), "4 points");
/// assert_eq!(Degree::ONE.to_string(), "1 point");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Degree(u8);

impl Degree {
    /// A `Degree` with only `1` point.  The only permutation on one point is the identity.
    pub const ONE: Degree = Degree(1);

    /// Creates a new `Degree` representing a given number of [`Point`]s.
    ///
    /// # Panics
    ///
    /// Panics if `num_points` is zero.
    #[track_caller]
    pub fn new(num_points: u8) -> Degree {
        Self::try_from(num_points).expect("Can't create a `Degree` of zero points")
    }

    /// The number of [`Point`]s in this [`Degree`].  This is guaranteed to be non-zero.
    #[inline(always)]
    pub fn num_points(self) -> usize {
        self.0 as usize
    }

    /// The number of [`Point`]s in this [`Degree`] as a [`u8`].  This is guaranteed to be
    /// non-zero.
    #[inline(always)]
    pub fn num_points_u8(self) -> u8 {
        self.0
    }

    /// Returns the highest [`Point`] in this `Degree`
    pub fn last(self) -> Point {
        Point::from_index(self.0 - 1)
    }

    /// Gets an [`Iterator`] over the [`Point`]s contained within this `Degree`, in increasing
    /// order.
    pub fn points(self) -> impl DoubleEndedIterator<Item = Point> + ExactSizeIterator {
        (0..self.num_points_u8()).map(Point::from_index)
    }

    /// Returns `true` if a given [`Point`] is contained in this `Degree`.
    pub fn contains(self, point: Point) -> bool {
        point.index() < self.num_points()
    }

    /// The number of distinct permutations on this `Degree` (i.e. `n!`), or `None` if that number
    /// doesn't fit in a [`usize`].
    ///
    /// # Example
    /// ```
    /// use permframe::Degree;
    ///
    /// assert_eq!(Degree::new(4).num_perms(), Some(24));
    /// assert_eq!(Degree::new(200).num_perms(), None);
    /// ```
    pub fn num_perms(self) -> Option<usize> {
        self.num_points().checked_factorial()
    }

    /// Returns an [`Iterator`] over every [`PermBuf`] of this `Degree`, in lexicographic order
    /// (starting at the identity).  Each call starts a fresh enumeration.
    ///
    /// # Example
    /// ```
    /// use permframe::Degree;
    ///
    /// let extent = Degree::new(3).extent().map(|p| p.to_string()).collect::<Vec<_>>();
    /// assert_eq!(extent, ["ABC", "ACB", "BAC", "BCA", "CAB", "CBA"]);
    /// ```
    pub fn extent(self) -> Extent {
        Extent::new(self)
    }
}

impl Debug for Degree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Degree({})", self.0)
    }
}

impl Display for Degree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "1 point"),
            n => write!(f, "{} points", n),
        }
    }
}

impl TryFrom<u8> for Degree {
    type Error = ZeroDegreeError;

    fn try_from(num_points: u8) -> Result<Self, Self::Error> {
        match num_points {
            0 => Err(ZeroDegreeError),
            _ => Ok(Degree(num_points)),
        }
    }
}

/// An error created when attempting to create a [`Degree`] of zero [`Point`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroDegreeError;

impl Display for ZeroDegreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Can't create a `Degree` of zero points")
    }
}

impl std::error::Error for ZeroDegreeError {}

///////////////////////////
// `IncompatibleDegrees` //
///////////////////////////

/// An error created when two permutations of different [`Degree`]s are composed
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IncompatibleDegrees {
    /// The [`Degree`] of the left-hand (outer) permutation
    pub(crate) lhs_degree: Degree,
    /// The [`Degree`] of the right-hand (inner) permutation
    pub(crate) rhs_degree: Degree,
}

impl IncompatibleDegrees {
    /// Compares two [`Degree`]s, returning `Ok(())` if they are equal and returning the
    /// appropriate `IncompatibleDegrees` error if not.
    pub fn test_err(lhs_degree: Degree, rhs_degree: Degree) -> Result<(), Self> {
        if lhs_degree == rhs_degree {
            Ok(())
        } else {
            Err(IncompatibleDegrees {
                lhs_degree,
                rhs_degree,
            })
        }
    }

    /// Compares an `Option<Degree>` to a [`Degree`], overwriting the `Option` if it's `None` but
    /// otherwise checking the [`Degree`]s for equality.  This is useful for checking that a
    /// sequence of [`Perm`]s all share a [`Degree`] without treating the first one as a special
    /// case.
    pub fn test_err_opt(opt: &mut Option<Degree>, degree: Degree) -> Result<(), Self> {
        match opt {
            None => {
                *opt = Some(degree);
                Ok(())
            }
            Some(d) => Self::test_err(*d, degree),
        }
    }

    pub fn lhs_degree(&self) -> Degree {
        self.lhs_degree
    }

    pub fn rhs_degree(&self) -> Degree {
        self.rhs_degree
    }
}

impl Display for IncompatibleDegrees {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incompatible degrees: {} (lhs), {} (rhs)",
            self.lhs_degree, self.rhs_degree
        )
    }
}

impl std::error::Error for IncompatibleDegrees {}

///////////
// SERDE //
///////////

// Serialise as a u64
#[cfg(feature = "serde")]
impl Serialize for Degree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0 as u64)
    }
}

#[cfg(feature = "serde")]
struct DegreeVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for DegreeVisitor {
    type Value = Degree;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a positive number of points")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let val_u8: u8 = v
            .try_into()
            .map_err(|_| E::custom(format!("degree is too large: {}", v)))?;
        Degree::try_from(val_u8).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let v: u64 = v
            .try_into()
            .map_err(|_| E::custom(format!("negative degree: {}", v)))?;
        self.visit_u64(v)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Degree {
    fn deserialize<D>(deserializer: D) -> Result<Degree, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u64(DegreeVisitor)
    }
}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Degree {
    fn arbitrary(gen: &mut Gen) -> Self {
        // Only generate `Degree`s whose permutations can be written with letters, so that every
        // arbitrary permutation can be parsed and displayed
        let num_points = u8::arbitrary(gen) % crate::point::NUM_LETTERS as u8 + 1;
        Self::new(num_points)
    }
}

#[cfg(test)]
mod tests {
    use super::{Degree, IncompatibleDegrees};

    #[test]
    #[should_panic]
    fn zero_degree() {
        Degree::new(0);
    }

    #[test]
    fn points() {
        let d = Degree::new(4);
        assert_eq!(d.points().map(|p| p.to_string()).collect::<String>(), "ABCD");
        assert_eq!(d.last().to_string(), "D");
        assert!(d.contains(d.last()));
        assert!(!d.contains(crate::Point::from_index(4)));
    }

    #[test]
    fn num_perms() {
        assert_eq!(Degree::ONE.num_perms(), Some(1));
        assert_eq!(Degree::new(5).num_perms(), Some(120));
        assert_eq!(Degree::new(10).num_perms(), Some(3_628_800));
    }

    #[test]
    fn incompatible() {
        let err = IncompatibleDegrees::test_err(Degree::new(3), Degree::new(4)).unwrap_err();
        assert_eq!(err.to_string(), "Incompatible degrees: 3 points (lhs), 4 points (rhs)");

        let mut opt = None;
        assert!(IncompatibleDegrees::test_err_opt(&mut opt, Degree::new(3)).is_ok());
        assert_eq!(opt, Some(Degree::new(3)));
        assert!(IncompatibleDegrees::test_err_opt(&mut opt, Degree::new(3)).is_ok());
        assert!(IncompatibleDegrees::test_err_opt(&mut opt, Degree::new(2)).is_err());
    }
}
