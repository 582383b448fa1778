use std::{
    borrow::{Borrow, BorrowMut},
    fmt::{Debug, Display, Formatter},
    ops::{Deref, DerefMut},
    str::FromStr,
};

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, SeqAccess, Visitor},
    ser::Error as SerError,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    utils::{check_duplicate_or_out_of_range, degree_of_len},
    Degree, InvalidPermError, Point,
};

use super::{borrowed::Perm, PointIter};

/// An owned permutation.  This is to [`Perm`] what [`String`] is to [`str`].
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct PermBuf {
    /// The image of each [`Point`], in order.  Because of the 'valid permutation' invariant, this
    /// can't contain duplicate [`Point`]s or any [`Point`]s outside the [`Degree`] of this
    /// `PermBuf`.
    // This is `pub(super)` so that the rest of `crate::perm` can access it
    pub(super) point_vec: Vec<Point>,
}

impl PermBuf {
    /* CONSTRUCTORS */

    /// Parse a string of letters into a `PermBuf`, where the `i`th letter is the image of the
    /// `i`th point.  Every [`char`] must be the name of a [`Point`] within the length of the
    /// string.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, InvalidPermError, PermBuf, Point};
    ///
    /// assert_eq!(PermBuf::parse("CAB")?.to_string(), "CAB");
    /// // Parsing an invalid permutation returns an error describing the problem
    /// assert_eq!(PermBuf::parse(""), Err(InvalidPermError::NoPoints));
    /// assert_eq!(PermBuf::parse("AbC"), Err(InvalidPermError::InvalidLetter('b')));
    /// assert_eq!(
    ///     PermBuf::parse("ABB"),
    ///     Err(InvalidPermError::DuplicatePoint(Point::from_letter('B').unwrap()))
    /// );
    /// assert_eq!(
    ///     PermBuf::parse("ABD"),
    ///     Err(InvalidPermError::PointOutOfRange(
    ///         Point::from_letter('D').unwrap(),
    ///         Degree::new(3)
    ///     ))
    /// );
    /// # Ok::<(), InvalidPermError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidPermError> {
        let points = s
            .chars()
            .map(|c| Point::from_letter(c).ok_or(InvalidPermError::InvalidLetter(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_vec(points)
    }

    /// Creates the identity permutation on a given [`Degree`], which maps every [`Point`] to
    /// itself.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::identity(Degree::new(4)).to_string(), "ABCD");
    /// ```
    pub fn identity(degree: Degree) -> Self {
        // This unsafety is OK, because the identity is always a valid permutation
        unsafe { Self::from_point_iter_unchecked(degree.points()) }
    }

    /// Creates the permutation which reverses the order of the [`Point`]s on a given [`Degree`].
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::reversal(Degree::new(4)).to_string(), "DCBA");
    /// ```
    pub fn reversal(degree: Degree) -> Self {
        // This unsafety is OK, because the reversal is always a valid permutation
        unsafe { Self::from_point_iter_unchecked(degree.points().rev()) }
    }

    /* UTILITY CONSTRUCTORS */

    /// Creates a `PermBuf` from a list of 0-indexed images, checking that they form a valid
    /// permutation.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, InvalidPermError, PermBuf};
    ///
    /// assert_eq!(PermBuf::from_indices([1, 2, 0])?.to_string(), "BCA");
    /// assert_eq!(
    ///     PermBuf::from_indices([1, 2, 7]),
    ///     Err(InvalidPermError::IndexOutOfRange(7, Degree::new(3)))
    /// );
    /// # Ok::<(), InvalidPermError>(())
    /// ```
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Result<Self, InvalidPermError> {
        let indices = indices.into_iter().collect_vec();
        let degree = degree_of_len(indices.len())?;
        let points = indices
            .into_iter()
            .map(|idx| match idx < degree.num_points() {
                // Can't truncate, because `degree.num_points() <= 255`
                true => Ok(Point::from_index(idx as u8)),
                false => Err(InvalidPermError::IndexOutOfRange(idx, degree)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_vec(points)
    }

    /// Creates a `PermBuf` from a [`Vec`] of [`Point`]s, checking that the resulting `PermBuf`
    /// is valid.
    pub fn from_vec(points: Vec<Point>) -> Result<PermBuf, InvalidPermError> {
        let degree = degree_of_len(points.len())?;
        check_duplicate_or_out_of_range(points.iter().copied(), degree)?;
        Ok(Self { point_vec: points })
    }

    /// Creates a `PermBuf` from a [`Vec`] of [`Point`]s, **without** checking that the resulting
    /// `PermBuf` is valid.  This is the unsafe version of [`PermBuf::from_vec`].
    ///
    /// # Safety
    ///
    /// This function is safe if `points` is non-empty, has at most 255 items, and contains every
    /// [`Point`] with [`index`](Point::index) smaller than `points.len()` exactly once.
    #[inline]
    pub unsafe fn from_vec_unchecked(points: Vec<Point>) -> PermBuf {
        PermBuf { point_vec: points }
    }

    /// Creates a `PermBuf` from an [`Iterator`] of [`Point`]s, checking that the resulting
    /// `PermBuf` is valid.
    pub fn from_point_iter(iter: impl Iterator<Item = Point>) -> Result<Self, InvalidPermError> {
        Self::from_vec(iter.collect_vec())
    }

    /// Creates a `PermBuf` from an [`Iterator`] of [`Point`]s, **without** checking that the
    /// resulting `PermBuf` is valid.  This is the unsafe version of [`PermBuf::from_point_iter`].
    ///
    /// # Safety
    ///
    /// This function is safe if `iter` yields a valid permutation (see
    /// [`PermBuf::from_vec_unchecked`]).
    pub unsafe fn from_point_iter_unchecked(iter: impl Iterator<Item = Point>) -> Self {
        Self::from_vec_unchecked(iter.collect())
    }

    /// Converts a `PermBuf` into a [`Perm`].  Equivalent to `&*self`, but doesn't rely on type
    /// inference.
    #[inline]
    pub fn as_perm(&self) -> &Perm {
        // This unsafety is OK, because `PermBuf` requires its points to form a valid permutation
        unsafe { Perm::from_slice_unchecked(&self.point_vec) }
    }

    /// Converts a `PermBuf` into a mutable [`Perm`].
    #[inline]
    pub fn as_mut_perm(&mut self) -> &mut Perm {
        // This unsafety is OK, because `PermBuf` requires its points to form a valid permutation
        unsafe { Perm::from_mut_slice_unchecked(&mut self.point_vec) }
    }

    /* MUTATING OPERATIONS */

    /// Overwrites this with the contents of a [`Perm`], reusing the allocation.  The [`Degree`]
    /// of `self` changes if needed.
    pub fn overwrite_from(&mut self, perm: &Perm) {
        self.point_vec.clear();
        self.point_vec.extend(perm.point_iter());
    }
}

/* CONVERSIONS BETWEEN `Perm` AND `PermBuf` */

impl Deref for PermBuf {
    type Target = Perm;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_perm()
    }
}

impl DerefMut for PermBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_perm()
    }
}

impl Borrow<Perm> for PermBuf {
    #[inline]
    fn borrow(&self) -> &Perm {
        self.as_perm()
    }
}

impl BorrowMut<Perm> for PermBuf {
    #[inline]
    fn borrow_mut(&mut self) -> &mut Perm {
        self.as_mut_perm()
    }
}

impl AsRef<Perm> for PermBuf {
    #[inline]
    fn as_ref(&self) -> &Perm {
        self.as_perm()
    }
}

impl AsMut<Perm> for PermBuf {
    #[inline]
    fn as_mut(&mut self) -> &mut Perm {
        self.as_mut_perm()
    }
}

impl ToOwned for Perm {
    type Owned = PermBuf;

    #[inline]
    fn to_owned(&self) -> Self::Owned {
        // We can skip the validity checks here because `Perm` is valid by invariant
        unsafe { PermBuf::from_point_iter_unchecked(self.point_iter()) }
    }
}

/* FORMATTING */

impl Debug for PermBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PermBuf({})", self)
    }
}

impl Display for PermBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Delegate to `Perm`'s implementation
        Display::fmt(self.deref(), f)
    }
}

/* OTHER TRAITS */

impl<'perm> IntoIterator for &'perm PermBuf {
    type Item = Point;
    type IntoIter = PointIter<'perm>;

    fn into_iter(self) -> Self::IntoIter {
        self.point_iter()
    }
}

impl FromStr for PermBuf {
    type Err = InvalidPermError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<Perm> for PermBuf {
    fn eq(&self, other: &Perm) -> bool {
        self.as_perm() == other
    }
}

impl PartialEq<PermBuf> for Perm {
    fn eq(&self, other: &PermBuf) -> bool {
        self == other.as_perm()
    }
}

///////////
// SERDE //
///////////

// Serialise as a string of letters
#[cfg(feature = "serde")]
impl Serialize for PermBuf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_letters() {
            Some(s) => serializer.serialize_str(&s),
            None => Err(S::Error::custom(format!(
                "{} has points without letter names",
                self.degree()
            ))),
        }
    }
}

#[cfg(feature = "serde")]
struct PermBufVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for PermBufVisitor {
    type Value = PermBuf;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string of letters, or a list of point indices")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        PermBuf::parse(v).map_err(|e| E::custom(format!("invalid permutation {:?}: {}", v, e)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut indices = Vec::new();
        while let Some(idx) = seq.next_element::<usize>()? {
            indices.push(idx);
        }
        PermBuf::from_indices(indices).map_err(A::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PermBuf {
    fn deserialize<D>(deserializer: D) -> Result<PermBuf, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PermBufVisitor)
    }
}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for PermBuf {
    fn arbitrary(gen: &mut Gen) -> Self {
        let degree = Degree::arbitrary(gen);
        // Fisher-Yates shuffle of the identity
        let mut points = degree.points().collect_vec();
        for i in (1..points.len()).rev() {
            let j = usize::arbitrary(gen) % (i + 1);
            points.swap(i, j);
        }
        // This unsafety is OK, because shuffling a valid permutation keeps it valid
        unsafe { PermBuf::from_vec_unchecked(points) }
    }
}
