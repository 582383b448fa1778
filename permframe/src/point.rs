//! A type-safe representation of a point, and the codec between points and their letter names.

use std::fmt::{Debug, Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

#[allow(unused_imports)] // Only used for doc comments
use crate::{Degree, Perm};

/// The number of points which have a single-letter name (`'A'` to `'Z'`).
pub const NUM_LETTERS: usize = (b'Z' - b'A' + 1) as usize;

/// Maps a letter (`'A'..='Z'`) to the 0-indexed point it names, checking that the point lies
/// within a permutation of `size` points.  Returns `None` if `c` isn't an upper case ASCII letter
/// or if the resulting index would be out of range.
///
/// # Example
/// ```
/// use permframe::letter_to_index;
///
/// assert_eq!(letter_to_index('Z', 26), Some(25));
/// assert_eq!(letter_to_index('A', 1), Some(0));
/// // 'B' names the second point, which doesn't exist if there's only one
/// assert_eq!(letter_to_index('B', 1), None);
/// // Lower case letters aren't names of points
/// assert_eq!(letter_to_index('a', 26), None);
/// ```
pub fn letter_to_index(c: char, size: usize) -> Option<usize> {
    if !c.is_ascii_uppercase() {
        return None;
    }
    let index = (c as u8 - b'A') as usize;
    (index < size).then_some(index)
}

/// The inverse of [`letter_to_index`]: maps a 0-indexed point to its letter, returning `None` if
/// `index >= size` or if the point is too large to have a letter.
///
/// # Example
/// ```
/// use permframe::index_to_char;
///
/// assert_eq!(index_to_char(0, 3), Some('A'));
/// assert_eq!(index_to_char(25, 26), Some('Z'));
/// assert_eq!(index_to_char(3, 3), None); // Out of range
/// assert_eq!(index_to_char(26, 30), None); // No letter after 'Z'
/// ```
pub fn index_to_char(index: usize, size: usize) -> Option<char> {
    if index >= size {
        return None;
    }
    // Only fails for absurdly large indices
    let code = (b'A' as usize).checked_add(index)?;
    if code > b'Z' as usize {
        return None;
    }
    Some(code as u8 as char)
}

/// A type-safe representation of a 'point', i.e. one of the things being permuted.  Each `Point`
/// takes a single byte in memory, and the first 26 points are named `A` to `Z`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Point {
    /// A zero-indexed number representing the `Point`.  `A` is `Point { index: 0 }`.
    ///
    /// `index` cannot take the value 255, since this would imply a [`Degree`] of 256 which is
    /// unrepresentable.
    index: u8,
}

impl Point {
    /// The first `Point` on any [`Degree`], named `A`.
    pub const FIRST: Point = Point { index: 0 };

    /// The largest [`Point`] that can be stored.
    pub const MAX: Point = Point { index: 254 };

    /// Creates a `Point` from its letter name.  Only upper case ASCII letters are names.
    ///
    /// # Example
    /// ```
    /// # fn test() -> Option<()> {
    /// use permframe::Point;
    ///
    /// assert_eq!(Point::from_letter('A')?.index(), 0);
    /// assert_eq!(Point::from_letter('D')?.index(), 3);
    /// assert_eq!(Point::from_letter('d'), None);
    /// assert_eq!(Point::from_letter('4'), None);
    /// # Some(())
    /// # }
    /// # fn main() { test().unwrap() }
    /// ```
    pub fn from_letter(c: char) -> Option<Point> {
        letter_to_index(c, NUM_LETTERS).map(|idx| Point::from_index(idx as u8))
    }

    /// Creates a `Point` from a 0-indexed integer.
    ///
    /// # Panics
    ///
    /// Panics if 255 is passed (a `Point` with index 255 would imply a [`Degree`] of 256, which
    /// cannot be created).
    #[inline]
    #[track_caller]
    pub fn from_index(index: u8) -> Point {
        assert_ne!(index, 255, "`Point`s with index 255 can't be created.");
        Point { index }
    }

    /// Returns the 0-indexed representation of this `Point`.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the 1-indexed representation of this `Point`.
    #[inline]
    pub fn number(self) -> u8 {
        self.index + 1 // Can't overflow because `index` cannot be 255
    }

    /// Converts this `Point` into its letter, or `None` if it's past `Z`.
    ///
    /// # Example
    /// ```
    /// use permframe::Point;
    ///
    /// assert_eq!(Point::from_index(2).to_letter(), Some('C'));
    /// assert_eq!(Point::from_index(25).to_letter(), Some('Z'));
    /// assert_eq!(Point::from_index(26).to_letter(), None);
    /// ```
    pub fn to_letter(self) -> Option<char> {
        index_to_char(self.index(), NUM_LETTERS)
    }

    /// Converts this `Point` into a [`String`] that it should be displayed as.  Unlike
    /// [`to_letter`](Point::to_letter), this never fails: `Point`s without a letter are displayed
    /// as their 1-indexed number in angle brackets.
    ///
    /// # Example
    /// ```
    /// use permframe::Point;
    ///
    /// assert_eq!(Point::from_index(0).name(), "A");
    /// assert_eq!(Point::from_index(26).name(), "<27>");
    /// ```
    pub fn name(self) -> String {
        match self.to_letter() {
            Some(c) => c.to_string(),
            None => format!("<{}>", self.number()),
        }
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({})", self)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_letter() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "<{}>", self.number()),
        }
    }
}

///////////
// SERDE //
///////////

#[cfg(feature = "serde")]
struct PointVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for PointVisitor {
    type Value = Point;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a point index, or a letter from 'A' to 'Z'")
    }

    fn visit_u64<E>(self, val: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match u8::try_from(val) {
            Ok(idx) if idx != 255 => Ok(Point::from_index(idx)),
            _ => Err(E::custom(format!("point index too large: {}", val))),
        }
    }

    fn visit_i64<E>(self, val: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let val = u64::try_from(val)
            .map_err(|_| E::custom(format!("negative point index: {}", val)))?;
        self.visit_u64(val)
    }

    fn visit_char<E>(self, v: char) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Point::from_letter(v).ok_or_else(|| E::custom(format!("'{}' is not a point name", v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let mut chars = v.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.visit_char(c),
            _ => Err(E::custom(format!("'{}' is not a point name", v))),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Point, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PointVisitor)
    }
}

// Serialise as a u64
#[cfg(feature = "serde")]
impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::{index_to_char, letter_to_index, Point, NUM_LETTERS};

    #[test]
    #[should_panic]
    fn from_index_panic() {
        Point::from_index(255);
    }

    #[test]
    fn codec_bounds() {
        assert_eq!(letter_to_index('Z', 26), Some(25));
        assert_eq!(letter_to_index('A', 1), Some(0));
        assert_eq!(letter_to_index('B', 1), None);
        assert_eq!(letter_to_index('@', 26), None);
        assert_eq!(letter_to_index('[', 26), None);
        assert_eq!(letter_to_index('Ä', 26), None);

        assert_eq!(index_to_char(0, 0), None);
        assert_eq!(index_to_char(usize::MAX, usize::MAX), None);
        assert_eq!(index_to_char(25, 100), Some('Z'));
        assert_eq!(index_to_char(26, 100), None);
    }

    #[test]
    fn codec_inverse() {
        for idx in 0..NUM_LETTERS {
            let c = index_to_char(idx, NUM_LETTERS).unwrap();
            assert_eq!(letter_to_index(c, NUM_LETTERS), Some(idx));
            assert_eq!(Point::from_letter(c), Some(Point::from_index(idx as u8)));
        }
    }

    #[test]
    fn display() {
        assert_eq!(Point::FIRST.to_string(), "A");
        assert_eq!(format!("{:?}", Point::from_index(1)), "Point(B)");
        assert_eq!(Point::MAX.to_string(), "<255>");
    }
}
