use std::{
    error::Error,
    fmt::{Display, Formatter},
};

use crate::{degree::ZeroDegreeError, Degree, Point};

#[allow(unused_imports)] // Only used for doc comments
use crate::Perm;

/// All the possible ways that a [`Perm`] could be invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidPermError {
    /// The [`Perm`] would contain no [`Point`]s
    NoPoints,
    /// The [`Perm`] would have more [`Point`]s than any [`Degree`] can hold
    TooManyPoints(usize),
    /// Some [`char`] isn't the name of a [`Point`] (for example `a` or `4`)
    InvalidLetter(char),
    /// A [`Point`] would appear twice in the new [`Perm`] (for example in `ABBD`)
    DuplicatePoint(Point),
    /// A [`Point`] is not within the [`Degree`] of the new [`Perm`] (for example `E` in `ABCE`)
    PointOutOfRange(Point, Degree),
    /// An index is not within the [`Degree`] of the new [`Perm`]
    IndexOutOfRange(usize, Degree),
    /// Cycle notation has an unmatched or nested bracket, or a letter outside any cycle
    UnbalancedCycle,
}

impl From<ZeroDegreeError> for InvalidPermError {
    fn from(_: ZeroDegreeError) -> Self {
        InvalidPermError::NoPoints
    }
}

impl Display for InvalidPermError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPermError::NoPoints => write!(f, "Permutation would have no points"),
            InvalidPermError::TooManyPoints(n) => {
                write!(f, "Permutation would have {} points (at most 255 allowed)", n)
            }
            InvalidPermError::InvalidLetter(c) => write!(f, "{:?} is not a point name", c),
            InvalidPermError::DuplicatePoint(point) => {
                write!(f, "Point '{}' appears twice", point)
            }
            InvalidPermError::PointOutOfRange(point, degree) => {
                write!(f, "Point '{}' is not within {}", point, degree)
            }
            InvalidPermError::IndexOutOfRange(idx, degree) => {
                write!(f, "Index {} is not within {}", idx, degree)
            }
            InvalidPermError::UnbalancedCycle => write!(f, "Unbalanced brackets in cycle notation"),
        }
    }
}

impl Error for InvalidPermError {}
