//! The symmetric group of all permutations on some number of points.

use crate::{extent::Extent, Degree, Group, Perm, PermBuf};

/// The symmetric group on a given [`Degree`], i.e. the [`Group`] of every permutation of that
/// many points under composition.
///
/// # Example
/// ```
/// use permframe::{Degree, Group, PermBuf, SymmetricGroup};
///
/// let s3 = SymmetricGroup::new(Degree::new(3));
/// let bca = PermBuf::parse("BCA")?;
/// assert_eq!(s3.order(&bca), Some(3));
/// assert_eq!(s3.display(&bca).to_string(), "BCA - (ABC)");
/// // There are 6 permutations of 3 points
/// assert_eq!(s3.elements().count(), 6);
/// # Ok::<(), permframe::InvalidPermError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetricGroup {
    degree: Degree,
}

impl SymmetricGroup {
    pub fn new(degree: Degree) -> Self {
        Self { degree }
    }

    /// The [`Degree`] of every permutation in this group
    pub fn degree(self) -> Degree {
        self.degree
    }

    /// Returns an [`Iterator`] over every element of this group, in lexicographic order.
    pub fn elements(self) -> Extent {
        self.degree.extent()
    }

    /// Returns `true` if `perm` is an element of this group (i.e. if it has the right
    /// [`Degree`]).
    pub fn contains(self, perm: &Perm) -> bool {
        perm.degree() == self.degree
    }
}

impl From<&Perm> for SymmetricGroup {
    /// The symmetric group which contains a given [`Perm`]
    fn from(perm: &Perm) -> Self {
        Self::new(perm.degree())
    }
}

impl Group for SymmetricGroup {
    type View = Perm;
    type Element = PermBuf;

    fn identity(&self) -> PermBuf {
        PermBuf::identity(self.degree)
    }

    /// Composes two permutations, returning `None` unless both of them are in this group
    fn compose(&self, lhs: &Perm, rhs: &Perm) -> Option<PermBuf> {
        if !(self.contains(lhs) && self.contains(rhs)) {
            return None;
        }
        lhs.try_compose(rhs).ok()
    }

    fn describe(&self, elem: &Perm) -> Option<String> {
        elem.to_cycle_string()
    }

    fn cardinality_bound(&self) -> usize {
        self.degree.num_perms().unwrap_or(usize::MAX)
    }

    fn inverse(&self, elem: &Perm) -> Option<PermBuf> {
        self.contains(elem).then(|| elem.inv())
    }
}
