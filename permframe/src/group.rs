//! Algorithms which work over any finite group, given a description of its elements and how they
//! compose.

use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt::{Debug, Display, Formatter},
};

/// An ordered set of distinct elements of a [`Group`].  Duplicates are determined by the
/// elements' [`Ord`] implementation.
pub type GroupSet<G> = BTreeSet<<G as Group>::Element>;

/// A finite group, described by its elements and the way they compose.  Algorithms such as
/// [`Group::order`] and [`Group::generate_subgroup`] are provided in terms of the required
/// methods, so they work identically for permutations ([`SymmetricGroup`](crate::SymmetricGroup))
/// and for 2x2 matrices over GF(2) ([`Gf2MatrixGroup`](crate::Gf2MatrixGroup)).
///
/// Elements are stored as owned [`Group::Element`]s, but every algorithm takes borrowed
/// [`Group::View`]s (for permutations, [`PermBuf`](crate::PermBuf) and [`Perm`](crate::Perm)).
pub trait Group: Sized {
    /// A borrowed element of this group
    type View: ?Sized + Ord + Display + ToOwned<Owned = Self::Element>;
    /// An owned element of this group
    type Element: Borrow<Self::View> + AsRef<Self::View> + Ord + Clone + Debug;

    /// The identity element
    fn identity(&self) -> Self::Element;

    /// Composes two elements, returning `lhs ∘ rhs`, or `None` if they can't be composed (for
    /// example, permutations of different sizes).
    fn compose(&self, lhs: &Self::View, rhs: &Self::View) -> Option<Self::Element>;

    /// A secondary representation of an element, used alongside its [`Display`] form.  Returns
    /// `None` if the element has no such representation.
    fn describe(&self, elem: &Self::View) -> Option<String>;

    /// An upper bound on the number of elements of this group.  No element can have an order
    /// larger than this.
    fn cardinality_bound(&self) -> usize;

    /* PROVIDED METHODS */

    fn is_identity(&self, elem: &Self::View) -> bool {
        let identity = self.identity();
        elem == identity.as_ref()
    }

    /// Returns a value which [`Display`]s an element along with its
    /// [description](Group::describe), e.g. `BCDA - (ABCD)`.
    fn display<'a>(&'a self, elem: &'a Self::View) -> Described<'a, Self> {
        Described { group: self, elem }
    }

    /// Composes a left-to-right chain of elements, so `[a, b, c]` becomes `a ∘ b ∘ c`.  An empty
    /// chain gives the [identity](Group::identity), and this stops (returning `None`) at the
    /// first pair of elements which can't be composed.
    ///
    /// This differs from [`Perm::compose_all`](crate::Perm::compose_all), which returns
    /// `Ok(None)` for an empty chain: a bare `Perm` has no [`Degree`](crate::Degree) to build an
    /// identity from, whereas every `Group` knows its own identity.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, Group, Perm, PermBuf, SymmetricGroup};
    ///
    /// let s3 = SymmetricGroup::new(Degree::new(3));
    /// assert_eq!(s3.compose_all(Vec::<PermBuf>::new()), Some(PermBuf::parse("ABC")?));
    /// assert_eq!(Perm::compose_all(Vec::<PermBuf>::new()), Ok(None));
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    fn compose_all<I>(&self, elems: I) -> Option<Self::Element>
    where
        I: IntoIterator,
        I::Item: AsRef<Self::View>,
    {
        elems
            .into_iter()
            .try_fold(self.identity(), |acc, e| self.compose(acc.as_ref(), e.as_ref()))
    }

    /// Computes every power of `elem`, starting with `elem` and ending at the identity.  Returns
    /// `None` if a composition fails, or if `elem` never returns to the identity within
    /// [`Group::cardinality_bound`] steps.
    fn powers(&self, elem: &Self::View) -> Option<Vec<Self::Element>> {
        let mut powers = Vec::new();
        let mut power = self.identity();
        for _ in 0..self.cardinality_bound() {
            power = self.compose(elem, power.as_ref())?;
            powers.push(power.clone());
            if self.is_identity(power.as_ref()) {
                return Some(powers);
            }
        }
        log::debug!(
            "{} didn't return to the identity after {} steps",
            elem,
            self.cardinality_bound()
        );
        None
    }

    /// Computes the smallest `n > 0` such that composing `elem` with itself `n` times gives the
    /// identity.  Returns `None` if a composition fails, or if `elem` never returns to the
    /// identity (which is only possible if `elem` isn't really an element of a group).
    fn order(&self, elem: &Self::View) -> Option<usize> {
        let mut power = self.identity();
        for n in 1..=self.cardinality_bound() {
            power = self.compose(elem, power.as_ref())?;
            if self.is_identity(power.as_ref()) {
                return Some(n);
            }
        }
        log::debug!("{} has no finite order", elem);
        None
    }

    /// Computes the inverse of an element.  By default, this is `elem` raised to the power of
    /// its order minus one.
    fn inverse(&self, elem: &Self::View) -> Option<Self::Element> {
        let mut powers = self.powers(elem)?;
        powers.pop(); // `elem^order` is the identity
        Some(powers.pop().unwrap_or_else(|| self.identity()))
    }

    /// Conjugates `elem` by `by`, returning `by⁻¹ ∘ elem ∘ by`.
    fn conjugate_by(&self, elem: &Self::View, by: &Self::View) -> Option<Self::Element> {
        let by_inv = self.inverse(by)?;
        let partial = self.compose(by_inv.as_ref(), elem)?;
        self.compose(partial.as_ref(), by)
    }

    /// Generates the subgroup generated by some `generators`, i.e. the smallest set containing
    /// the generators which is closed under composition.  Returns `None` if any composition
    /// fails.
    ///
    /// Every element found so far is composed with every earlier element (and itself) in both
    /// orders, including elements found during the scan, until the scan reaches the end of the
    /// list without finding anything new.  This always terminates because the group is finite.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, Group, PermBuf, SymmetricGroup};
    ///
    /// let s4 = SymmetricGroup::new(Degree::new(4));
    /// let rotation = PermBuf::parse("BCDA")?;
    /// let mirror = PermBuf::parse("BADC")?;
    /// // A rotation and a mirror of a square generate the dihedral group of order 8
    /// let d4 = s4.generate_subgroup([&rotation, &mirror]).unwrap();
    /// assert_eq!(d4.len(), 8);
    /// assert!(s4.is_closed(&d4));
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    fn generate_subgroup<I>(&self, generators: I) -> Option<GroupSet<Self>>
    where
        I: IntoIterator,
        I::Item: AsRef<Self::View>,
    {
        let mut elements: Vec<Self::Element> = Vec::new();
        let mut set = GroupSet::<Self>::new();
        for g in generators {
            let g = g.as_ref();
            if !set.contains(g) {
                set.insert(g.to_owned());
                elements.push(g.to_owned());
            }
        }
        log::debug!("Generating subgroup from {} generators", elements.len());

        let mut i = 0;
        while i < elements.len() {
            for j in 0..=i {
                let lhs = elements[i].as_ref();
                let rhs = elements[j].as_ref();
                let products = [self.compose(lhs, rhs)?, self.compose(rhs, lhs)?];
                for product in products {
                    if !set.contains(product.as_ref()) {
                        log::trace!("Found {}", self.display(product.as_ref()));
                        set.insert(product.clone());
                        elements.push(product);
                    }
                }
            }
            i += 1;
        }
        log::debug!("Generated subgroup of {} elements", set.len());
        Some(set)
    }

    /// Checks that every product of two elements of `elements` (in either order) is also in
    /// `elements`.
    fn is_closed(&self, elements: &GroupSet<Self>) -> bool {
        elements.iter().all(|a| {
            elements.iter().all(|b| {
                self.compose(a.as_ref(), b.as_ref())
                    .is_some_and(|product| elements.contains(product.as_ref()))
            })
        })
    }

    /// Checks whether some elements form a subgroup: they must be non-empty, closed under
    /// composition, and contain the inverse of every element.  The last condition only fails for
    /// elements which aren't really in a group (such as singular matrices), since a closed finite
    /// set of group elements always contains every inverse.
    fn is_subgroup(&self, elements: &GroupSet<Self>) -> bool {
        !elements.is_empty()
            && self.is_closed(elements)
            && elements.iter().all(|e| {
                self.inverse(e.as_ref())
                    .is_some_and(|inv| elements.contains(inv.as_ref()))
            })
    }
}

/// A new-type which [`Display`]s an element of a [`Group`] followed by its
/// [description](Group::describe).  Created by [`Group::display`].
pub struct Described<'a, G: Group> {
    group: &'a G,
    elem: &'a G::View,
}

impl<G: Group> Display for Described<'_, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.elem)?;
        if let Some(desc) = self.group.describe(self.elem) {
            write!(f, " - {}", desc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{Display, Formatter};

    use itertools::Itertools;
    use quickcheck_macros::quickcheck;

    use crate::{Degree, SymmetricGroup};

    use super::{Group, GroupSet};

    /// Integers modulo `n` under addition, with only the non-zero residues being describable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Residue(u8);

    impl AsRef<Residue> for Residue {
        fn as_ref(&self) -> &Residue {
            self
        }
    }

    impl Display for Residue {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    struct Cyclic(u8);

    impl Group for Cyclic {
        type View = Residue;
        type Element = Residue;

        fn identity(&self) -> Residue {
            Residue(0)
        }

        fn compose(&self, lhs: &Residue, rhs: &Residue) -> Option<Residue> {
            // Residues out of range can't be composed
            (lhs.0 < self.0 && rhs.0 < self.0).then(|| Residue((lhs.0 + rhs.0) % self.0))
        }

        fn describe(&self, elem: &Residue) -> Option<String> {
            (elem.0 != 0).then(|| format!("-{}", self.0 - elem.0))
        }

        fn cardinality_bound(&self) -> usize {
            self.0 as usize
        }
    }

    fn residues(vals: &[u8]) -> GroupSet<Cyclic> {
        vals.iter().map(|&v| Residue(v)).collect()
    }

    #[test]
    fn order_and_powers() {
        let z12 = Cyclic(12);
        assert_eq!(z12.order(&Residue(0)), Some(1));
        assert_eq!(z12.order(&Residue(1)), Some(12));
        assert_eq!(z12.order(&Residue(8)), Some(3));
        assert_eq!(z12.order(&Residue(13)), None);
        assert_eq!(
            z12.powers(&Residue(4)),
            Some(vec![Residue(4), Residue(8), Residue(0)])
        );
        assert_eq!(z12.inverse(&Residue(5)), Some(Residue(7)));
        assert_eq!(z12.inverse(&Residue(0)), Some(Residue(0)));
    }

    #[test]
    fn compose_all() {
        let z5 = Cyclic(5);
        assert_eq!(z5.compose_all(Vec::<Residue>::new()), Some(Residue(0)));
        assert_eq!(
            z5.compose_all([Residue(2), Residue(4), Residue(3)]),
            Some(Residue(4))
        );
        assert_eq!(z5.compose_all([Residue(2), Residue(9)]), None);
    }

    #[test]
    fn generate_subgroup() {
        let z12 = Cyclic(12);
        assert_eq!(
            z12.generate_subgroup([Residue(8)]),
            Some(residues(&[0, 4, 8]))
        );
        assert_eq!(
            z12.generate_subgroup([Residue(8), Residue(6)]),
            Some(residues(&[0, 2, 4, 6, 8, 10]))
        );
        assert_eq!(z12.generate_subgroup([Residue(5)]).map(|s| s.len()), Some(12));
        // Duplicate generators are only used once
        assert_eq!(
            z12.generate_subgroup([Residue(0), Residue(0)]),
            Some(residues(&[0]))
        );
        assert_eq!(z12.generate_subgroup(Vec::<Residue>::new()), Some(residues(&[])));
        assert_eq!(z12.generate_subgroup([Residue(3), Residue(20)]), None);
    }

    #[quickcheck]
    fn generated_subgroups_are_closed(num_points: u8, seeds: Vec<usize>) -> bool {
        // Up to 3 arbitrary generators on at most 5 points
        let degree = Degree::new(num_points % 5 + 1);
        let extent = degree.extent().collect_vec();
        let generators = seeds
            .iter()
            .take(3)
            .map(|s| &extent[s % extent.len()])
            .collect_vec();
        let has_generators = !generators.is_empty();

        let s_n = SymmetricGroup::new(degree);
        let subgroup = s_n.generate_subgroup(generators).unwrap();
        s_n.is_closed(&subgroup) && (s_n.is_subgroup(&subgroup) == has_generators)
    }

    #[test]
    fn closure_checks() {
        let z6 = Cyclic(6);
        assert!(z6.is_subgroup(&residues(&[0, 2, 4])));
        assert!(z6.is_subgroup(&residues(&[0])));
        assert!(!z6.is_subgroup(&residues(&[])));
        assert!(z6.is_closed(&residues(&[])));
        assert!(!z6.is_closed(&residues(&[0, 1])));
    }

    #[test]
    fn conjugation_in_abelian_group() {
        let z7 = Cyclic(7);
        for a in 0..7 {
            for b in 0..7 {
                assert_eq!(z7.conjugate_by(&Residue(a), &Residue(b)), Some(Residue(a)));
            }
        }
    }

    #[test]
    fn display() {
        let z6 = Cyclic(6);
        assert_eq!(z6.display(&Residue(2)).to_string(), "2 - -4");
        assert_eq!(z6.display(&Residue(0)).to_string(), "0");
    }
}
