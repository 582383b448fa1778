use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    ops::{Index, Mul, MulAssign, Not},
};

use crate::{Degree, IncompatibleDegrees, PermBuf, Point};

use super::PermAccumulator;

pub type PointIter<'a> = std::iter::Copied<std::slice::Iter<'a, Point>>;

/// A borrowed permutation of [`Point`]s.  This is to [`PermBuf`] what [`str`] is to [`String`].
///
/// The `i`th [`Point`] of a `Perm` is the image of the `i`th point, so `BCA` sends `A` to `B`,
/// `B` to `C` and `C` back to `A`.
///
/// `Perm`s and [`PermBuf`]s must always be valid permutations - i.e. they must contain every
/// [`Point`] up to their [`Degree`] once and precisely once.  This is only checked in the
/// constructors and then used as assumed knowledge to avoid further checks.  This is similar to
/// how [`&str`](str) and [`String`] are required to be valid UTF-8.
///
/// # Example
/// ```
/// use permframe::{Degree, InvalidPermError, PermBuf, Point};
///
/// // The identity is always valid on any `Degree`
/// let identity = PermBuf::identity(Degree::new(5));
/// assert_eq!(identity.degree(), Degree::new(5));
/// assert_eq!(identity.to_string(), "ABCDE");
///
/// // Parse a permutation from its letters.  This could fail if the letters don't form a valid
/// // permutation, so we use ? to propagate that error out of the current function.
/// let perm = PermBuf::parse("CAB")?;
/// assert_eq!(perm.degree(), Degree::new(3));
///
/// // If we try to parse an invalid `Perm`, we get an error.  This means that we can assume that
/// // all `Perm`s are bijections
/// assert_eq!(
///     PermBuf::parse("ABCA"),
///     Err(InvalidPermError::DuplicatePoint(Point::from_letter('A').unwrap()))
/// );
/// # Ok::<(), InvalidPermError>(())
/// ```
#[derive(Eq, PartialEq, PartialOrd, Ord, Hash)]
#[repr(transparent)] // Required so we can safely cast between &[Point] and &Perm
pub struct Perm {
    /// The image of each [`Point`].  Because of the 'valid permutation' invariant, this can't
    /// contain duplicate [`Point`]s or any [`Point`]s outside the [`Degree`] of this `Perm`.
    point_slice: [Point],
}

impl Perm {
    /// Returns the [`Degree`] of this `Perm`.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::identity(Degree::new(7)).degree(), Degree::new(7));
    /// assert_eq!(PermBuf::parse("BCAD")?.degree(), Degree::new(4));
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    #[inline]
    pub fn degree(&self) -> Degree {
        // Can't truncate or be zero, because every `Perm` contains between 1 and 255 points
        Degree::new(self.point_slice.len() as u8)
    }

    /// Returns the underlying slice of [`Point`]s.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.point_slice
    }

    /// Returns an iterator over the [`Point`]s in this `Perm`.
    #[inline]
    pub fn point_iter(&self) -> PointIter {
        self.point_slice.iter().copied()
    }

    /// Returns an iterator over the 0-indexed images of every point.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// let indices = PermBuf::parse("CAB")?.indices().collect::<Vec<_>>();
    /// assert_eq!(indices, [2, 0, 1]);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.point_iter().map(Point::index)
    }

    /// Checks whether this `Perm` maps every [`Point`] to itself.  `x.is_identity()` is an
    /// optimised version of `x == PermBuf::identity(x.degree())`.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert!(PermBuf::identity(Degree::new(12)).is_identity());
    /// assert!(!PermBuf::parse("ACB")?.is_identity());
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn is_identity(&self) -> bool {
        self.point_iter().enumerate().all(|(i, p)| p.index() == i)
    }

    /// Checks whether this `Perm` reverses the order of every [`Point`].  `x.is_reversal()` is an
    /// optimised version of `x == PermBuf::reversal(x.degree())`.
    pub fn is_reversal(&self) -> bool {
        self.point_iter()
            .rev()
            .enumerate()
            .all(|(i, p)| p.index() == i)
    }

    /// Swap two images in this `Perm`, panicking if either of the indices are out of bounds.
    /// Swapping two images of a bijection always gives another bijection.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// let mut perm = PermBuf::identity(Degree::new(4));
    /// perm.swap(0, 1); // Note we are using 0-indexing
    /// assert_eq!(perm.to_string(), "BACD");
    /// perm.swap(1, 3);
    /// assert_eq!(perm.to_string(), "BDCA");
    /// ```
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.point_slice.swap(a, b);
    }

    /// Overwrite `self` in-place with the contents of another `Perm`, panicking if the
    /// [`Degree`]s don't match.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// let mut perm = PermBuf::identity(Degree::new(3));
    /// perm.copy_from(&PermBuf::parse("CAB")?);
    /// assert_eq!(perm.to_string(), "CAB");
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    #[track_caller]
    pub fn copy_from(&mut self, other: &Perm) {
        self.check_degree(other);
        self.point_slice.copy_from_slice(&other.point_slice);
    }

    /* COMPOSITION */

    /// Composes two `Perm`s as functions, returning `self ∘ rhs` (i.e. `rhs` is applied first, so
    /// `result[i] = self[rhs[i]]`).  Returns an [`IncompatibleDegrees`] error if the [`Degree`]s
    /// don't match.  This is like using the `*` operator, except that it returns a [`Result`]
    /// instead of [`panic!`]ing.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// let abc = PermBuf::parse("ABC")?;
    /// let cab = PermBuf::parse("CAB")?;
    /// assert_eq!(abc.try_compose(&abc), Ok(abc.clone()));
    /// assert_eq!(abc.try_compose(&cab), Ok(cab.clone()));
    /// assert_eq!(cab.try_compose(&abc), Ok(cab.clone()));
    /// // Composing permutations of different degrees is an error, but never undefined behaviour
    /// assert_eq!(
    ///     cab.try_compose(&PermBuf::parse("BADC")?).unwrap_err().to_string(),
    ///     "Incompatible degrees: 3 points (lhs), 4 points (rhs)"
    /// );
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn try_compose(&self, rhs: &Perm) -> Result<PermBuf, IncompatibleDegrees> {
        IncompatibleDegrees::test_err(self.degree(), rhs.degree())?;
        // This unsafety is OK because both `Perm`s are valid and we've checked their degrees
        Ok(unsafe { self.compose_unchecked(rhs) })
    }

    /// Composes two `Perm`s without checking that their [`Degree`]s match.
    ///
    /// # Safety
    ///
    /// This is safe if `self` and `rhs` have the same [`Degree`].
    pub unsafe fn compose_unchecked(&self, rhs: &Perm) -> PermBuf {
        // The composition of two bijections on the same points is always a bijection
        PermBuf::from_point_iter_unchecked(rhs.point_iter().map(|p| self.point_slice[p.index()]))
    }

    /// Composes two `Perm`s, storing the result in an existing [`PermBuf`] (thus reusing its
    /// allocation).  The [`Degree`] of `out` is changed if needed.
    #[track_caller]
    pub fn compose_into(&self, rhs: &Perm, out: &mut PermBuf) {
        self.check_degree(rhs);
        // This unsafety is OK because we've just checked that the degrees match
        unsafe { self.compose_into_unchecked(rhs, out) }
    }

    /// Composes two `Perm`s into an existing [`PermBuf`], without checking the [`Degree`]s.
    ///
    /// # Safety
    ///
    /// This is safe if `self` and `rhs` have the same [`Degree`].
    pub unsafe fn compose_into_unchecked(&self, rhs: &Perm, out: &mut PermBuf) {
        out.point_vec.clear();
        out.point_vec
            .extend(rhs.point_iter().map(|p| self.point_slice[p.index()]));
    }

    /// Composes a left-to-right chain of `Perm`s, so `[a, b, c]` becomes `a ∘ b ∘ c`.  This
    /// returns `Ok(None)` if the chain is empty, and stops at the first pair of [`Degree`]s that
    /// don't match.
    ///
    /// # Example
    /// ```
    /// use permframe::{Perm, PermBuf};
    ///
    /// let t = PermBuf::parse("ADBC")?;
    /// let v = PermBuf::parse("BCDA")?;
    /// // Conjugate `v` by `t`
    /// let conj = Perm::compose_all([&!&t, &v, &t])?;
    /// assert_eq!(conj, Some(PermBuf::parse("CADB")?));
    /// assert_eq!(Perm::compose_all(Vec::<PermBuf>::new())?, None);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compose_all(
        perms: impl IntoIterator<Item = impl AsRef<Perm>>,
    ) -> Result<Option<PermBuf>, IncompatibleDegrees> {
        let mut perms = perms.into_iter();
        let first = match perms.next() {
            Some(p) => p,
            None => return Ok(None),
        };
        let mut acc = PermAccumulator::new(first.as_ref().to_owned());
        for p in perms {
            acc.try_post_accumulate(p.as_ref())?;
        }
        Ok(Some(acc.into_total()))
    }

    /// Finds the inverse of a `Perm`.  If `X` is the input `Perm`, and `Y = X.inv()`, then
    /// `X ∘ Y = Y ∘ X = I` where `I` is the identity.  This cannot fail, since every bijection has
    /// an inverse.  This is equivalent to using the `!` operator.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::parse("CAB")?.inv(), PermBuf::parse("BCA")?);
    /// // The reversal is self-inverse
    /// let rev = PermBuf::reversal(Degree::new(6));
    /// assert_eq!(!&*rev, rev);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn inv(&self) -> PermBuf {
        let mut inv_points = vec![Point::FIRST; self.degree().num_points()];
        for (i, p) in self.point_iter().enumerate() {
            inv_points[p.index()] = Point::from_index(i as u8);
        }
        // The inverse of a bijection is a bijection on the same points
        unsafe { PermBuf::from_vec_unchecked(inv_points) }
    }

    /// Calculates the inverse of this `Perm`, storing the result in an existing [`PermBuf`].
    /// This resizes `out` to the right [`Degree`] if needed.
    pub fn inv_into_buf(&self, out: &mut PermBuf) {
        let len = self.point_slice.len();
        match out.point_vec.len().cmp(&len) {
            Ordering::Less => out.point_vec.resize(len, Point::FIRST),
            Ordering::Greater => out.point_vec.truncate(len),
            Ordering::Equal => {}
        }
        for (i, p) in self.point_iter().enumerate() {
            out.point_vec[p.index()] = Point::from_index(i as u8);
        }
    }

    /// Raises `self` to some (possibly negative) `exponent`
    pub fn pow_i(&self, exponent: isize) -> PermBuf {
        if exponent < 0 {
            self.inv().pow_u(exponent.unsigned_abs())
        } else {
            self.pow_u(exponent as usize)
        }
    }

    /// Raises `self` to some positive `exponent`, by repeated squaring.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// let bcda = PermBuf::parse("BCDA")?;
    /// assert_eq!(bcda.pow_u(0).to_string(), "ABCD");
    /// assert_eq!(bcda.pow_u(2).to_string(), "CDAB");
    /// assert_eq!(bcda.pow_u(4001).to_string(), "BCDA");
    /// assert_eq!(bcda.pow_i(-1).to_string(), "DABC");
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn pow_u(&self, mut exponent: usize) -> PermBuf {
        let mut accumulator = PermAccumulator::identity(self.degree());
        let mut square = self.to_owned();
        while exponent > 0 {
            if exponent & 1 == 1 {
                // Powers of one permutation commute, so the order of accumulation is irrelevant
                accumulator.post_accumulate(&square);
            }
            exponent >>= 1;
            if exponent > 0 {
                square = &square * &square;
            }
        }
        accumulator.into_total()
    }

    /// Conjugates `self` by `by`, returning `by⁻¹ ∘ self ∘ by`.
    pub fn conjugate_by(&self, by: &Perm) -> Result<PermBuf, IncompatibleDegrees> {
        IncompatibleDegrees::test_err(self.degree(), by.degree())?;
        Ok(by.inv() * self * by)
    }

    /* ORDER AND POWERS */

    /// Gets the smallest non-zero number `n` such that `self.pow_u(n).is_identity()`.  This
    /// always terminates, and the result always divides `n!` where `n` is the number of points.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// assert_eq!(PermBuf::parse("BCA")?.order(), 3);
    /// assert_eq!(PermBuf::parse("BADC")?.order(), 2);
    /// assert_eq!(PermBuf::parse("BCAED")?.order(), 6);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn order(&self) -> usize {
        let mut accum = PermAccumulator::identity(self.degree());
        let mut count = 0;
        loop {
            // Safe, because the accumulator has the same degree as `self` for every iteration
            unsafe { accum.post_accumulate_unchecked(self) };
            count += 1;
            if accum.total().is_identity() {
                return count;
            }
        }
    }

    /// Generates every power of `self`, starting with `self` and ending with the identity.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// assert_eq!(
    ///     PermBuf::parse("BCDA")?.closure(),
    ///     vec![
    ///         PermBuf::parse("BCDA")?,
    ///         PermBuf::parse("CDAB")?,
    ///         PermBuf::parse("DABC")?,
    ///         PermBuf::parse("ABCD")?,
    ///     ]
    /// );
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn closure(&self) -> Vec<PermBuf> {
        let mut closure = vec![self.to_owned()];
        let mut last = self.to_owned();
        while !last.is_identity() {
            // This unsafety is OK, because `last` and `self` have the same degree
            last = unsafe { last.compose_unchecked(self) };
            closure.push(last.clone());
        }
        closure
    }

    /// Generates every power of `self`, but starting at the identity rather than `self`.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// let powers = PermBuf::parse("BCA")?
    ///     .closure_from_identity()
    ///     .iter()
    ///     .map(|p| p.to_string())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(powers, ["ABC", "BCA", "CAB"]);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn closure_from_identity(&self) -> Vec<PermBuf> {
        let mut closure = vec![PermBuf::identity(self.degree())];
        loop {
            let last = &closure[closure.len() - 1];
            // This unsafety is OK, because `last` and `self` have the same degree
            let next = unsafe { last.compose_unchecked(self) };
            if next.is_identity() {
                return closure;
            }
            closure.push(next);
        }
    }

    /* FORMATTING */

    /// Converts this `Perm` into its string of letters, or `None` if it contains a [`Point`]
    /// which has no letter name.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::parse("DCAB")?.to_letters(), Some("DCAB".to_owned()));
    /// assert_eq!(PermBuf::identity(Degree::new(27)).to_letters(), None);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn to_letters(&self) -> Option<String> {
        self.point_iter().map(Point::to_letter).collect()
    }

    /* UNSAFE CONSTRUCTORS */

    /// Creates a `&Perm` from a `&[Point]`, **without** checking that the slice forms a valid
    /// permutation.
    ///
    /// # Safety
    ///
    /// This is safe if `slice` is non-empty, has at most 255 items, and contains every [`Point`]
    /// below its length exactly once.
    #[inline]
    pub unsafe fn from_slice_unchecked(slice: &[Point]) -> &Perm {
        // The pointer cast is OK because `Perm` is a `#[repr(transparent)]` wrapper around
        // `[Point]`, and the cast doesn't change the lifetime of the underlying data
        &*(slice as *const [Point] as *const Perm)
    }

    /// Creates a `&mut Perm` from a `&mut [Point]`, **without** checking that the slice forms a
    /// valid permutation.
    ///
    /// # Safety
    ///
    /// This is safe under the same conditions as [`Perm::from_slice_unchecked`].
    #[inline]
    pub unsafe fn from_mut_slice_unchecked(slice: &mut [Point]) -> &mut Perm {
        &mut *(slice as *mut [Point] as *mut Perm)
    }

    #[track_caller]
    fn check_degree(&self, other: &Perm) {
        assert_eq!(
            self.degree(),
            other.degree(),
            "Degree mismatch: LHS has degree {:?} but RHS has degree {:?}",
            self.degree(),
            other.degree(),
        );
    }
}

impl AsRef<Perm> for Perm {
    #[inline]
    fn as_ref(&self) -> &Perm {
        self
    }
}

impl Index<usize> for Perm {
    type Output = Point;

    /// `perm[i]` gets the image of the `i`th point (0-indexed).
    ///
    /// # Panics
    ///
    /// Panics if `i >= perm.degree().num_points()`
    fn index(&self, index: usize) -> &Point {
        &self.point_slice[index]
    }
}

impl Not for &Perm {
    type Output = PermBuf;

    /// Finds the inverse of a [`Perm`].  See [`Perm::inv`].
    fn not(self) -> Self::Output {
        self.inv()
    }
}

impl Not for &PermBuf {
    type Output = PermBuf;

    fn not(self) -> Self::Output {
        self.inv()
    }
}

impl Not for PermBuf {
    type Output = PermBuf;

    fn not(self) -> Self::Output {
        self.inv()
    }
}

impl Mul for &Perm {
    type Output = PermBuf;

    /// Composes two [`Perm`]s without consuming either argument.  `a * b` is `a ∘ b`, so `b` is
    /// applied first.
    ///
    /// # Example
    /// ```
    /// use permframe::PermBuf;
    ///
    /// assert_eq!(
    ///     &PermBuf::parse("BCDA")? * &PermBuf::parse("BADC")?,
    ///     PermBuf::parse("CBAD")?
    /// );
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    ///
    /// ```should_panic
    /// use permframe::PermBuf;
    ///
    /// // Composing `Perm`s of different `Degree`s will panic rather than produce undefined
    /// // behaviour
    /// let _ = &*PermBuf::parse("BCDA")? * &*PermBuf::parse("BA")?;
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    #[inline]
    #[track_caller]
    fn mul(self, rhs: &Perm) -> Self::Output {
        self.check_degree(rhs);
        // This unsafety is OK because we've just checked that the degrees match
        unsafe { self.compose_unchecked(rhs) }
    }
}

macro_rules! mul_impl {
    ($lhs: ty, $rhs: ty) => {
        impl Mul<$rhs> for $lhs {
            type Output = PermBuf;

            /// Composes two permutations, applying the RHS first.
            #[inline]
            #[track_caller]
            fn mul(self, rhs: $rhs) -> Self::Output {
                self.as_perm() * rhs.as_perm()
            }
        }
    };
}

// Add impl for every pair within `PermBuf`, `&PermBuf` and `&Perm` (except `&Perm * &Perm`, which
// is implemented explicitly)
mul_impl!(PermBuf, PermBuf);
mul_impl!(PermBuf, &PermBuf);
mul_impl!(PermBuf, &Perm);
mul_impl!(&PermBuf, PermBuf);
mul_impl!(&PermBuf, &PermBuf);
mul_impl!(&PermBuf, &Perm);
mul_impl!(&Perm, PermBuf);
mul_impl!(&Perm, &PermBuf);

impl Perm {
    // Lets `mul_impl!` treat `&Perm` and `PermBuf` operands uniformly
    #[inline]
    fn as_perm(&self) -> &Perm {
        self
    }
}

impl MulAssign<&Perm> for PermBuf {
    #[track_caller]
    fn mul_assign(&mut self, rhs: &Perm) {
        *self = self.as_perm() * rhs;
    }
}

impl MulAssign<&PermBuf> for PermBuf {
    #[track_caller]
    fn mul_assign(&mut self, rhs: &PermBuf) {
        *self *= rhs.as_perm();
    }
}

impl MulAssign<PermBuf> for PermBuf {
    #[track_caller]
    fn mul_assign(&mut self, rhs: PermBuf) {
        *self *= rhs.as_perm();
    }
}

impl<'perm> IntoIterator for &'perm Perm {
    type Item = Point;
    type IntoIter = PointIter<'perm>;

    fn into_iter(self) -> Self::IntoIter {
        self.point_iter()
    }
}

////////////////
// FORMATTING //
////////////////

impl Debug for Perm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Perm({})", self)
    }
}

impl Display for Perm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for p in self.point_iter() {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use factorial::Factorial;
    use quickcheck_macros::quickcheck;

    use crate::{Degree, Perm, PermBuf};

    fn perm(s: &str) -> PermBuf {
        PermBuf::parse(s).unwrap()
    }

    #[test]
    fn compose_scenarios() {
        #[track_caller]
        fn check(lhs: &str, rhs: &str, exp: &str) {
            assert_eq!(perm(lhs).try_compose(&perm(rhs)), Ok(perm(exp)));
        }

        check("ABC", "ABC", "ABC");
        check("ABC", "CAB", "CAB");
        check("CAB", "ABC", "CAB");
        check("CAB", "BCA", "ABC"); // "BCA" is the inverse of "CAB"
        // `rhs` is applied first: B->A under BADC, then A->B under BCDA
        check("BCDA", "BADC", "CBAD");
        check("BADC", "BCDA", "ADCB");
    }

    #[test]
    fn compose_mismatch() {
        let err = perm("AB").try_compose(&perm("ABC")).unwrap_err();
        assert_eq!(err.lhs_degree(), Degree::new(2));
        assert_eq!(err.rhs_degree(), Degree::new(3));
        assert!(Perm::compose_all([perm("AB"), perm("BA"), perm("CAB")]).is_err());
    }

    #[test]
    fn compose_into_reuses_buffer() {
        let mut out = PermBuf::identity(Degree::new(9));
        perm("CAB").compose_into(&perm("BCA"), &mut out);
        assert_eq!(out, perm("ABC"));
        perm("CAB").inv_into_buf(&mut out);
        assert_eq!(out, perm("BCA"));
    }

    #[test]
    fn order() {
        #[track_caller]
        fn check(p: &str, exp_order: usize) {
            assert_eq!(perm(p).order(), exp_order);
        }

        check("A", 1);
        check("BA", 2);
        check("BCA", 3);
        check("ABCD", 1);
        check("BCDA", 4);
        check("BADC", 2);
        check("BCAED", 6);
        check("BCDEFGHA", 8);
    }

    #[test]
    fn closures() {
        let p = perm("CAB");
        assert_eq!(p.closure(), vec![perm("CAB"), perm("BCA"), perm("ABC")]);
        assert_eq!(perm("AB").closure(), vec![perm("AB")]);
        assert_eq!(perm("AB").closure_from_identity(), vec![perm("AB")]);
    }

    #[test]
    fn conjugation() {
        let t = perm("ADBC");
        let v = perm("BCDA");
        let conj = v.conjugate_by(&t).unwrap();
        assert_eq!(Perm::compose_all([&t.inv(), &v, &t]), Ok(Some(conj.clone())));
        // Conjugation preserves order
        assert_eq!(conj.order(), v.order());
        assert!(v.conjugate_by(&perm("BA")).is_err());
    }

    #[quickcheck]
    fn identity_is_neutral(p: PermBuf) -> bool {
        let id = PermBuf::identity(p.degree());
        &p * &id == p && &id * &p == p
    }

    #[quickcheck]
    fn inverse_cancels(p: PermBuf) -> bool {
        (&p * !&p).is_identity() && (!&p * &p).is_identity() && p.inv().inv() == p
    }

    #[quickcheck]
    fn order_divides_factorial(p: PermBuf) -> bool {
        let order = p.order();
        // Arbitrary degrees go up to 26, and 26! overflows a u64, so use the order's defining
        // property alongside divisibility where it's checkable
        let divides = match p.degree().num_points().checked_factorial() {
            Some(n_fact) => n_fact % order == 0,
            None => true,
        };
        divides && p.pow_u(order).is_identity() && p.closure().len() == order
    }

    #[quickcheck]
    fn pow_matches_repeated_composition(p: PermBuf, exp: u8) -> bool {
        let exp = exp as usize % 20;
        let mut expected = PermBuf::identity(p.degree());
        for _ in 0..exp {
            expected *= &p;
        }
        p.pow_u(exp) == expected && p.pow_i(-(exp as isize)) == expected.inv()
    }
}
