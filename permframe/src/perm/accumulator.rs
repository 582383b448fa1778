use std::ops::MulAssign;

use crate::{Degree, IncompatibleDegrees, Perm, PermBuf};

/// A struct which lets you compose many permutations together, whilst reusing the same
/// allocations.
#[derive(Debug, Clone)]
pub struct PermAccumulator {
    total: PermBuf,
    temp: PermBuf,
}

impl PermAccumulator {
    /// Creates a `PermAccumulator` with an accumulated value of the
    /// [identity](PermBuf::identity)
    #[inline]
    pub fn identity(degree: Degree) -> Self {
        Self::new(PermBuf::identity(degree))
    }

    /// Creates a `PermAccumulator` with a given accumulated value
    #[inline]
    pub fn new(total: PermBuf) -> Self {
        Self {
            temp: PermBuf::identity(total.degree()),
            total,
        }
    }

    /// The [`Degree`] of the accumulated value
    #[inline]
    pub fn degree(&self) -> Degree {
        self.total.degree()
    }

    /// Performs `self = self ∘ perm`
    #[inline]
    #[track_caller]
    pub fn post_accumulate(&mut self, perm: &Perm) {
        self.total.compose_into(perm, &mut self.temp); // Compose `total` into `temp`
        std::mem::swap(&mut self.total, &mut self.temp); // Swap the result back into `total`
    }

    /// Performs `self = self ∘ perm`, returning an error (and leaving `self` unchanged) if the
    /// [`Degree`]s don't match.
    pub fn try_post_accumulate(&mut self, perm: &Perm) -> Result<(), IncompatibleDegrees> {
        IncompatibleDegrees::test_err(self.degree(), perm.degree())?;
        // This unsafety is OK because we've just checked the degrees
        unsafe { self.post_accumulate_unchecked(perm) };
        Ok(())
    }

    /// Performs `self = self ∘ perm`, without checking that the [`Degree`]s match.
    ///
    /// # Safety
    ///
    /// This is safe if `perm.degree() == self.degree()`.
    #[inline]
    pub unsafe fn post_accumulate_unchecked(&mut self, perm: &Perm) {
        self.total.compose_into_unchecked(perm, &mut self.temp);
        std::mem::swap(&mut self.total, &mut self.temp);
    }

    /// Performs `self = perm ∘ self`
    #[inline]
    #[track_caller]
    pub fn pre_accumulate(&mut self, perm: &Perm) {
        perm.compose_into(&self.total, &mut self.temp);
        std::mem::swap(&mut self.total, &mut self.temp);
    }

    /// Sets the accumulated value of `self`
    #[inline]
    pub fn set(&mut self, perm: &Perm) {
        self.total.overwrite_from(perm);
    }

    /// Gets the accumulated value of `self`
    #[inline]
    pub fn total(&self) -> &Perm {
        &self.total
    }

    /// Gets the accumulated value, consuming `self`
    #[inline]
    pub fn into_total(self) -> PermBuf {
        self.total
    }
}

impl MulAssign<&Perm> for PermAccumulator {
    #[inline]
    #[track_caller]
    fn mul_assign(&mut self, rhs: &Perm) {
        self.post_accumulate(rhs)
    }
}

impl MulAssign<&PermBuf> for PermAccumulator {
    #[inline]
    #[track_caller]
    fn mul_assign(&mut self, rhs: &PermBuf) {
        self.post_accumulate(rhs)
    }
}
