//! Lazy enumeration of every permutation of a [`Degree`].

use std::iter::FusedIterator;

use crate::{Degree, PermBuf, Point};

/// An [`Iterator`] over every [`PermBuf`] of some [`Degree`], in lexicographic order.  Created by
/// [`Degree::extent`].
///
/// Permutations are built by backtracking: the prefix of the permutation is extended one point at
/// a time with the smallest point that hasn't yet been used or tried at that position.  The
/// recursion is unrolled into an explicit stack, so each permutation is only produced when it's
/// asked for.
#[derive(Debug, Clone)]
pub struct Extent {
    degree: Degree,
    /// The points placed so far
    prefix: Vec<Point>,
    /// `used[i]` is `true` if `Point::from_index(i)` is in `prefix`
    used: Vec<bool>,
    /// `next_candidates[d]` is the smallest point which hasn't yet been tried at depth `d`.  This
    /// always has length `prefix.len() + 1`, except when the enumeration is finished (when it's
    /// empty).
    next_candidates: Vec<u8>,
}

impl Extent {
    pub(crate) fn new(degree: Degree) -> Self {
        Self {
            degree,
            prefix: Vec::with_capacity(degree.num_points()),
            used: vec![false; degree.num_points()],
            next_candidates: vec![0],
        }
    }

    /// The [`Degree`] of the permutations being generated
    pub fn degree(&self) -> Degree {
        self.degree
    }
}

impl Iterator for Extent {
    type Item = PermBuf;

    fn next(&mut self) -> Option<PermBuf> {
        let num_points = self.degree.num_points_u8();
        // Every loop iteration either places one more point or backtracks by one point
        while let Some(candidate) = self.next_candidates.last_mut() {
            let mut idx = *candidate;
            while idx < num_points && self.used[idx as usize] {
                idx += 1;
            }
            if idx == num_points {
                // Every point has been tried at this depth, so backtrack
                self.next_candidates.pop();
                if let Some(point) = self.prefix.pop() {
                    self.used[point.index()] = false;
                }
                continue;
            }

            *candidate = idx + 1;
            self.used[idx as usize] = true;
            self.prefix.push(Point::from_index(idx));
            if self.prefix.len() == self.degree.num_points() {
                // SAFETY: `prefix` contains every point below `num_points` exactly once, because
                // `used` stops any point being placed twice
                let perm = unsafe { PermBuf::from_vec_unchecked(self.prefix.clone()) };
                // Remove the last point again, so that the next call carries on from this depth
                self.prefix.pop();
                self.used[idx as usize] = false;
                return Some(perm);
            }
            self.next_candidates.push(0);
        }
        None
    }
}

impl FusedIterator for Extent {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Degree, PermBuf};

    #[test]
    fn small_extents() {
        #[track_caller]
        fn check(num_points: u8, exp_extent: &[&str]) {
            let extent = Degree::new(num_points)
                .extent()
                .map(|p| p.to_string())
                .collect_vec();
            assert_eq!(extent, exp_extent);
        }

        check(1, &["A"]);
        check(2, &["AB", "BA"]);
        check(3, &["ABC", "ACB", "BAC", "BCA", "CAB", "CBA"]);
    }

    #[test]
    fn extent_sizes() {
        for n in 1..=6u8 {
            let degree = Degree::new(n);
            let extent = degree.extent().collect_vec();
            assert_eq!(Some(extent.len()), degree.num_perms());
            // Lexicographic order implies that every permutation is distinct
            assert!(extent.iter().tuple_windows().all(|(a, b)| a < b));
            assert_eq!(extent.first(), Some(&PermBuf::identity(degree)));
            assert!(extent.last().unwrap().is_reversal());
        }
    }

    #[test]
    fn restartable() {
        let degree = Degree::new(4);
        let mut first = degree.extent();
        first.nth(5);
        // Starting a new enumeration doesn't depend on the old one
        assert_eq!(degree.extent().count(), 24);
        assert_eq!(first.count(), 24 - 6);
    }

    #[test]
    fn fused() {
        let mut extent = Degree::ONE.extent();
        assert!(extent.next().is_some());
        assert!(extent.next().is_none());
        assert!(extent.next().is_none());
    }
}
