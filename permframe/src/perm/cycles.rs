//! Disjoint-cycle decomposition of permutations, and the cycle notation which describes it.

use std::fmt::{Display, Formatter};

use crate::{Degree, InvalidPermError, Perm, PermBuf, Point};

impl Perm {
    /// Decomposes this `Perm` into disjoint cycles.  Points are scanned in increasing order, and
    /// each new cycle starts at the smallest point not already seen and then follows the images
    /// of the permutation until it gets back to its start.  Fixed points form cycles of length 1,
    /// so every [`Point`] appears in exactly one cycle.
    ///
    /// # Example
    /// ```
    /// use permframe::{PermBuf, Point};
    ///
    /// let cycles = PermBuf::parse("ADBC")?.cycles();
    /// let names = cycles
    ///     .iter()
    ///     .map(|c| c.iter().map(|p| p.to_string()).collect::<String>())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(names, ["A", "BDC"]);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn cycles(&self) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.degree().num_points()];
        let mut cycles = Vec::new();
        for start in self.degree().points() {
            if visited[start.index()] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut next = start;
            loop {
                visited[next.index()] = true;
                cycle.push(next);
                next = self[next.index()];
                if next == start {
                    break;
                }
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Returns a value which [`Display`]s this `Perm` in cycle notation.  Unlike
    /// [`Perm::to_cycle_string`], this never fails because points without letters are displayed
    /// using their [`name`](Point::name).
    pub fn cycle_notation(&self) -> CycleNotation<'_> {
        CycleNotation(self)
    }

    /// Writes this `Perm` in cycle notation, e.g. `(A)(BDC)` for a permutation which fixes `A`
    /// and sends `B` to `D`, `D` to `C` and `C` to `B`.  Returns `None` if any [`Point`] has no
    /// letter.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, PermBuf};
    ///
    /// assert_eq!(PermBuf::parse("ADBC")?.to_cycle_string().as_deref(), Some("(A)(BDC)"));
    /// assert_eq!(PermBuf::parse("BADC")?.to_cycle_string().as_deref(), Some("(AB)(CD)"));
    /// assert_eq!(PermBuf::identity(Degree::new(30)).to_cycle_string(), None);
    /// # Ok::<(), permframe::InvalidPermError>(())
    /// ```
    pub fn to_cycle_string(&self) -> Option<String> {
        let mut s = String::with_capacity(self.degree().num_points() * 2);
        for cycle in self.cycles() {
            s.push('(');
            for point in cycle {
                s.push(point.to_letter()?);
            }
            s.push(')');
        }
        Some(s)
    }
}

impl PermBuf {
    /// Parses a `PermBuf` of a given [`Degree`] from cycle notation such as `(A)(BDC)`.  Points
    /// which aren't mentioned are fixed, so `(BDC)` on 4 points is the same as `(A)(BDC)`.
    /// Whitespace between cycles is ignored.
    ///
    /// # Example
    /// ```
    /// use permframe::{Degree, InvalidPermError, PermBuf};
    ///
    /// let degree = Degree::new(4);
    /// assert_eq!(PermBuf::parse_cycles("(A)(BDC)", degree)?, PermBuf::parse("ADBC")?);
    /// assert_eq!(PermBuf::parse_cycles("(BDC)", degree)?, PermBuf::parse("ADBC")?);
    /// assert_eq!(PermBuf::parse_cycles("", degree)?, PermBuf::identity(degree));
    /// assert_eq!(
    ///     PermBuf::parse_cycles("(AB", degree),
    ///     Err(InvalidPermError::UnbalancedCycle)
    /// );
    /// # Ok::<(), InvalidPermError>(())
    /// ```
    pub fn parse_cycles(s: &str, degree: Degree) -> Result<PermBuf, InvalidPermError> {
        let mut images: Vec<Option<Point>> = vec![None; degree.num_points()];
        let mut seen = vec![false; degree.num_points()];
        // The points of the cycle currently being read, or `None` if we're between cycles
        let mut current: Option<Vec<Point>> = None;

        for c in s.chars() {
            match (c, &mut current) {
                ('(', None) => current = Some(Vec::new()),
                (')', Some(cycle)) => {
                    for (&from, &to) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
                        images[from.index()] = Some(to);
                    }
                    current = None;
                }
                ('(' | ')', _) => return Err(InvalidPermError::UnbalancedCycle),
                (c, None) if c.is_whitespace() => {}
                (_, None) => return Err(InvalidPermError::UnbalancedCycle),
                (c, Some(cycle)) => {
                    let point = Point::from_letter(c).ok_or(InvalidPermError::InvalidLetter(c))?;
                    match seen.get_mut(point.index()) {
                        None => return Err(InvalidPermError::PointOutOfRange(point, degree)),
                        Some(&mut true) => return Err(InvalidPermError::DuplicatePoint(point)),
                        Some(x) => *x = true,
                    }
                    cycle.push(point);
                }
            }
        }
        if current.is_some() {
            return Err(InvalidPermError::UnbalancedCycle);
        }

        let points = images
            .into_iter()
            .zip(degree.points())
            .map(|(image, point)| image.unwrap_or(point));
        // This unsafety is OK: each point appears in at most one cycle, and every cycle is a
        // bijection on its own points
        Ok(unsafe { PermBuf::from_point_iter_unchecked(points) })
    }
}

/// A new-type over a [`Perm`] which [`Display`]s it in cycle notation.  Created by
/// [`Perm::cycle_notation`].
#[derive(Debug, Clone, Copy)]
pub struct CycleNotation<'p>(&'p Perm);

impl Display for CycleNotation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for cycle in self.0.cycles() {
            write!(f, "(")?;
            for point in cycle {
                write!(f, "{}", point)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use crate::{Degree, InvalidPermError, PermBuf, Point};

    #[test]
    fn cycle_strings() {
        #[track_caller]
        fn check(perm: &str, exp_cycles: &str) {
            let perm = PermBuf::parse(perm).unwrap();
            assert_eq!(perm.to_cycle_string().as_deref(), Some(exp_cycles));
            assert_eq!(perm.cycle_notation().to_string(), exp_cycles);
        }

        check("A", "(A)");
        check("ABC", "(A)(B)(C)");
        check("BCA", "(ABC)");
        check("CAB", "(ACB)");
        check("ADBC", "(A)(BDC)");
        check("ACDB", "(A)(BCD)");
        check("BADC", "(AB)(CD)");
        check("DCBA", "(AD)(BC)");
    }

    #[test]
    fn unnamed_points() {
        let big = PermBuf::reversal(Degree::new(28));
        assert_eq!(big.to_cycle_string(), None);
        assert!(big.cycle_notation().to_string().starts_with("(A<28>)(B<27>)"));
    }

    #[test]
    fn parse_cycles_err() {
        #[track_caller]
        fn check(s: &str, exp_err: InvalidPermError) {
            assert_eq!(PermBuf::parse_cycles(s, Degree::new(4)), Err(exp_err));
        }

        let letter = |c| Point::from_letter(c).unwrap();
        check("(AB", InvalidPermError::UnbalancedCycle);
        check("AB)", InvalidPermError::UnbalancedCycle);
        check("((AB))", InvalidPermError::UnbalancedCycle);
        check("(AB)C", InvalidPermError::UnbalancedCycle);
        check("(Ab)", InvalidPermError::InvalidLetter('b'));
        check("(AB)(BC)", InvalidPermError::DuplicatePoint(letter('B')));
        check(
            "(AE)",
            InvalidPermError::PointOutOfRange(letter('E'), Degree::new(4)),
        );
    }

    #[test]
    fn parse_cycles_lenient() {
        let degree = Degree::new(5);
        let exp = PermBuf::parse("BACDE").unwrap();
        assert_eq!(PermBuf::parse_cycles("(AB)", degree), Ok(exp.clone()));
        assert_eq!(PermBuf::parse_cycles(" (AB) (C)() ", degree), Ok(exp));
    }

    #[quickcheck]
    fn cycles_partition_points(perm: PermBuf) -> bool {
        let mut points = perm.cycles().concat();
        points.sort();
        points == perm.degree().points().collect::<Vec<_>>()
    }

    #[quickcheck]
    fn cycle_string_round_trip(perm: PermBuf) -> bool {
        let s = perm.to_cycle_string().unwrap();
        PermBuf::parse_cycles(&s, perm.degree()) == Ok(perm)
    }
}
