use crate::{Degree, InvalidPermError, Point};

/// Given some [`Point`]s and a [`Degree`], simultaneously check for duplicate [`Point`]s and any
/// [`Point`]s which are too big for the given [`Degree`].
pub(crate) fn check_duplicate_or_out_of_range(
    points: impl IntoIterator<Item = Point>,
    degree: Degree,
) -> Result<(), InvalidPermError> {
    // We check validity by keeping a checklist of which `Point`s we've seen, and checking off
    // each point as we go.  We don't need to look for gaps in the checklist afterwards because
    // (by the Pigeon Hole Principle) fitting `n` points into `n` slots with a gap would require a
    // point to either be out of range or share a slot.
    let mut checklist = vec![false; degree.num_points()];
    for p in points {
        match checklist.get_mut(p.index()) {
            None => return Err(InvalidPermError::PointOutOfRange(p, degree)),
            Some(&mut true) => return Err(InvalidPermError::DuplicatePoint(p)),
            Some(x) => *x = true,
        }
    }
    Ok(())
}

/// Converts the length of a list of points into a [`Degree`], failing if the length is zero or
/// too large to fit in a [`Degree`].
pub(crate) fn degree_of_len(len: usize) -> Result<Degree, InvalidPermError> {
    let num_points = u8::try_from(len).map_err(|_| InvalidPermError::TooManyPoints(len))?;
    Ok(Degree::try_from(num_points)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_of_len_bounds() {
        assert_eq!(degree_of_len(0), Err(InvalidPermError::NoPoints));
        assert_eq!(degree_of_len(1), Ok(Degree::ONE));
        assert_eq!(degree_of_len(255), Ok(Degree::new(255)));
        assert_eq!(degree_of_len(256), Err(InvalidPermError::TooManyPoints(256)));
    }
}
