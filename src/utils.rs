#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Maps `f` over `0..len`, in parallel when the `parallel` feature is enabled.
///
/// Results keep index order either way.
#[inline]
pub fn map_indices<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..len).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..len).map(f).collect()
    }
}

/// Offsets `(d_row, d_col)` of the square ring at Chebyshev distance `ring` around a cell.
///
/// ```text
/// ring = 1        ring = 2
///                 x x x x x
/// x x x           x . . . x
/// x o x           x . o . x
/// x x x           x . . . x
///                 x x x x x
/// ```
///
/// Every cell of the ring is at least `ring` pixels from the centre, which is what lets the
/// raster search stop once `ring / distance_to_agreement` reaches the running minimum.
#[inline]
pub fn ring_offsets(ring: usize) -> impl Iterator<Item = (isize, isize)> {
    let k = ring as isize;
    (-k..=k).flat_map(move |d_row| {
        let step = if d_row.abs() == k {
            1
        } else {
            (2 * k).max(1) as usize
        };
        (-k..=k).step_by(step).map(move |d_col| (d_row, d_col))
    })
}

/// Checks that `values` never decreases.
#[inline]
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::{is_non_decreasing, map_indices, ring_offsets};

    #[test]
    fn ring_has_perimeter_cells_only() {
        let ring1: Vec<_> = ring_offsets(1).collect();
        assert_eq!(ring1.len(), 8);
        assert!(!ring1.contains(&(0, 0)));

        let ring2: Vec<_> = ring_offsets(2).collect();
        assert_eq!(ring2.len(), 16);
        assert!(
            ring2
                .iter()
                .all(|&(r, c)| r.abs().max(c.abs()) == 2)
        );
    }

    #[test]
    fn ring_zero_is_centre() {
        let ring0: Vec<_> = ring_offsets(0).collect();
        assert_eq!(ring0, vec![(0, 0)]);
    }

    #[test]
    fn map_indices_preserves_order() {
        let out = map_indices(100, |i| i * 2);
        assert_eq!(out.len(), 100);
        assert!(out.iter().enumerate().all(|(i, &v)| v == i * 2));
    }

    #[test]
    fn monotonic_check() {
        assert!(is_non_decreasing(&[0., 0., 1., 2.5]));
        assert!(!is_non_decreasing(&[0., 2., 1.]));
        assert!(!is_non_decreasing(&[0., f64::NAN]));
        assert!(is_non_decreasing(&[]));
    }
}
