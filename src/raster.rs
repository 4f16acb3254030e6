use ndarray::{Array2, ArrayView2};

use crate::{
    error::Result,
    gamma::Criteria,
    normalize::dose_term,
    types::Dose,
    utils::{map_indices, ring_offsets},
};

/// Minimum gamma of evaluation `value` at cell `(row, col)` over the reference grid.
///
/// Cells are visited in square rings of growing Chebyshev radius. Every cell of ring `k` is
/// at least `k` pixels away, so the search stops as soon as `k / distance_to_agreement`
/// reaches the running minimum or `cap` (anything past that is capped anyway). The window
/// is truncated at the grid border.
///
/// ```text
/// gamma = min  sqrt( ((value - ref[r, c]) / scale)² + (|(row, col) - (r, c)| / dta)² )
///         r, c
/// ```
pub fn search_cell(
    reference: &ArrayView2<'_, Dose>,
    (row, col): (usize, usize),
    value: Dose,
    scale: Dose,
    distance_to_agreement: Dose,
    cap: Dose,
) -> Dose {
    let (rows, cols) = reference.dim();
    let mut best = dose_term(value - reference[[row, col]], scale).abs();

    for ring in 1..rows.max(cols) {
        if ring as Dose / distance_to_agreement >= best.min(cap) {
            break;
        }
        for (d_row, d_col) in ring_offsets(ring) {
            let r = row as isize + d_row;
            let c = col as isize + d_col;
            if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                continue;
            }

            let distance = (d_row as Dose).hypot(d_col as Dose) / distance_to_agreement;
            if distance >= best {
                continue;
            }
            let gamma = dose_term(value - reference[[r as usize, c as usize]], scale).hypot(distance);
            if gamma < best {
                best = gamma;
            }
        }
    }

    best
}

/// Runs [`search_cell`] for every evaluation cell, parallelised over rows.
///
/// The threshold and the local dose scale use the co-located reference cell.
pub(crate) fn gamma_grid(
    reference: ArrayView2<'_, Dose>,
    evaluation: ArrayView2<'_, Dose>,
    criteria: &Criteria,
) -> Result<Array2<Dose>> {
    let (rows, cols) = evaluation.dim();

    let per_row: Vec<Vec<Dose>> = map_indices(rows, |row| {
        (0..cols)
            .map(|col| {
                criteria.assemble(reference[[row, col]], |scale| {
                    search_cell(
                        &reference,
                        (row, col),
                        evaluation[[row, col]],
                        scale,
                        criteria.distance_to_agreement,
                        criteria.cap,
                    )
                })
            })
            .collect()
    });

    // Merge per-row slices into one row-major buffer
    let mut values: Vec<Dose> = Vec::with_capacity(rows * cols);
    for mut row in per_row {
        values.append(&mut row);
    }

    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::search_cell;

    #[test]
    fn co_located_match_is_zero() {
        let reference = Array2::<f64>::ones((4, 4));
        let g = search_cell(&reference.view(), (1, 2), 1., 0.01, 1., 2.);
        assert_eq!(g, 0.);
    }

    #[test]
    fn neighbour_within_distance_wins() {
        let reference = array![[1.0, 2.0, 1.0], [1.0, 1.0, 1.0]];
        // evaluation of 2.0 at (0, 0): co-located dose term is 1/0.5 = 2,
        // the neighbour at (0, 1) matches exactly at distance 1 / dta = 0.5
        let g = search_cell(&reference.view(), (0, 0), 2., 0.5, 2., 5.);
        assert!((g - 0.5).abs() < 1e-12);
    }

    #[test]
    fn diagonal_neighbour_uses_euclidean_distance() {
        let mut reference = Array2::<f64>::zeros((3, 3));
        reference[[2, 2]] = 1.;
        let g = search_cell(&reference.view(), (1, 1), 1., 0.1, 2., 10.);
        assert!((g - 2f64.sqrt() / 2.).abs() < 1e-12);
    }

    #[test]
    fn search_does_not_wrap_around_edges() {
        let mut reference = Array2::<f64>::zeros((1, 5));
        reference[[0, 4]] = 1.;
        // only the far end matches; it is four pixels away
        let g = search_cell(&reference.view(), (0, 0), 1., 0.1, 1., 10.);
        assert!((g - 4.).abs() < 1e-12);
    }

    #[test]
    fn search_stops_at_cap() {
        let mut reference = Array2::<f64>::zeros((1, 50));
        reference[[0, 49]] = 1.;
        // nearest match is 49 pixels away, everything closer costs 10;
        // the search gives up past the cap and reports something >= cap
        let g = search_cell(&reference.view(), (0, 0), 1., 0.1, 1., 2.);
        assert!(g >= 2.);
    }
}
