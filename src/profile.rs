use crate::{
    gamma::Criteria,
    interp::{interp, upsample},
    normalize::dose_term,
    types::Dose,
    utils::map_indices,
};

/// Minimum gamma of evaluation `value` at position `x` over a sampled reference profile.
///
/// Candidates are visited outward from `x`, always taking the nearer of the next left and
/// right sample, so the search can stop once the distance term alone reaches the running
/// minimum or `cap`.
///
/// ```text
///            left <--  x  --> right
///   ... [i-2] [i-1]    |    [i] [i+1] ...
/// ```
pub fn search_sample(
    coordinates: &[Dose],
    doses: &[Dose],
    x: Dose,
    value: Dose,
    scale: Dose,
    distance_to_agreement: Dose,
    cap: Dose,
) -> Dose {
    let mut right = coordinates.partition_point(|&c| c < x);
    let mut left = right.checked_sub(1);
    let mut best = Dose::INFINITY;

    loop {
        let to_left = left.map(|i| (i, x - coordinates[i]));
        let to_right = coordinates.get(right).map(|&c| (right, c - x));

        let (index, distance, from_left) = match (to_left, to_right) {
            (Some((i, dl)), Some((_, dr))) if dl <= dr => (i, dl, true),
            (Some((i, dl)), None) => (i, dl, true),
            (_, Some((j, dr))) => (j, dr, false),
            (None, None) => break,
        };

        let distance = distance / distance_to_agreement;
        if distance >= best.min(cap) {
            break;
        }
        let gamma = dose_term(value - doses[index], scale).hypot(distance);
        if gamma < best {
            best = gamma;
        }

        if from_left {
            left = index.checked_sub(1);
        } else {
            right += 1;
        }
    }

    best
}

/// Upsampled reference axis plus the raster 1D gamma of every evaluation sample.
pub(crate) struct ProfileSearch {
    pub reference_coordinates: Vec<Dose>,
    pub gamma: Vec<Dose>,
}

/// Raster 1D gamma after upsampling the reference by `resolution_factor`.
///
/// The threshold and the local dose scale use the original reference interpolated at the
/// evaluation coordinate; upsampling is linear, so the interpolant is unchanged.
pub(crate) fn gamma_samples(
    reference_coordinates: &[Dose],
    reference: &[Dose],
    evaluation_coordinates: &[Dose],
    evaluation: &[Dose],
    resolution_factor: usize,
    criteria: &Criteria,
) -> ProfileSearch {
    let (fine_coordinates, fine_doses) =
        upsample(reference_coordinates, reference, resolution_factor);

    let gamma = map_indices(evaluation.len(), |i| {
        let x = evaluation_coordinates[i];
        let local_reference = interp(x, reference_coordinates, reference);
        criteria.assemble(local_reference, |scale| {
            search_sample(
                &fine_coordinates,
                &fine_doses,
                x,
                evaluation[i],
                scale,
                criteria.distance_to_agreement,
                criteria.cap,
            )
        })
    });

    ProfileSearch {
        reference_coordinates: fine_coordinates,
        gamma,
    }
}
