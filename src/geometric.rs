//! Continuous (geometric) gamma.
//!
//! The reference profile is treated as a piecewise-linear curve in the normalized plane
//!
//! ```text
//!   (x / distance_to_agreement, dose / dose_scale)
//! ```
//!
//! where both tolerances are 1. The gamma of an evaluation point is then simply its
//! Euclidean distance to that curve, with no raster discretization.

use crate::{
    gamma::Criteria,
    interp::{find_t, interp, lerp},
    types::{Dose, Point},
    utils::map_indices,
};

/// Below this squared length a segment is treated as a single point.
const DEGENERATE_SEGMENT: Dose = 1e-24;

/// Distance from `point` to the closest point of segment `a`–`b`.
///
/// The projection parameter onto the line through `a` and `b` is clamped to `[0, 1]`, so points
/// beyond either end measure to that endpoint.
#[inline]
pub fn segment_distance(point: &Point, a: &Point, b: &Point) -> Dose {
    let ab = b - a;
    let ap = point - a;
    let len_sq = ab.norm_squared();
    if len_sq <= DEGENERATE_SEGMENT {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / len_sq).clamp(0., 1.);
    (ap - ab * t).norm()
}

/// Minimum distance from `point` to the polyline through `vertices`.
///
/// A single vertex degenerates to point distance; an empty polyline is infinitely far away.
pub fn compute_distance(point: &Point, vertices: &[Point]) -> Dose {
    match vertices {
        [] => Dose::INFINITY,
        [only] => (point - only).norm(),
        _ => vertices
            .windows(2)
            .map(|w| segment_distance(point, &w[0], &w[1]))
            .fold(Dose::INFINITY, Dose::min),
    }
}

/// Reference samples mapped into the normalized plane.
pub fn normalized_polyline(
    coordinates: &[Dose],
    doses: &[Dose],
    distance_to_agreement: Dose,
    scale: Dose,
) -> Vec<Point> {
    coordinates
        .iter()
        .zip(doses)
        .map(|(&x, &d)| Point::new(x / distance_to_agreement, d / scale))
        .collect()
}

/// Distance along the position axis from `x` to the nearest place where the reference curve
/// takes exactly the dose `value`; `+∞` if it never does.
///
/// This is the limit of the geometric gamma (times `distance_to_agreement`) as the dose
/// scale goes to zero.
pub fn level_distance(coordinates: &[Dose], doses: &[Dose], x: Dose, value: Dose) -> Dose {
    if let ([x0], [d0]) = (coordinates, doses) {
        return if *d0 == value {
            (x - x0).abs()
        } else {
            Dose::INFINITY
        };
    }

    coordinates
        .windows(2)
        .zip(doses.windows(2))
        .filter_map(|(xs, ds)| {
            if ds[0] == ds[1] {
                // flat segment: either all of it matches or none of it
                (ds[0] == value).then(|| (xs[0] - x).max(x - xs[1]).max(0.))
            } else {
                let t = find_t(ds[0], ds[1], value);
                (0.0..=1.0)
                    .contains(&t)
                    .then(|| (lerp(xs[0], xs[1], t) - x).abs())
            }
        })
        .fold(Dose::INFINITY, Dose::min)
}

/// Geometric gamma of every evaluation sample.
///
/// The threshold and the local dose scale use the reference interpolated at the evaluation
/// coordinate. In global mode the normalized polyline is built once and shared.
pub(crate) fn gamma_samples(
    reference_coordinates: &[Dose],
    reference: &[Dose],
    evaluation_coordinates: &[Dose],
    evaluation: &[Dose],
    criteria: &Criteria,
) -> Vec<Dose> {
    let dta = criteria.distance_to_agreement;
    let shared = criteria
        .scale
        .global()
        .filter(|&scale| scale > 0.)
        .map(|scale| normalized_polyline(reference_coordinates, reference, dta, scale));

    map_indices(evaluation.len(), |i| {
        let x = evaluation_coordinates[i];
        let value = evaluation[i];
        let local_reference = interp(x, reference_coordinates, reference);

        criteria.assemble(local_reference, |scale| {
            if scale <= 0. {
                return level_distance(reference_coordinates, reference, x, value) / dta;
            }
            let point = Point::new(x / dta, value / scale);
            match &shared {
                Some(vertices) => compute_distance(&point, vertices),
                None => compute_distance(
                    &point,
                    &normalized_polyline(reference_coordinates, reference, dta, scale),
                ),
            }
        })
    })
}
