//! Entry points of the gamma engine.
//!
//! ```text
//! reference, evaluation, GammaConfig
//!   → validate shapes / coordinates / config      (errors only here)
//!   → DoseScale + ThresholdMask from max(reference)
//!   → per evaluated point: search                 (raster 2D | raster 1D | geometric)
//!   → Criteria::assemble: cap, or fill if excluded
//! ```
//!
//! Excluded points hold `fill_value` (NaN by default), never a gamma. When a local dose scale
//! is exactly zero on an evaluated point, any dose difference counts as infinitely large and
//! the point reports `gamma_cap_value`.

use ndarray::{Array1, Array2, ArrayView, ArrayView1, AsArray, Dimension, Ix1, Ix2};
use tracing::{debug, instrument};

use crate::{
    config::GammaConfig,
    error::{GammaError, Result},
    geometric,
    normalize::{DoseScale, max_dose},
    profile, raster,
    threshold::ThresholdMask,
    types::Dose,
    utils::is_non_decreasing,
};

/// Normalization, masking and capping resolved for one call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Criteria {
    pub scale: DoseScale,
    pub mask: ThresholdMask,
    pub distance_to_agreement: Dose,
    pub cap: Dose,
    pub fill: Dose,
}

impl Criteria {
    pub fn new(reference_max: Dose, config: &GammaConfig) -> Self {
        Self {
            scale: DoseScale::new(reference_max, config),
            mask: ThresholdMask::new(reference_max, config),
            distance_to_agreement: config.distance_to_agreement,
            cap: config.gamma_cap_value,
            fill: config.fill_value,
        }
    }

    /// Output value of one point.
    ///
    /// Returns `fill` without calling `search` when `local_reference` is below threshold;
    /// otherwise runs `search` with the point's dose scale and caps the result.
    #[inline]
    pub fn assemble<F>(&self, local_reference: Dose, search: F) -> Dose
    where
        F: FnOnce(Dose) -> Dose,
    {
        if self.mask.excludes(local_reference) {
            return self.fill;
        }
        search(self.scale.at(local_reference)).min(self.cap)
    }
}

/// Result of [`gamma_1d`]: the gamma values and the axes the search actually ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaProfile {
    /// One value per evaluation sample.
    pub gamma: Array1<Dose>,
    /// Reference axis after upsampling by `resolution_factor`.
    pub reference_coordinates: Array1<Dose>,
    /// Evaluation axis (the supplied one, or sample indices).
    pub evaluation_coordinates: Array1<Dose>,
}

/// Raster gamma of two equally shaped 2D grids.
///
/// Coordinates are pixel indices, so `distance_to_agreement` is in pixels. The threshold and,
/// in local mode, the dose scale use the reference cell co-located with each evaluation cell.
///
/// ```rust
/// use gamma_index::{config::GammaConfig, gamma::gamma_2d};
/// use ndarray::Array2;
///
/// let reference = Array2::<f64>::ones((5, 5));
/// let evaluation = &reference * 1.01;
/// let gamma = gamma_2d(&reference, &evaluation, &GammaConfig::default()).unwrap();
/// assert!(gamma.iter().all(|g| (g - 1.).abs() < 1e-3));
/// ```
///
/// # Errors
/// [`GammaError::Dimensionality`] unless both arrays are 2D, [`GammaError::ShapeMismatch`]
/// if their shapes differ, [`GammaError::Empty`] for an empty grid, and
/// [`GammaError::InvalidParameter`] for an invalid `config`.
#[instrument(skip_all, name = "gamma_2d")]
pub fn gamma_2d<'a, 'b, R, E, DR, DE>(
    reference: R,
    evaluation: E,
    config: &GammaConfig,
) -> Result<Array2<Dose>>
where
    R: AsArray<'a, Dose, DR>,
    E: AsArray<'b, Dose, DE>,
    DR: Dimension,
    DE: Dimension,
{
    config.validate()?;
    let reference: ArrayView<'a, Dose, DR> = reference.into();
    let evaluation: ArrayView<'b, Dose, DE> = evaluation.into();
    let reference = require_dim::<_, Ix2>("reference", reference)?;
    let evaluation = require_dim::<_, Ix2>("evaluation", evaluation)?;
    if reference.shape() != evaluation.shape() {
        return Err(GammaError::ShapeMismatch {
            reference: reference.shape().to_vec(),
            evaluation: evaluation.shape().to_vec(),
        });
    }
    if reference.is_empty() {
        return Err(GammaError::Empty("reference"));
    }

    let criteria = Criteria::new(max_dose(reference.iter()), config);
    debug!(
        shape = ?reference.dim(),
        threshold = criteria.mask.threshold_value,
        global = config.global_dose,
        "raster 2D search"
    );

    let gamma = raster::gamma_grid(reference, evaluation, &criteria)?;
    log_evaluated(gamma.iter(), config);
    Ok(gamma)
}

/// Raster 1D gamma of two profiles.
///
/// The reference (and its axis) is upsampled `resolution_factor` times by linear
/// interpolation before the search. Missing coordinates default to sample indices.
///
/// # Errors
/// [`GammaError::ResolutionFactor`] for a zero factor, plus everything
/// [`gamma_geometric`] rejects.
#[instrument(skip_all, name = "gamma_1d")]
pub fn gamma_1d<'a, 'b, R, E, DR, DE>(
    reference: R,
    evaluation: E,
    reference_coordinates: Option<&[Dose]>,
    evaluation_coordinates: Option<&[Dose]>,
    config: &GammaConfig,
) -> Result<GammaProfile>
where
    R: AsArray<'a, Dose, DR>,
    E: AsArray<'b, Dose, DE>,
    DR: Dimension,
    DE: Dimension,
{
    config.validate_resolution()?;
    let reference: ArrayView<'a, Dose, DR> = reference.into();
    let evaluation: ArrayView<'b, Dose, DE> = evaluation.into();
    let profiles = Profiles::new(
        reference,
        evaluation,
        reference_coordinates,
        evaluation_coordinates,
        config,
    )?;
    debug!(
        reference_samples = profiles.reference.len(),
        evaluation_samples = profiles.evaluation.len(),
        resolution_factor = config.resolution_factor,
        threshold = profiles.criteria.mask.threshold_value,
        global = config.global_dose,
        "raster 1D search"
    );

    let search = profile::gamma_samples(
        &profiles.reference_coordinates,
        &profiles.reference,
        &profiles.evaluation_coordinates,
        &profiles.evaluation,
        config.resolution_factor,
        &profiles.criteria,
    );
    log_evaluated(search.gamma.iter(), config);

    Ok(GammaProfile {
        gamma: Array1::from(search.gamma),
        reference_coordinates: Array1::from(search.reference_coordinates),
        evaluation_coordinates: Array1::from(profiles.evaluation_coordinates),
    })
}

/// Geometric (continuous) gamma of two profiles with arbitrary coordinates.
///
/// The reference is a piecewise-linear curve; each gamma is the exact distance from the
/// normalized evaluation point to that curve (see [`geometric::compute_distance`]). Missing
/// coordinates default to sample indices.
///
/// # Errors
/// [`GammaError::Dimensionality`] unless both arrays are 1D, [`GammaError::Empty`],
/// [`GammaError::CoordinateLength`], [`GammaError::NonMonotonic`],
/// [`GammaError::Extrapolation`] when the evaluation axis leaves the reference axis, and
/// [`GammaError::InvalidParameter`] for an invalid `config`.
#[instrument(skip_all, name = "gamma_geometric")]
pub fn gamma_geometric<'a, 'b, R, E, DR, DE>(
    reference: R,
    evaluation: E,
    reference_coordinates: Option<&[Dose]>,
    evaluation_coordinates: Option<&[Dose]>,
    config: &GammaConfig,
) -> Result<Array1<Dose>>
where
    R: AsArray<'a, Dose, DR>,
    E: AsArray<'b, Dose, DE>,
    DR: Dimension,
    DE: Dimension,
{
    let reference: ArrayView<'a, Dose, DR> = reference.into();
    let evaluation: ArrayView<'b, Dose, DE> = evaluation.into();
    let profiles = Profiles::new(
        reference,
        evaluation,
        reference_coordinates,
        evaluation_coordinates,
        config,
    )?;
    debug!(
        segments = profiles.reference.len().saturating_sub(1),
        evaluation_samples = profiles.evaluation.len(),
        threshold = profiles.criteria.mask.threshold_value,
        global = config.global_dose,
        "geometric projection"
    );

    let gamma = geometric::gamma_samples(
        &profiles.reference_coordinates,
        &profiles.reference,
        &profiles.evaluation_coordinates,
        &profiles.evaluation,
        &profiles.criteria,
    );
    log_evaluated(gamma.iter(), config);

    Ok(Array1::from(gamma))
}

/// Validated inputs shared by the two 1D modes.
struct Profiles {
    reference: Vec<Dose>,
    evaluation: Vec<Dose>,
    reference_coordinates: Vec<Dose>,
    evaluation_coordinates: Vec<Dose>,
    criteria: Criteria,
}

impl Profiles {
    fn new<DR: Dimension, DE: Dimension>(
        reference: ArrayView<'_, Dose, DR>,
        evaluation: ArrayView<'_, Dose, DE>,
        reference_coordinates: Option<&[Dose]>,
        evaluation_coordinates: Option<&[Dose]>,
        config: &GammaConfig,
    ) -> Result<Self> {
        config.validate()?;
        let reference = require_dim::<_, Ix1>("reference", reference)?;
        let evaluation = require_dim::<_, Ix1>("evaluation", evaluation)?;
        if reference.is_empty() {
            return Err(GammaError::Empty("reference"));
        }
        if evaluation.is_empty() {
            return Err(GammaError::Empty("evaluation"));
        }

        let reference_coordinates = axis("reference", reference_coordinates, &reference)?;
        let evaluation_coordinates = axis("evaluation", evaluation_coordinates, &evaluation)?;
        check_within(&reference_coordinates, &evaluation_coordinates)?;

        let reference = reference.to_vec();
        let criteria = Criteria::new(max_dose(&reference), config);

        Ok(Self {
            reference,
            evaluation: evaluation.to_vec(),
            reference_coordinates,
            evaluation_coordinates,
            criteria,
        })
    }
}

fn require_dim<'a, D, T>(which: &'static str, view: ArrayView<'a, Dose, D>) -> Result<ArrayView<'a, Dose, T>>
where
    D: Dimension,
    T: Dimension,
{
    match T::NDIM {
        Some(expected) if expected != view.ndim() => Err(GammaError::Dimensionality {
            which,
            expected,
            found: view.ndim(),
        }),
        _ => Ok(view.into_dimensionality::<T>()?),
    }
}

/// The supplied axis after length and ordering checks, or sample indices.
fn axis(which: &'static str, coordinates: Option<&[Dose]>, samples: &ArrayView1<'_, Dose>) -> Result<Vec<Dose>> {
    let Some(coordinates) = coordinates else {
        return Ok((0..samples.len()).map(|i| i as Dose).collect());
    };
    if coordinates.len() != samples.len() {
        return Err(GammaError::CoordinateLength {
            which,
            coordinates: coordinates.len(),
            samples: samples.len(),
        });
    }
    if !is_non_decreasing(coordinates) || coordinates.iter().any(|c| !c.is_finite()) {
        return Err(GammaError::NonMonotonic(which));
    }
    Ok(coordinates.to_vec())
}

/// Both axes are sorted and non-empty, so their ends are their extremes.
fn check_within(reference: &[Dose], evaluation: &[Dose]) -> Result<()> {
    let (ref_min, ref_max) = (reference[0], reference[reference.len() - 1]);
    let (eval_min, eval_max) = (evaluation[0], evaluation[evaluation.len() - 1]);
    if eval_min < ref_min || eval_max > ref_max {
        return Err(GammaError::Extrapolation {
            eval_min,
            eval_max,
            ref_min,
            ref_max,
        });
    }
    Ok(())
}

fn log_evaluated<'a, I>(gamma: I, config: &GammaConfig)
where
    I: Iterator<Item = &'a Dose>,
{
    let (evaluated, total) = gamma.fold((0usize, 0usize), |(evaluated, total), &g| {
        (evaluated + usize::from(!config.is_fill(g)), total + 1)
    });
    debug!(evaluated, total, "gamma map assembled");
}
