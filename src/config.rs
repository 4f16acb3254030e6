use crate::{
    error::{GammaError, Result},
    types::Dose,
};

/// Tolerances and bookkeeping options shared by every gamma mode.
///
/// Build one with [`Default`] and the `with_*` setters:
///
/// ```rust
/// use gamma_index::config::GammaConfig;
///
/// // 3%/2mm local gamma, low-dose points kept
/// let config = GammaConfig::default()
///     .with_dose_to_agreement(3.0)
///     .with_distance_to_agreement(2.0)
///     .with_global_dose(false)
///     .with_dose_threshold(0.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaConfig {
    /// Dose-difference tolerance in percent. Default: `1`.
    pub dose_to_agreement: Dose,
    /// Distance tolerance, in coordinate units (pixels for the 2D search). Default: `1`.
    pub distance_to_agreement: Dose,
    /// Computed gammas above this value are clamped to it. Default: `2`.
    pub gamma_cap_value: Dose,
    /// Points whose reference dose is below this percentage of the reference maximum
    /// are not evaluated. Default: `5`.
    pub dose_threshold: Dose,
    /// Scale dose differences by the reference maximum (`true`) or by the local
    /// reference dose (`false`). Default: `true`.
    pub global_dose: bool,
    /// Value written at points excluded by the threshold. Default: `NaN`.
    pub fill_value: Dose,
    /// Reference upsampling factor of [`gamma_1d`](crate::gamma::gamma_1d). Default: `1`.
    pub resolution_factor: usize,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            dose_to_agreement: 1.,
            distance_to_agreement: 1.,
            gamma_cap_value: 2.,
            dose_threshold: 5.,
            global_dose: true,
            fill_value: Dose::NAN,
            resolution_factor: 1,
        }
    }
}

impl GammaConfig {
    pub fn with_dose_to_agreement(mut self, percent: Dose) -> Self {
        self.dose_to_agreement = percent;
        self
    }

    pub fn with_distance_to_agreement(mut self, distance: Dose) -> Self {
        self.distance_to_agreement = distance;
        self
    }

    pub fn with_gamma_cap_value(mut self, cap: Dose) -> Self {
        self.gamma_cap_value = cap;
        self
    }

    pub fn with_dose_threshold(mut self, percent: Dose) -> Self {
        self.dose_threshold = percent;
        self
    }

    pub fn with_global_dose(mut self, global_dose: bool) -> Self {
        self.global_dose = global_dose;
        self
    }

    pub fn with_fill_value(mut self, fill_value: Dose) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn with_resolution_factor(mut self, factor: usize) -> Self {
        self.resolution_factor = factor;
        self
    }

    /// Checks the tolerance, cap and threshold ranges.
    ///
    /// `resolution_factor` is only checked by the 1D raster entry point, the only one using it.
    pub fn validate(&self) -> Result<()> {
        positive("dose_to_agreement", self.dose_to_agreement)?;
        positive("distance_to_agreement", self.distance_to_agreement)?;
        if !(self.gamma_cap_value.is_finite() && self.gamma_cap_value >= 0.) {
            return Err(GammaError::InvalidParameter {
                name: "gamma_cap_value",
                value: self.gamma_cap_value,
            });
        }
        if !(0.0..=100.0).contains(&self.dose_threshold) {
            return Err(GammaError::InvalidParameter {
                name: "dose_threshold",
                value: self.dose_threshold,
            });
        }
        Ok(())
    }

    /// Returns an error unless `resolution_factor >= 1`.
    pub fn validate_resolution(&self) -> Result<()> {
        if self.resolution_factor == 0 {
            return Err(GammaError::ResolutionFactor(self.resolution_factor));
        }
        Ok(())
    }

    /// `true` when `value` is what the threshold stage writes at excluded points.
    #[inline]
    pub fn is_fill(&self, value: Dose) -> bool {
        if self.fill_value.is_nan() {
            value.is_nan()
        } else {
            value == self.fill_value
        }
    }
}

fn positive(name: &'static str, value: Dose) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(GammaError::InvalidParameter { name, value })
    }
}
