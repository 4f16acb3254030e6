use crate::{config::GammaConfig, types::Dose};

/// Low-dose exclusion.
///
/// A point is skipped when its aligned reference dose is **strictly below**
/// `max(reference) × dose_threshold / 100`. With `dose_threshold == 0` nothing is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMask {
    pub threshold_value: Dose,
}

impl ThresholdMask {
    pub fn new(reference_max: Dose, config: &GammaConfig) -> Self {
        Self {
            threshold_value: reference_max * config.dose_threshold / 100.,
        }
    }

    #[inline]
    pub fn excludes(&self, local_reference: Dose) -> bool {
        local_reference < self.threshold_value
    }
}
