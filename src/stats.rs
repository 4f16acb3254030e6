use crate::{config::GammaConfig, types::Dose};

/// Pass-rate summary of a gamma map.
///
/// Only evaluated points count: values equal to the configured `fill_value` (or NaN when the
/// fill value is NaN) are left out of every statistic, including the pass-rate denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaStats {
    /// Points that were not excluded by the dose threshold.
    pub evaluated: usize,
    /// Evaluated points with gamma at or below the pass limit.
    pub passing: usize,
    /// `100 × passing / evaluated`; NaN when nothing was evaluated.
    pub pass_rate: Dose,
    pub mean: Dose,
    pub max: Dose,
}

impl GammaStats {
    /// Conventional acceptance limit: gamma ≤ 1 passes.
    pub const PASS_LIMIT: Dose = 1.;

    pub fn new<'a, I>(gamma: I, config: &GammaConfig) -> Self
    where
        I: IntoIterator<Item = &'a Dose>,
    {
        Self::with_pass_limit(gamma, config, Self::PASS_LIMIT)
    }

    pub fn with_pass_limit<'a, I>(gamma: I, config: &GammaConfig, pass_limit: Dose) -> Self
    where
        I: IntoIterator<Item = &'a Dose>,
    {
        let mut evaluated = 0usize;
        let mut passing = 0usize;
        let mut sum = 0.;
        let mut max = Dose::NAN;

        for &g in gamma.into_iter().filter(|&&g| !config.is_fill(g)) {
            evaluated += 1;
            if g <= pass_limit {
                passing += 1;
            }
            sum += g;
            max = max.max(g);
        }

        if evaluated == 0 {
            return Self {
                evaluated,
                passing,
                pass_rate: Dose::NAN,
                mean: Dose::NAN,
                max: Dose::NAN,
            };
        }

        Self {
            evaluated,
            passing,
            pass_rate: 100. * passing as Dose / evaluated as Dose,
            mean: sum / evaluated as Dose,
            max,
        }
    }

    pub fn failing(&self) -> usize {
        self.evaluated - self.passing
    }
}

#[cfg(test)]
mod tests {
    use super::GammaStats;
    use crate::config::GammaConfig;

    #[test]
    fn excludes_nan_fill_from_denominator() {
        let gamma = [0.2, 0.9, 1.5, f64::NAN, f64::NAN];
        let stats = GammaStats::new(&gamma, &GammaConfig::default());
        assert_eq!(stats.evaluated, 3);
        assert_eq!(stats.passing, 2);
        assert_eq!(stats.failing(), 1);
        assert!((stats.pass_rate - 200. / 3.).abs() < 1e-9);
        assert!((stats.mean - 2.6 / 3.).abs() < 1e-12);
        assert_eq!(stats.max, 1.5);
    }

    #[test]
    fn excludes_numeric_fill() {
        let config = GammaConfig::default().with_fill_value(-1.);
        let gamma = [0.5, -1., -1., 1.0];
        let stats = GammaStats::new(&gamma, &config);
        assert_eq!(stats.evaluated, 2);
        assert_eq!(stats.passing, 2);
        assert_eq!(stats.pass_rate, 100.);
    }

    #[test]
    fn custom_pass_limit() {
        let gamma = [0.3, 0.6, 0.9];
        let stats = GammaStats::with_pass_limit(&gamma, &GammaConfig::default(), 0.5);
        assert_eq!(stats.passing, 1);
    }

    #[test]
    fn nothing_evaluated() {
        let gamma = [f64::NAN; 4];
        let stats = GammaStats::new(&gamma, &GammaConfig::default());
        assert_eq!(stats.evaluated, 0);
        assert!(stats.pass_rate.is_nan());
        assert!(stats.mean.is_nan());
    }
}
