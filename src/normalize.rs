use crate::{config::GammaConfig, types::Dose};

/// Scale applied to dose differences before they enter the gamma metric.
///
/// ```text
/// Global:  scale = max(reference) × dose_to_agreement / 100     (one value for every point)
/// Local:   scale = local_reference × dose_to_agreement / 100    (per evaluated point)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoseScale {
    Global(Dose),
    Local { fraction: Dose },
}

impl DoseScale {
    pub fn new(reference_max: Dose, config: &GammaConfig) -> Self {
        let fraction = config.dose_to_agreement / 100.;
        if config.global_dose {
            DoseScale::Global(reference_max * fraction)
        } else {
            DoseScale::Local { fraction }
        }
    }

    /// Scale at a point whose aligned reference dose is `local_reference`.
    #[inline]
    pub fn at(&self, local_reference: Dose) -> Dose {
        match *self {
            DoseScale::Global(scale) => scale,
            DoseScale::Local { fraction } => local_reference * fraction,
        }
    }

    /// The shared scale in global mode, `None` in local mode.
    pub fn global(&self) -> Option<Dose> {
        match *self {
            DoseScale::Global(scale) => Some(scale),
            DoseScale::Local { .. } => None,
        }
    }
}

/// Dose difference expressed in units of `scale`.
///
/// A zero scale (local mode on a zero reference dose, or an all-zero reference) makes the
/// criterion infinitely strict: an exact match costs nothing and any other difference is
/// `+∞`. The caller caps the result, so such points report `gamma_cap_value`.
#[inline]
pub fn dose_term(difference: Dose, scale: Dose) -> Dose {
    if scale > 0. {
        difference / scale
    } else if difference == 0. {
        0.
    } else {
        Dose::INFINITY
    }
}

/// Largest finite-or-infinite value of `values`, ignoring NaN. `0` when there is none.
pub fn max_dose<'a, I>(values: I) -> Dose
where
    I: IntoIterator<Item = &'a Dose>,
{
    values
        .into_iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<Dose>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.)
}
