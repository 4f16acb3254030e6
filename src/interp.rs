use crate::types::Dose;

// Linear interpolation
#[inline]
pub fn lerp(a: Dose, b: Dose, t: Dose) -> Dose {
    a + (b - a) * t
}

// Return the interpolation factor t at which the line through v0 and v1 reaches target
#[inline]
pub fn find_t(v0: Dose, v1: Dose, target: Dose) -> Dose {
    (target - v0) / (v1 - v0)
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be non-decreasing and non-empty. Values of `x` outside `xp` are clamped to the
/// first/last sample. On a repeated coordinate the right-most sample wins.
pub fn interp(x: Dose, xp: &[Dose], fp: &[Dose]) -> Dose {
    debug_assert_eq!(xp.len(), fp.len());
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // first index with xp[hi] > x; 1 <= hi <= last here
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    lerp(fp[lo], fp[hi], find_t(xp[lo], xp[hi], x))
}

/// Splits every interval of `(xp, fp)` into `factor` equal sub-intervals.
///
/// Original samples are kept, so `factor == 1` returns copies of the inputs and the result
/// has `(len - 1) * factor + 1` samples.
///
/// ```text
/// xp:      0 ----------- 1 ----------- 2
/// factor 3: 0 -- ⅓ -- ⅔ -- 1 -- 1⅓ -- 1⅔ -- 2
/// ```
pub fn upsample(xp: &[Dose], fp: &[Dose], factor: usize) -> (Vec<Dose>, Vec<Dose>) {
    debug_assert_eq!(xp.len(), fp.len());
    if xp.len() < 2 || factor <= 1 {
        return (xp.to_vec(), fp.to_vec());
    }

    let len = (xp.len() - 1) * factor + 1;
    let mut xs = Vec::with_capacity(len);
    let mut fs = Vec::with_capacity(len);
    for (x, f) in xp.windows(2).zip(fp.windows(2)) {
        for step in 0..factor {
            let t = step as Dose / factor as Dose;
            xs.push(lerp(x[0], x[1], t));
            fs.push(lerp(f[0], f[1], t));
        }
    }
    xs.push(xp[xp.len() - 1]);
    fs.push(fp[fp.len() - 1]);

    (xs, fs)
}

#[cfg(test)]
mod tests {
    use super::{interp, upsample};

    #[test]
    fn interp_hits_samples_and_midpoints() {
        let xp = [0.0, 1.0, 3.0];
        let fp = [10.0, 20.0, 0.0];
        assert_eq!(interp(0.0, &xp, &fp), 10.0);
        assert_eq!(interp(1.0, &xp, &fp), 20.0);
        assert!((interp(0.5, &xp, &fp) - 15.0).abs() < 1e-12);
        assert!((interp(2.0, &xp, &fp) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn interp_clamps_outside_axis() {
        let xp = [1.0, 2.0];
        let fp = [4.0, 8.0];
        assert_eq!(interp(-5.0, &xp, &fp), 4.0);
        assert_eq!(interp(9.0, &xp, &fp), 8.0);
    }

    #[test]
    fn interp_on_repeated_coordinate_is_finite() {
        let xp = [0.0, 1.0, 1.0, 2.0];
        let fp = [0.0, 1.0, 5.0, 5.0];
        let v = interp(1.0, &xp, &fp);
        assert!(v.is_finite());
        assert!((interp(0.5, &xp, &fp) - 0.5).abs() < 1e-12);
        assert!((interp(1.5, &xp, &fp) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn upsample_keeps_original_samples() {
        let xp = [0.0, 1.0, 4.0];
        let fp = [0.0, 3.0, 0.0];
        let (xs, fs) = upsample(&xp, &fp, 3);
        assert_eq!(xs.len(), 7);
        assert_eq!(fs.len(), 7);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[3], 1.0);
        assert_eq!(xs[6], 4.0);
        assert_eq!(fs[3], 3.0);
        assert!((xs[4] - 2.0).abs() < 1e-12);
        assert!((fs[4] - 2.0).abs() < 1e-12);
        assert!((fs[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn upsample_factor_one_is_identity() {
        let xp = [0.0, 2.0, 3.0];
        let fp = [1.0, 1.5, 2.0];
        let (xs, fs) = upsample(&xp, &fp, 1);
        assert_eq!(xs, xp.to_vec());
        assert_eq!(fs, fp.to_vec());
    }
}
