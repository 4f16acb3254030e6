//! Runs all three gamma modes on a synthetic field and prints pass rates.
//!
//! ```text
//! RUST_LOG=gamma_index=debug cargo run --example profile
//! ```

use gamma_index::{GammaConfig, GammaStats, gamma_1d, gamma_2d, gamma_geometric};
use ndarray::{Array1, Array2};
use tracing_subscriber::{EnvFilter, fmt};

/// Flat-topped field with sigmoid penumbrae, `width` samples across.
fn field_profile(x: f64, centre: f64, width: f64, gain: f64) -> f64 {
    let edge = (x - centre).abs() - width / 2.;
    gain * 100. / (1. + (edge / 1.5).exp())
}

fn main() -> gamma_index::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gamma_index=debug"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = GammaConfig::default()
        .with_dose_to_agreement(2.)
        .with_distance_to_agreement(2.)
        .with_dose_threshold(10.);

    // measured field is 1% hot and shifted by 0.8 mm
    let reference = Array1::from_shape_fn(121, |i| field_profile(i as f64 * 0.5, 30., 30., 1.));
    let evaluation = Array1::from_shape_fn(121, |i| field_profile(i as f64 * 0.5, 30.8, 30., 1.01));
    let axis: Vec<f64> = (0..121).map(|i| i as f64 * 0.5).collect();

    let geometric = gamma_geometric(&reference, &evaluation, Some(&axis[..]), Some(&axis[..]), &config)?;
    report("geometric", &GammaStats::new(&geometric, &config));

    for factor in [1, 4] {
        let raster = gamma_1d(
            &reference,
            &evaluation,
            Some(&axis[..]),
            Some(&axis[..]),
            &config.with_resolution_factor(factor),
        )?;
        report(
            &format!("raster 1D x{factor} ({} samples)", raster.reference_coordinates.len()),
            &GammaStats::new(&raster.gamma, &config),
        );
    }

    let reference_2d = Array2::from_shape_fn((80, 80), |(r, c)| {
        field_profile(r as f64, 40., 40., 1.) * field_profile(c as f64, 40., 40., 1.) / 100.
    });
    let evaluation_2d = Array2::from_shape_fn((80, 80), |(r, c)| {
        field_profile(r as f64, 41., 40., 1.01) * field_profile(c as f64, 40., 40., 1.) / 100.
    });
    let raster_2d = gamma_2d(&reference_2d, &evaluation_2d, &config)?;
    report("raster 2D", &GammaStats::new(&raster_2d, &config));

    Ok(())
}

fn report(mode: &str, stats: &GammaStats) {
    println!(
        "{mode:<28} evaluated {:>5}  pass {:>6.2}%  mean {:.3}  max {:.3}",
        stats.evaluated, stats.pass_rate, stats.mean, stats.max
    );
}
