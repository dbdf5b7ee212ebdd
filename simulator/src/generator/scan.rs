use anyhow::{ensure, Context};
use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use texcore::calibration::Calibration;
use texcore::grid::ScanDims;

/// Configuration for generating a synthetic polar scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanGeneratorConfig {
    pub n_rang: usize,
    pub n_azim: usize,
    pub seed: u64,
    /// Amplitude of the azimuthal velocity pattern in m/s.
    pub peak_velocity: f32,
    /// Velocity change per range bin in m/s.
    pub shear: f32,
    pub noise: f32,
    /// Fraction of gates replaced by the velocity missing code.
    pub missing_fraction: f64,
}

impl Default for ScanGeneratorConfig {
    fn default() -> Self {
        Self {
            n_rang: 64,
            n_azim: 360,
            seed: 0,
            peak_velocity: 12.0,
            shear: 0.05,
            noise: 1.5,
            missing_fraction: 0.05,
        }
    }
}

/// Raw reflectivity and radial-velocity fields of one synthetic scan.
#[derive(Debug, Clone)]
pub struct SyntheticScan {
    pub dims: ScanDims,
    pub dbz: Vec<i32>,
    pub vrad: Vec<i32>,
}

/// Largest raw code that is not reserved for the missing sentinel.
fn max_code(calibration: &Calibration) -> i32 {
    match calibration.missing {
        Some(255) | None => 254,
        Some(_) => 255,
    }
}

fn encode(calibration: &Calibration, value: f32) -> i32 {
    let code = calibration
        .quantize(value as f64)
        .clamp(0, max_code(calibration));
    match calibration.missing {
        Some(sentinel) if sentinel == code && code > 0 => code - 1,
        Some(sentinel) if sentinel == code => code + 1,
        _ => code,
    }
}

/// Builds a uniform-wind velocity pattern (cosine in azimuth, linear shear in
/// range) with seeded noise and dropouts, encoded through `vrad`.
pub fn build_scan(
    config: &ScanGeneratorConfig,
    vrad: &Calibration,
    dbz: &Calibration,
) -> anyhow::Result<SyntheticScan> {
    let dims = ScanDims::new(config.n_rang, config.n_azim)
        .context("invalid synthetic scan dimensions")?;
    ensure!(
        (0.0..=1.0).contains(&config.missing_fraction),
        "missing_fraction {} outside [0, 1]",
        config.missing_fraction
    );
    let missing = vrad.missing;
    if missing.is_none() && config.missing_fraction > 0.0 {
        warn!("vrad calibration has no missing code; dropouts disabled");
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut vrad_codes = Vec::with_capacity(dims.cell_count());
    let mut dbz_codes = Vec::with_capacity(dims.cell_count());

    for azim in 0..dims.n_azim {
        let bearing = azim as f32 / dims.n_azim as f32 * 2.0 * PI;
        for rang in 0..dims.n_rang {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            let velocity =
                config.peak_velocity * bearing.cos() + config.shear * rang as f32 + jitter;

            let dropout = config.missing_fraction > 0.0 && rng.gen_bool(config.missing_fraction);
            let code = match missing {
                Some(sentinel) if dropout => sentinel,
                _ => encode(vrad, velocity),
            };
            vrad_codes.push(code);

            let reflectivity = 5.0 + 25.0 * (-(rang as f32) / dims.n_rang as f32).exp() + jitter;
            dbz_codes.push(encode(dbz, reflectivity));
        }
    }

    Ok(SyntheticScan {
        dims,
        dbz: dbz_codes,
        vrad: vrad_codes,
    })
}
