use crate::calibration::Calibration;
use crate::grid::{PolarGrid, ScanDims};
use crate::math::stats::StatsHelper;
use crate::output::TextureCode;
use crate::prelude::{KernelKind, TextureConfig, TextureError, TextureResult, TextureSummary};
use crate::processing::neighborhood::Neighborhood;
use log::{debug, info, warn};
use ndarray::Array2;

/// Computes the radial-velocity texture image of a polar scan.
///
/// Each interior cell receives the population standard deviation of the
/// calibrated, non-missing velocities in its neighborhood, quantized through
/// the texture calibration. Azimuth wraps around the scan; range bins closer
/// than half a window to either end are never written.
pub struct TextureComputer {
    config: TextureConfig,
}

impl TextureComputer {
    pub fn new(config: TextureConfig) -> TextureResult<Self> {
        config.neighborhood.validate()?;
        config.tex.validate("tex")?;
        config.vrad.validate("vrad")?;
        Ok(Self { config })
    }

    /// Fills the interior cells of `tex_out` in place. Border cells keep
    /// whatever the caller left there.
    pub fn compute_into(
        &self,
        tex_out: &mut [TextureCode],
        dbz: &[i32],
        vrad: &[i32],
        dims: ScanDims,
    ) -> TextureResult<TextureSummary> {
        dims.check_len("tex", tex_out.len())?;
        // Reflectivity is not part of the velocity kernel yet; the shape still
        // has to agree with the other fields.
        let _dbz = PolarGrid::new("dbz", dbz, dims)?;
        let vrad = PolarGrid::new("vrad", vrad, dims)?;
        self.config.neighborhood.check_fits(dims)?;

        debug!(
            "texture sweep {}x{} (azim x rang), window {}x{}, kernel {:?}",
            dims.n_azim,
            dims.n_rang,
            self.config.neighborhood.n_azim,
            self.config.neighborhood.n_rang,
            self.config.kernel
        );

        let summary = self.sweep(tex_out, &vrad);

        info!(
            "texture computed={} no_data={} border={}",
            summary.computed, summary.no_data, summary.border
        );
        if summary.computed == 0 && summary.no_data > 0 {
            warn!(
                "no interior cell reached n_count_min={}",
                self.config.n_count_min
            );
        }
        Ok(summary)
    }

    /// Allocates a `(n_azim, n_rang)` image pre-filled with `NoData` and
    /// computes into it.
    pub fn compute_image(
        &self,
        dbz: &[i32],
        vrad: &[i32],
        dims: ScanDims,
    ) -> TextureResult<(Array2<TextureCode>, TextureSummary)> {
        let mut cells = vec![TextureCode::NoData; dims.cell_count()];
        let summary = self.compute_into(&mut cells, dbz, vrad, dims)?;
        let image = Array2::from_shape_vec(dims.shape(), cells).map_err(|_| {
            TextureError::InvalidDimensions {
                n_rang: dims.n_rang,
                n_azim: dims.n_azim,
            }
        })?;
        Ok((image, summary))
    }

    /// Texture of the single cell `(azim, rang)`. Azimuth wraps; range bins
    /// outside the interior are rejected.
    pub fn texture_at(
        &self,
        vrad: &PolarGrid<'_>,
        azim: usize,
        rang: usize,
        scratch: &mut Vec<f64>,
    ) -> TextureResult<TextureCode> {
        let interior = self.config.neighborhood.interior_range(vrad.dims());
        if !interior.contains(&rang) {
            return Err(TextureError::BorderCell {
                rang,
                start: interior.start,
                end: interior.end,
            });
        }
        Ok(self.cell_texture(vrad, azim % vrad.dims().n_azim, rang, scratch))
    }

    fn cell_texture(
        &self,
        vrad: &PolarGrid<'_>,
        azim: usize,
        rang: usize,
        scratch: &mut Vec<f64>,
    ) -> TextureCode {
        self.gather(vrad, azim, rang, scratch);
        if scratch.len() < self.config.n_count_min {
            return TextureCode::NoData;
        }
        let std_dev = match self.config.kernel {
            KernelKind::Moments => StatsHelper::std_dev_moments(scratch),
            KernelKind::Direct => StatsHelper::std_dev_direct(scratch),
        };
        std_dev.map(|value| self.config.tex.quantize(value)).into()
    }

    /// Collects the calibrated, non-missing velocities of the window.
    fn gather(&self, vrad: &PolarGrid<'_>, azim: usize, rang: usize, scratch: &mut Vec<f64>) {
        scratch.clear();
        let calibration = &self.config.vrad;
        for (azim_delta, rang_delta) in self.config.neighborhood.offsets() {
            let rang_local = (rang as isize + rang_delta) as usize;
            let raw = vrad.get(azim as isize + azim_delta, rang_local);
            if let Some(value) = calibration.to_physical(raw) {
                scratch.push(value);
            }
        }
    }

    fn fill_row(
        &self,
        vrad: &PolarGrid<'_>,
        azim: usize,
        row: &mut [TextureCode],
        scratch: &mut Vec<f64>,
    ) -> TextureSummary {
        let interior = self.config.neighborhood.interior_range(vrad.dims());
        let mut summary = TextureSummary {
            border: row.len() - interior.len(),
            ..Default::default()
        };
        for rang in interior {
            let code = self.cell_texture(vrad, azim, rang, scratch);
            if code.is_no_data() {
                summary.no_data += 1;
            } else {
                summary.computed += 1;
            }
            row[rang] = code;
        }
        summary
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    fn sweep_sequential(
        &self,
        tex_out: &mut [TextureCode],
        vrad: &PolarGrid<'_>,
    ) -> TextureSummary {
        let mut scratch = Vec::with_capacity(self.config.neighborhood.size());
        tex_out
            .chunks_mut(vrad.dims().n_rang)
            .enumerate()
            .map(|(azim, row)| self.fill_row(vrad, azim, row, &mut scratch))
            .fold(TextureSummary::default(), TextureSummary::merge)
    }

    #[cfg(feature = "parallel")]
    fn sweep(&self, tex_out: &mut [TextureCode], vrad: &PolarGrid<'_>) -> TextureSummary {
        use rayon::prelude::*;

        let window = self.config.neighborhood.size();
        tex_out
            .par_chunks_mut(vrad.dims().n_rang)
            .enumerate()
            .map_init(
                || Vec::with_capacity(window),
                |scratch, (azim, row)| self.fill_row(vrad, azim, row, scratch),
            )
            .reduce(TextureSummary::default, TextureSummary::merge)
    }

    #[cfg(not(feature = "parallel"))]
    fn sweep(&self, tex_out: &mut [TextureCode], vrad: &PolarGrid<'_>) -> TextureSummary {
        self.sweep_sequential(tex_out, vrad)
    }
}

/// Flat entry point taking every parameter separately. Grids are flattened
/// azimuth-major with `n_rang` bins per ray.
#[allow(clippy::too_many_arguments)]
pub fn compute_texture(
    tex_out: &mut [TextureCode],
    dbz_in: &[i32],
    vrad_in: &[i32],
    n_rang_neighborhood: usize,
    n_azim_neighborhood: usize,
    n_count_min: usize,
    tex_offset: f32,
    tex_scale: f32,
    dbz_offset: f32,
    dbz_scale: f32,
    vrad_offset: f32,
    vrad_scale: f32,
    vrad_missing: i32,
    n_rang: usize,
    n_azim: usize,
) -> TextureResult<TextureSummary> {
    let config = TextureConfig {
        neighborhood: Neighborhood::new(n_rang_neighborhood, n_azim_neighborhood),
        n_count_min,
        tex: Calibration::new(tex_offset, tex_scale),
        dbz: Calibration::new(dbz_offset, dbz_scale),
        vrad: Calibration::with_missing(vrad_offset, vrad_scale, vrad_missing),
        kernel: KernelKind::Moments,
    };
    let dims = ScanDims::new(n_rang, n_azim)?;
    TextureComputer::new(config)?.compute_into(tex_out, dbz_in, vrad_in, dims)
}
