use crate::prelude::{TextureError, TextureResult};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Dimensions of a polar scan stored azimuth-major: `[azimuth][range]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDims {
    pub n_rang: usize,
    pub n_azim: usize,
}

impl ScanDims {
    pub fn new(n_rang: usize, n_azim: usize) -> TextureResult<Self> {
        // Cell count and signed azimuth offsets must both stay representable.
        let fits = n_rang
            .checked_mul(n_azim)
            .is_some_and(|cells| cells <= isize::MAX as usize);
        if n_rang == 0 || n_azim == 0 || !fits {
            return Err(TextureError::InvalidDimensions { n_rang, n_azim });
        }
        Ok(Self { n_rang, n_azim })
    }

    pub fn cell_count(&self) -> usize {
        self.n_rang * self.n_azim
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_azim, self.n_rang)
    }

    /// Wraps a signed azimuth position onto `[0, n_azim)`.
    pub fn wrap_azim(&self, azim: isize) -> usize {
        azim.rem_euclid(self.n_azim as isize) as usize
    }

    /// Flat index of `(azim, rang)`. Azimuth is cyclic, range is linear and
    /// must already be in bounds.
    pub fn index(&self, azim: isize, rang: usize) -> usize {
        debug_assert!(rang < self.n_rang, "range {} out of bounds", rang);
        self.wrap_azim(azim) * self.n_rang + rang
    }

    pub fn check_len(&self, field: &'static str, actual: usize) -> TextureResult<()> {
        if actual != self.cell_count() {
            return Err(TextureError::LengthMismatch {
                field,
                expected: self.cell_count(),
                actual,
            });
        }
        Ok(())
    }
}

/// Read-only view of a flattened raw scan field.
#[derive(Debug, Clone, Copy)]
pub struct PolarGrid<'a> {
    dims: ScanDims,
    data: ArrayView2<'a, i32>,
}

impl<'a> PolarGrid<'a> {
    pub fn new(field: &'static str, values: &'a [i32], dims: ScanDims) -> TextureResult<Self> {
        dims.check_len(field, values.len())?;
        let data = ArrayView2::from_shape(dims.shape(), values).map_err(|_| {
            TextureError::LengthMismatch {
                field,
                expected: dims.cell_count(),
                actual: values.len(),
            }
        })?;
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> ScanDims {
        self.dims
    }

    /// Raw value at a possibly out-of-range azimuth, wrapped cyclically.
    pub fn get(&self, azim: isize, rang: usize) -> i32 {
        self.data[[self.dims.wrap_azim(azim), rang]]
    }
}
