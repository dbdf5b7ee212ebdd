use crate::grid::ScanDims;
use crate::prelude::{ScanAxis, TextureError, TextureResult};
use serde::{Deserialize, Serialize};

/// Window of `n_azim` by `n_rang` cells around a target cell.
///
/// Offsets along an axis run from `-(extent / 2)` upward, so an even extent
/// reaches one cell further backward than forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub n_rang: usize,
    pub n_azim: usize,
}

impl Neighborhood {
    pub fn new(n_rang: usize, n_azim: usize) -> Self {
        Self { n_rang, n_azim }
    }

    pub fn half_rang(&self) -> usize {
        self.n_rang / 2
    }

    pub fn half_azim(&self) -> usize {
        self.n_azim / 2
    }

    pub fn size(&self) -> usize {
        self.n_rang * self.n_azim
    }

    pub fn validate(&self) -> TextureResult<()> {
        if self.n_rang == 0 || self.n_azim == 0 {
            return Err(TextureError::InvalidNeighborhood(format!(
                "extents must be positive, got {}x{}",
                self.n_rang, self.n_azim
            )));
        }
        Ok(())
    }

    pub fn check_fits(&self, dims: ScanDims) -> TextureResult<()> {
        if self.n_rang >= dims.n_rang {
            return Err(TextureError::NeighborhoodTooLarge {
                axis: ScanAxis::Range,
                extent: self.n_rang,
                grid: dims.n_rang,
            });
        }
        if self.n_azim >= dims.n_azim {
            return Err(TextureError::NeighborhoodTooLarge {
                axis: ScanAxis::Azimuth,
                extent: self.n_azim,
                grid: dims.n_azim,
            });
        }
        Ok(())
    }

    /// Range bins whose whole window lies inside the scan.
    pub fn interior_range(&self, dims: ScanDims) -> std::ops::Range<usize> {
        let half = self.half_rang();
        half..dims.n_rang.saturating_sub(half).max(half)
    }

    /// `(azim_delta, rang_delta)` pairs, azimuth outer.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> {
        let half_azim = self.half_azim() as isize;
        let half_rang = self.half_rang() as isize;
        let n_rang = self.n_rang as isize;
        (0..self.n_azim as isize).flat_map(move |da| {
            (0..n_rang).map(move |dr| (da - half_azim, dr - half_rang))
        })
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_window_is_centered() {
        let offsets: Vec<_> = Neighborhood::new(3, 3).offsets().collect();
        assert_eq!(offsets.len(), 9);
        assert_eq!(offsets[0], (-1, -1));
        assert_eq!(offsets[4], (0, 0));
        assert_eq!(offsets[8], (1, 1));
    }

    #[test]
    fn even_window_leans_backward() {
        let offsets: Vec<_> = Neighborhood::new(4, 2).offsets().collect();
        assert_eq!(offsets.len(), 8);
        assert_eq!(offsets.first(), Some(&(-1, -2)));
        assert_eq!(offsets.last(), Some(&(0, 1)));
    }

    #[test]
    fn interior_range_excludes_borders() {
        let dims = ScanDims::new(11, 12).unwrap();
        assert_eq!(Neighborhood::new(3, 3).interior_range(dims), 1..10);
        assert_eq!(Neighborhood::new(5, 3).interior_range(dims), 2..9);
        assert_eq!(Neighborhood::new(4, 3).interior_range(dims), 2..9);
    }

    #[test]
    fn window_must_be_smaller_than_grid() {
        let dims = ScanDims::new(4, 5).unwrap();
        assert!(Neighborhood::new(3, 3).check_fits(dims).is_ok());
        assert_eq!(
            Neighborhood::new(4, 3).check_fits(dims),
            Err(TextureError::NeighborhoodTooLarge {
                axis: ScanAxis::Range,
                extent: 4,
                grid: 4
            })
        );
        assert!(matches!(
            Neighborhood::new(3, 5).check_fits(dims),
            Err(TextureError::NeighborhoodTooLarge {
                axis: ScanAxis::Azimuth,
                ..
            })
        ));
        assert!(Neighborhood::new(0, 3).validate().is_err());
    }
}
