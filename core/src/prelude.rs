use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::calibration::Calibration;
pub use crate::grid::{PolarGrid, ScanDims};
pub use crate::output::TextureCode;
pub use crate::processing::neighborhood::Neighborhood;

/// Grid axis, used when reporting shape violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAxis {
    Range,
    Azimuth,
}

impl fmt::Display for ScanAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanAxis::Range => write!(f, "range"),
            ScanAxis::Azimuth => write!(f, "azimuth"),
        }
    }
}

/// Standard-deviation strategy used by the texture sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    /// One pass over the window accumulating the first two raw moments.
    #[default]
    Moments,
    /// Two passes: window mean first, then the mean squared deviation.
    Direct,
}

impl KernelKind {
    pub fn other(self) -> Self {
        match self {
            KernelKind::Moments => KernelKind::Direct,
            KernelKind::Direct => KernelKind::Moments,
        }
    }
}

/// Full parameter set for one texture computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    pub neighborhood: Neighborhood,
    #[serde(default)]
    pub n_count_min: usize,
    pub tex: Calibration,
    /// Reflectivity calibration; carried for dbz-based texture variants.
    #[serde(default)]
    pub dbz: Calibration,
    pub vrad: Calibration,
    #[serde(default)]
    pub kernel: KernelKind,
}

impl TextureConfig {
    pub fn with_kernel(&self, kernel: KernelKind) -> Self {
        Self {
            kernel,
            ..self.clone()
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::new(3, 3),
            n_count_min: 0,
            tex: Calibration::default(),
            dbz: Calibration::default(),
            vrad: Calibration::with_missing(0.0, 1.0, 255),
            kernel: KernelKind::Moments,
        }
    }
}

/// Cell counts for a single sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSummary {
    pub computed: usize,
    pub no_data: usize,
    pub border: usize,
}

impl TextureSummary {
    pub fn merge(self, other: Self) -> Self {
        Self {
            computed: self.computed + other.computed,
            no_data: self.no_data + other.no_data,
            border: self.border + other.border,
        }
    }

    pub fn interior(&self) -> usize {
        self.computed + self.no_data
    }
}

/// Common error type for texture computation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TextureError {
    #[error("invalid dimensions: n_rang={n_rang}, n_azim={n_azim}")]
    InvalidDimensions { n_rang: usize, n_azim: usize },
    #[error("{field} field has {actual} elements, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{axis} neighborhood extent {extent} does not fit a grid of {grid}")]
    NeighborhoodTooLarge {
        axis: ScanAxis,
        extent: usize,
        grid: usize,
    },
    #[error("range bin {rang} is outside the interior {start}..{end}")]
    BorderCell {
        rang: usize,
        start: usize,
        end: usize,
    },
    #[error("invalid neighborhood: {0}")]
    InvalidNeighborhood(String),
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),
}

pub type TextureResult<T> = Result<T, TextureError>;
