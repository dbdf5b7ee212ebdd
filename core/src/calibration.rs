use crate::prelude::{TextureError, TextureResult};
use serde::{Deserialize, Serialize};

/// Affine mapping between stored raw codes and physical values:
/// `physical = offset + scale * raw`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub offset: f32,
    pub scale: f32,
    /// Raw code reserved for "no valid measurement".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<i32>,
}

impl Calibration {
    pub fn new(offset: f32, scale: f32) -> Self {
        Self {
            offset,
            scale,
            missing: None,
        }
    }

    pub fn with_missing(offset: f32, scale: f32, missing: i32) -> Self {
        Self {
            offset,
            scale,
            missing: Some(missing),
        }
    }

    pub fn validate(&self, name: &str) -> TextureResult<()> {
        if !self.offset.is_finite() || !self.scale.is_finite() || self.scale == 0.0 {
            return Err(TextureError::InvalidCalibration(format!(
                "{} offset={} scale={}",
                name, self.offset, self.scale
            )));
        }
        Ok(())
    }

    pub fn is_missing(&self, raw: i32) -> bool {
        self.missing == Some(raw)
    }

    /// Physical value of `raw`, or `None` for the missing sentinel.
    pub fn to_physical(&self, raw: i32) -> Option<f64> {
        if self.is_missing(raw) {
            None
        } else {
            Some(self.offset as f64 + self.scale as f64 * raw as f64)
        }
    }

    /// Nearest raw code for a physical value. Halves round away from zero and
    /// out-of-range results saturate at the `i32` bounds.
    pub fn quantize(&self, value: f64) -> i32 {
        ((value - self.offset as f64) / self.scale as f64).round() as i32
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn physical_value_applies_offset_and_scale() {
        let cal = Calibration::with_missing(-32.0, 0.5, 0);
        assert_relative_eq!(cal.to_physical(10).unwrap(), -27.0);
        assert_eq!(cal.to_physical(0), None);
    }

    #[test]
    fn quantize_picks_nearest_code() {
        let cal = Calibration::new(1.0, 0.25);
        // (3.3 - 1.0) / 0.25 = 9.2
        assert_eq!(cal.quantize(3.3), 9);
        // (3.45 - 1.0) / 0.25 = 9.8
        assert_eq!(cal.quantize(3.45), 10);
        assert_eq!(Calibration::default().quantize(2.5), 3);
        assert_eq!(Calibration::default().quantize(-2.5), -3);
    }

    #[test]
    fn quantize_inverts_calibration() {
        let cal = Calibration::new(-10.0, 0.1);
        for raw in [-7, 0, 13, 250] {
            let value = cal.to_physical(raw).unwrap();
            assert_eq!(cal.quantize(value), raw);
        }
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = Calibration::new(0.0, 0.0).validate("tex").unwrap_err();
        assert!(matches!(err, TextureError::InvalidCalibration(_)));
        assert!(Calibration::new(0.0, f32::NAN).validate("vrad").is_err());
        assert!(Calibration::default().validate("dbz").is_ok());
    }
}
