use serde::{Deserialize, Serialize};

/// A single cell of the texture image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureCode {
    /// Quantized texture in the texture calibration's raw encoding.
    Value(i32),
    /// Too few valid velocity samples in the neighborhood.
    #[default]
    NoData,
}

impl TextureCode {
    pub fn value(self) -> Option<i32> {
        match self {
            TextureCode::Value(code) => Some(code),
            TextureCode::NoData => None,
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, TextureCode::NoData)
    }

    /// Flattens into a plain integer encoding, using `no_data` for the marker.
    pub fn to_raw(self, no_data: i32) -> i32 {
        self.value().unwrap_or(no_data)
    }

    /// Unsigned byte product encoding; codes saturate into `0..=255`.
    pub fn to_byte(self, no_data: u8) -> u8 {
        match self {
            TextureCode::Value(code) => code.clamp(0, u8::MAX as i32) as u8,
            TextureCode::NoData => no_data,
        }
    }
}

impl From<Option<i32>> for TextureCode {
    fn from(code: Option<i32>) -> Self {
        code.map_or(TextureCode::NoData, TextureCode::Value)
    }
}
