//! Velocity texture core for polar weather-radar scans.
//!
//! Texture is the local standard deviation of calibrated radial velocity in a
//! range/azimuth window, quantized back into a raw integer code. The modules
//! provide the polar grid view, calibration, the statistics kernels, and the
//! texture sweep itself.

pub mod calibration;
pub mod grid;
pub mod math;
pub mod output;
pub mod prelude;
pub mod processing;

pub use prelude::{KernelKind, TextureConfig, TextureError, TextureResult, TextureSummary};
pub use processing::{compute_texture, TextureComputer};
