use crate::generator::scan::ScanGeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use texcore::calibration::Calibration;
use texcore::prelude::{KernelKind, Neighborhood, TextureConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub scan: ScanGeneratorConfig,
    #[serde(default = "default_texture")]
    pub texture: TextureConfig,
}

/// 8-bit product encodings: velocity in 0.25 m/s steps, reflectivity in
/// 0.5 dBZ steps, texture in 0.1 m/s steps.
fn default_texture() -> TextureConfig {
    TextureConfig {
        neighborhood: Neighborhood::new(3, 3),
        n_count_min: 5,
        tex: Calibration::new(0.0, 0.1),
        dbz: Calibration::with_missing(-32.0, 0.5, 255),
        vrad: Calibration::with_missing(-32.0, 0.25, 255),
        kernel: KernelKind::Moments,
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(n_rang: usize, n_azim: usize, seed: u64, kernel: KernelKind) -> Self {
        Self {
            scan: ScanGeneratorConfig {
                n_rang,
                n_azim,
                seed,
                ..Default::default()
            },
            texture: default_texture().with_kernel(kernel),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            scan: ScanGeneratorConfig::default(),
            texture: default_texture(),
        }
    }
}
