use crate::generator::scan::{build_scan, SyntheticScan};
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use serde::Serialize;
use texcore::prelude::{KernelKind, TextureSummary};
use texcore::TextureComputer;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub kernel: KernelKind,
    pub summary: TextureSummary,
    /// Largest code difference against the other kernel.
    pub max_kernel_delta: i32,
    /// Cells where only one kernel produced a value.
    pub no_data_mismatches: usize,
    /// Mean texture in physical units over computed cells.
    pub mean_texture: Option<f64>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn build_scan(&self) -> anyhow::Result<SyntheticScan> {
        build_scan(
            &self.config.scan,
            &self.config.texture.vrad,
            &self.config.texture.dbz,
        )
        .context("generating synthetic scan")
    }

    pub fn execute(&self, scan: &SyntheticScan) -> anyhow::Result<WorkflowResult> {
        let texture = &self.config.texture;

        let primary = TextureComputer::new(texture.clone())
            .context("configuring texture computer")?;
        let (image, summary) = primary
            .compute_image(&scan.dbz, &scan.vrad, scan.dims)
            .context("computing texture")?;

        let cross_kernel = texture.kernel.other();
        let cross = TextureComputer::new(texture.with_kernel(cross_kernel))
            .context("configuring cross-check computer")?;
        let (cross_image, _) = cross
            .compute_image(&scan.dbz, &scan.vrad, scan.dims)
            .context("computing cross-check texture")?;

        let mut max_kernel_delta = 0;
        let mut no_data_mismatches = 0;
        for (a, b) in image.iter().zip(cross_image.iter()) {
            match (a.value(), b.value()) {
                (Some(a), Some(b)) => max_kernel_delta = max_kernel_delta.max((a - b).abs()),
                (None, None) => {}
                _ => no_data_mismatches += 1,
            }
        }

        let physical: Vec<f64> = image
            .iter()
            .filter_map(|code| code.value())
            .filter_map(|code| texture.tex.to_physical(code))
            .collect();
        let mean_texture = if physical.is_empty() {
            None
        } else {
            Some(physical.iter().sum::<f64>() / physical.len() as f64)
        };

        info!(
            "kernel {:?} vs {:?}: max delta {}, no-data mismatches {}",
            texture.kernel, cross_kernel, max_kernel_delta, no_data_mismatches
        );

        Ok(WorkflowResult {
            kernel: texture.kernel,
            summary,
            max_kernel_delta,
            no_data_mismatches,
            mean_texture,
        })
    }
}
