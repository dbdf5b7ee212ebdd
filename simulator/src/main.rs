use clap::Parser;
use std::path::PathBuf;
use texcore::prelude::KernelKind;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

/// Kernel names follow the serde encoding used in workflow files.
fn parse_kernel(value: &str) -> Result<KernelKind, String> {
    serde_yaml::from_str(value).map_err(|err| format!("unknown kernel '{}': {}", value, err))
}

#[derive(Parser)]
#[command(author, version, about = "Velocity texture driver on synthetic polar scans")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 64)]
    n_rang: usize,
    #[arg(long, default_value_t = 360)]
    n_azim: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Standard-deviation kernel: moments or direct
    #[arg(long, default_value = "moments", value_parser = parse_kernel)]
    kernel: KernelKind,
    /// Print the full result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.n_rang, args.n_azim, args.seed, args.kernel)
    };

    let runner = Runner::new(workflow_config);
    let scan = runner.build_scan()?;
    let result = runner.execute(&scan)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Texture run ({:?}) -> computed {}, no-data {}, border {}, kernel delta {}, mean {}",
            result.kernel,
            result.summary.computed,
            result.summary.no_data,
            result.summary.border,
            result.max_kernel_delta,
            result
                .mean_texture
                .map(|v| format!("{:.3} m/s", v))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_flag_uses_workflow_names() {
        assert_eq!(parse_kernel("moments"), Ok(KernelKind::Moments));
        assert_eq!(parse_kernel("direct"), Ok(KernelKind::Direct));
        assert!(parse_kernel("centered").is_err());
    }

    #[test]
    fn args_parse_kernel_flag() {
        let args =
            Args::try_parse_from(["texsim", "--kernel", "direct", "--n-rang", "16"]).unwrap();
        assert_eq!(args.kernel, KernelKind::Direct);
        assert_eq!(args.n_rang, 16);
        assert!(Args::try_parse_from(["texsim", "--kernel", "median"]).is_err());
    }
}
