//! Subcommand implementations

pub mod init;
pub mod remap;
pub mod transform;

use lattelint_core::{LatteProcessor, ProcessorConfig};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::Cli;

/// Builds the processor from `--config`, a discovered config file, or defaults.
pub fn load_processor(cli: &Cli) -> Result<LatteProcessor> {
    let config = if let Some(ref path) = cli.config {
        ProcessorConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    Ok(LatteProcessor::new(config))
}

pub fn find_config() -> Result<ProcessorConfig> {
    if let Some(path) = ProcessorConfig::discover(".") {
        info!("Using config: {}", path.display());
        return ProcessorConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(ProcessorConfig::new())
}
