//! lattelint CLI
//!
//! Prepares Latte templates for a general-purpose linter and maps the
//! linter's findings back onto the templates.

mod cli;
mod commands;
mod fix;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Transform { files, format } => {
            commands::transform::run_transform(&cli, files, *format)
        }
        Commands::Remap {
            file,
            diagnostics,
            format,
            fix,
            dry_run,
        } => commands::remap::run_remap(&cli, file, diagnostics, *format, *fix, *dry_run),
        Commands::Init { force } => {
            commands::init::run_init(*force)?;
            Ok(false)
        }
    }
}
