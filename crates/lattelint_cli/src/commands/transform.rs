//! Transform command implementation

use std::io;
use std::path::PathBuf;

use lattelint_core::{LatteProcessor, ProcessingContext};
use miette::Result;
use rayon::prelude::*;
use tracing::warn;

use crate::cli::{Cli, OutputFormat};
use crate::commands::load_processor;
use crate::output::output_transformed;

/// A template and the linter input produced for it.
pub struct TransformResult {
    pub path: PathBuf,
    pub context: ProcessingContext,
}

type TransformFilesResult = (Vec<TransformResult>, Vec<(PathBuf, io::Error)>);

pub fn run_transform(cli: &Cli, files: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let processor = load_processor(cli)?;

    let (results, failures) = transform_files(&processor, files);

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to transform:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    output_transformed(&results, format)?;

    Ok(!failures.is_empty())
}

/// Transforms files in parallel; each file gets its own context.
fn transform_files(processor: &LatteProcessor, files: &[PathBuf]) -> TransformFilesResult {
    let results: Vec<Result<TransformResult, (PathBuf, io::Error)>> = files
        .par_iter()
        .map(|path| {
            let text = std::fs::read_to_string(path).map_err(|e| (path.clone(), e))?;
            let context = processor.transform(&text, &path.to_string_lossy());
            Ok(TransformResult {
                path: path.clone(),
                context,
            })
        })
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(transformed) => successes.push(transformed),
            Err((path, error)) => {
                warn!("Failed to read {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    (successes, failures)
}
