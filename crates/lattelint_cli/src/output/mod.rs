//! Output formatting module

mod json;
mod text;

use miette::Result;

use crate::cli::OutputFormat;
use crate::commands::remap::RemapResult;
use crate::commands::transform::TransformResult;

/// Prints remapped diagnostics. Returns true if any has error severity.
pub fn output_results(results: &[RemapResult], format: OutputFormat) -> Result<bool> {
    let has_errors = results.iter().any(|r| r.has_errors());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_errors)
}

/// Prints the linter input produced for each template.
pub fn output_transformed(results: &[TransformResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_transformed_json(results)?,
        OutputFormat::Text => text::output_transformed_text(results),
    }

    Ok(())
}
