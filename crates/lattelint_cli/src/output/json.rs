//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use crate::commands::remap::RemapResult;
use crate::commands::transform::TransformResult;

pub fn output_json(results: &[RemapResult]) -> Result<()> {
    let output: Vec<_> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path.display().to_string(),
                "diagnostics": r.diagnostics,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

pub fn output_transformed_json(results: &[TransformResult]) -> Result<()> {
    let output: Vec<_> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path.display().to_string(),
                "language": r.context.language(),
                "code": r.context.transformed_text(),
                "records": r.context.records(),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
