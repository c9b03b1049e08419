//! Remap command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use lattelint_core::{Diagnostic, Severity};
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::commands::load_processor;
use crate::fix::{apply_fixes, output_fix_summary};
use crate::output::output_results;

/// Remapped diagnostics for one template.
pub struct RemapResult {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl RemapResult {
    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Some(Severity::Error))
    }
}

/// The linter's messages, either per processed block or already flattened.
#[derive(Deserialize)]
#[serde(untagged)]
enum DiagnosticsInput {
    Groups(Vec<Vec<Diagnostic>>),
    Flat(Vec<Diagnostic>),
}

impl DiagnosticsInput {
    fn into_groups(self) -> Vec<Vec<Diagnostic>> {
        match self {
            DiagnosticsInput::Groups(groups) => groups,
            DiagnosticsInput::Flat(diagnostics) => vec![diagnostics],
        }
    }
}

pub fn run_remap(
    cli: &Cli,
    file: &Path,
    diagnostics: &str,
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
) -> Result<bool> {
    let processor = load_processor(cli)?;

    let text = std::fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;
    let groups = read_diagnostics(diagnostics)?;

    let context = processor.transform(&text, &file.to_string_lossy());
    if !context.is_template() {
        info!("{} is not a template, diagnostics are left as they are", file.display());
    }

    let results = vec![RemapResult {
        path: file.to_path_buf(),
        diagnostics: processor.remap(context, groups),
    }];

    if fix {
        let fix_summary = apply_fixes(&results, dry_run)?;
        output_fix_summary(&fix_summary, dry_run);

        if dry_run {
            return output_results(&results, format);
        }

        let unfixable_errors = results.iter().any(|r| {
            r.diagnostics
                .iter()
                .any(|d| d.fix.is_none() && d.severity() == Some(Severity::Error))
        });
        return Ok(unfixable_errors);
    }

    output_results(&results, format)
}

fn read_diagnostics(source: &str) -> Result<Vec<Vec<Diagnostic>>> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
        buf
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| miette::miette!("Failed to read {}: {}", source, e))?
    };

    let input: DiagnosticsInput = serde_json::from_str(&json)
        .map_err(|e| miette::miette!("Invalid diagnostics in {}: {}", source, e))?;

    Ok(input.into_groups())
}
