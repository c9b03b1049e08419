//! Text output formatter

use lattelint_core::{Diagnostic, Severity};

use crate::commands::remap::RemapResult;
use crate::commands::transform::TransformResult;

pub fn output_text(results: &[RemapResult]) {
    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for diag in &result.diagnostics {
            let severity = match diag.severity() {
                Some(Severity::Error) => "error",
                Some(Severity::Warning) => "warning",
                _ => "off",
            };
            println!(
                "  {} {} [{}]: {}",
                location(diag),
                severity,
                diag.rule_id().unwrap_or("parse"),
                diag.message().unwrap_or_default()
            );
        }
    }

    let total_issues: usize = results.iter().map(|r| r.diagnostics.len()).sum();
    let total_errors = results
        .iter()
        .flat_map(|r| &r.diagnostics)
        .filter(|d| d.severity() == Some(Severity::Error))
        .count();

    println!();
    println!("Found {} issues ({} errors)", total_issues, total_errors);
}

/// `line:column`, with `-end_line:end_column` when known; `-` for whole-file messages.
fn location(diag: &Diagnostic) -> String {
    match (diag.line, diag.column, diag.end_line, diag.end_column) {
        (Some(line), Some(column), Some(end_line), Some(end_column)) => {
            format!("{}:{}-{}:{}", line, column, end_line, end_column)
        }
        (Some(line), Some(column), _, _) => format!("{}:{}", line, column),
        _ => "-".to_string(),
    }
}


/// A single template is printed as is, so the output can be piped to a linter.
pub fn output_transformed_text(results: &[TransformResult]) {
    if let [only] = results {
        print!("{}", only.context.transformed_text());
        return;
    }

    for result in results {
        println!("==> {} <==", result.path.display());
        println!("{}", result.context.transformed_text());
    }
}
