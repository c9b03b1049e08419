//! Applying remapped fixes to templates

use std::path::PathBuf;

use lattelint_core::apply_fixes_to_file;
use miette::Result;
use tracing::error;

use crate::commands::remap::RemapResult;

/// Summary of applied fixes.
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
    pub errors: Vec<(PathBuf, String)>,
}

/// Applies remapped fixes to each template that has any.
pub fn apply_fixes(results: &[RemapResult], dry_run: bool) -> Result<FixSummary> {
    let mut summary = FixSummary {
        total_fixes: 0,
        files_fixed: 0,
        fixes_by_file: Vec::new(),
        errors: Vec::new(),
    };

    for result in results {
        let fixable = result.diagnostics.iter().filter(|d| d.fix.is_some()).count();
        if fixable == 0 {
            continue;
        }

        let applied = if dry_run {
            fixable
        } else {
            match apply_fixes_to_file(&result.path, &result.diagnostics) {
                Ok(fixer_result) if fixer_result.modified => fixer_result.fixes_applied,
                Ok(_) => continue,
                Err(e) => {
                    error!("Failed to fix {}: {}", result.path.display(), e);
                    summary.errors.push((result.path.clone(), e.to_string()));
                    continue;
                }
            }
        };

        summary.fixes_by_file.push((result.path.clone(), applied));
        summary.total_fixes += applied;
        summary.files_fixed += 1;
    }

    Ok(summary)
}

/// Outputs the fix summary.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 && summary.errors.is_empty() {
        println!("No fixable issues found.");
        return;
    }

    if summary.total_fixes > 0 {
        let action = if dry_run { "Would fix" } else { "Fixed" };
        println!(
            "\n{} {} issues in {} files:",
            action, summary.total_fixes, summary.files_fixed
        );
        for (path, count) in &summary.fixes_by_file {
            println!("  {}: {} fixes", path.display(), count);
        }

        if dry_run {
            println!("\nRun without --dry-run to apply fixes.");
        }
    }

    if !summary.errors.is_empty() {
        eprintln!("\nFailed to fix {} file(s):", summary.errors.len());
        for (path, err) in &summary.errors {
            eprintln!("  {}: {}", path.display(), err);
        }
    }
}
