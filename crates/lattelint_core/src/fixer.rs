//! Applying remapped fixes to the original template.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::ProcessorError;
use crate::diagnostic::{Diagnostic, Fix};
use crate::line_index::LineIndex;

/// Result of applying fixes to a file.
#[derive(Debug)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self {
            fixes_applied: 0,
            fixed_content: content,
            modified: false,
        }
    }
}

/// Applies fixes to content.
///
/// Fix ranges must be in the coordinates of `content`, as produced by
/// remapping: UTF-16 offsets, as a JavaScript linter counts them. Fixes are
/// applied from the end of the text to the beginning; overlapping and
/// out-of-range fixes are skipped, as are ranges splitting a surrogate pair.
pub fn apply_fixes_to_content(content: &str, diagnostics: &[Diagnostic]) -> FixerResult {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();

    if fixes.is_empty() {
        return FixerResult::unchanged(content.to_string());
    }

    fixes.sort_by(|a, b| b.range[0].cmp(&a.range[0]));
    let fixes = filter_overlapping_fixes(fixes);

    // Byte ranges are resolved against the untouched content; descending
    // order keeps them valid while earlier edits are applied.
    let index = LineIndex::new(content);
    let mut result = content.to_string();
    let mut applied = 0;

    for fix in &fixes {
        let [start, end] = fix.range;

        if start > end || end > index.utf16_len() || !splits_no_char(&index, start, end) {
            warn!(
                "Invalid fix range: start={}, end={}, content_len={}",
                start,
                end,
                index.utf16_len()
            );
            continue;
        }

        let [start, end] = [start, end].map(|offset| index.to_byte(offset) as usize);
        debug!("Applying fix: replace bytes [{}..{}] with '{}'", start, end, fix.text);

        result.replace_range(start..end, &fix.text);
        applied += 1;
    }

    FixerResult {
        fixes_applied: applied,
        fixed_content: result,
        modified: applied > 0,
    }
}

/// Returns true if both UTF-16 offsets fall on character boundaries.
fn splits_no_char(index: &LineIndex, start: u32, end: u32) -> bool {
    [start, end]
        .into_iter()
        .all(|offset| index.to_utf16(index.to_byte(offset)) == offset)
}

/// Drops fixes overlapping an already accepted one.
///
/// Expects `fixes` sorted by start, descending; the later-starting fix wins.
fn filter_overlapping_fixes(fixes: Vec<&Fix>) -> Vec<&Fix> {
    let mut result: Vec<&Fix> = Vec::with_capacity(fixes.len());

    for fix in fixes {
        // Accepted fixes start at or after `fix`, so only the last one can overlap.
        let overlaps = result.last().is_some_and(|last| {
            let [start, end] = fix.range;
            !(end <= last.range[0] || start >= last.range[1])
        });

        if overlaps {
            warn!("Skipping overlapping fix at [{}, {}]", fix.range[0], fix.range[1]);
        } else {
            result.push(fix);
        }
    }

    result
}

/// Applies fixes to a file and writes the result.
pub fn apply_fixes_to_file(
    path: &Path,
    diagnostics: &[Diagnostic],
) -> Result<FixerResult, ProcessorError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ProcessorError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let result = apply_fixes_to_content(&content, diagnostics);

    if result.modified {
        fs::write(path, &result.fixed_content).map_err(|e| {
            ProcessorError::file(format!("Failed to write {}: {}", path.display(), e))
        })?;
    }

    Ok(result)
}
