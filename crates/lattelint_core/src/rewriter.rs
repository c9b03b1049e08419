//! Rewriting the original text into linter input.

use lattelint_ast::Span;
use serde::Serialize;
use tracing::trace;

use crate::replacement::ReplacementPolicy;
use crate::scanner::Directive;

/// Link between one substitution and the original text it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    /// Replaced range of the original text: the directive, plus the
    /// indentation before it when a standalone directive was elided.
    pub original: Span,
    /// Range the substitution occupies in the transformed text.
    pub transformed: Span,
    /// The substitution text.
    pub substitution: String,
}

/// Transformed text plus the mapping back to the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Ascending and pairwise disjoint in both coordinate spaces.
    pub records: Vec<MappingRecord>,
}

/// Replaces each directive with its substitution.
///
/// `directives` must be ascending and disjoint. When a directive's
/// substitution is empty and the directive is alone on its line, the
/// indentation before it is consumed too, leaving an empty line behind.
pub fn rewrite(text: &str, directives: &[Directive<'_>], policy: &ReplacementPolicy) -> Rewrite {
    let mut out = String::with_capacity(text.len());
    let mut records = Vec::with_capacity(directives.len());
    let mut cursor = 0usize;

    for directive in directives {
        let substitution = policy.resolve(directive.content);
        let mut start = directive.span.start as usize;
        let end = directive.span.end as usize;

        if substitution.is_empty()
            && let Some(line_start) = standalone_line_start(text, start, end)
        {
            start = line_start.max(cursor);
        }

        out.push_str(&text[cursor..start]);
        let transformed_start = out.len();
        out.push_str(&substitution);

        trace!(
            content = directive.content,
            substitution = substitution.as_str(),
            "directive {}..{}",
            start,
            end
        );

        records.push(MappingRecord {
            original: Span::from(start..end),
            transformed: Span::from(transformed_start..out.len()),
            substitution,
        });
        cursor = end;
    }

    out.push_str(&text[cursor..]);

    Rewrite { text: out, records }
}

/// Returns the start of the line when only whitespace surrounds `start..end` on it.
fn standalone_line_start(text: &str, start: usize, end: usize) -> Option<usize> {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);

    let before = &text[line_start..start];
    let after = &text[end..line_end];
    (before.trim().is_empty() && after.trim().is_empty()).then_some(line_start)
}
