//! Detection of regions where directive delimiters follow different rules.
//!
//! A region is declared by an `n:syntax` attribute on a `<script>` or
//! `<style>` element and spans from its opening tag through the matching
//! closing tag.

use std::sync::OnceLock;

use lattelint_ast::Span;
use regex::{Regex, RegexBuilder};
use tracing::trace;

/// How directive delimiters are recognized inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxMode {
    /// `{...}` directives (outside any region).
    Normal,
    /// No directives are recognized (`n:syntax="off"`).
    Off,
    /// Only `{{...}}` directives are recognized (`n:syntax="double"`).
    Double,
}

/// A span of the original text with its delimiter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRegion {
    pub span: Span,
    pub mode: SyntaxMode,
}

fn opening_tag() -> &'static Regex {
    static OPENING_TAG: OnceLock<Regex> = OnceLock::new();
    OPENING_TAG.get_or_init(|| {
        RegexBuilder::new(
            r#"<(script|style)\b[^>]*?\bn:syntax\s*=\s*(?:"(off|double)"|'(off|double)'|(off|double)\b)[^>]*>"#,
        )
        .case_insensitive(true)
        .build()
        .expect("opening tag pattern is valid")
    })
}

fn closing_tag(element: &str) -> &'static Regex {
    static SCRIPT: OnceLock<Regex> = OnceLock::new();
    static STYLE: OnceLock<Regex> = OnceLock::new();

    let (cell, pattern) = if element.eq_ignore_ascii_case("style") {
        (&STYLE, r"</style\s*>")
    } else {
        (&SCRIPT, r"</script\s*>")
    };
    cell.get_or_init(|| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("closing tag pattern is valid")
    })
}

/// Finds every mode region in `text`, ascending and disjoint.
///
/// An opening tag without a closing tag declares nothing. Detection resumes
/// after each accepted closing tag, so elements nested inside a region never
/// open a second one.
pub fn detect_regions(text: &str) -> Vec<ModeRegion> {
    let mut regions = Vec::new();
    let mut search_from = 0;

    while let Some(caps) = opening_tag().captures_at(text, search_from) {
        let Some(tag) = caps.get(0) else { break };
        let element = caps.get(1).map_or("script", |m| m.as_str());
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let mode = if value.eq_ignore_ascii_case("off") {
            SyntaxMode::Off
        } else {
            SyntaxMode::Double
        };

        let Some(close) = closing_tag(element).find_at(text, tag.end()) else {
            trace!(start = tag.start(), "unclosed <{}> ignored", element);
            search_from = tag.end();
            continue;
        };

        regions.push(ModeRegion {
            span: Span::from(tag.start()..close.end()),
            mode,
        });
        search_from = close.end();
    }

    regions
}

/// Returns the mode in effect at `offset`.
///
/// `regions` must be ascending and disjoint, as returned by [`detect_regions`].
pub fn mode_at(regions: &[ModeRegion], offset: u32) -> SyntaxMode {
    let idx = regions.partition_point(|r| r.span.end <= offset);
    match regions.get(idx) {
        Some(region) if region.span.contains(offset) => region.mode,
        _ => SyntaxMode::Normal,
    }
}
