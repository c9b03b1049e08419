//! Directive scanning.
//!
//! A directive is an opening brace immediately followed by a leading
//! character, extending to the nearest closing brace. This is a heuristic
//! scan, not a parser: a closing brace inside a string literal in the
//! directive's expression ends the directive early.

use lattelint_ast::{Span, to_offset};

use crate::region::{ModeRegion, SyntaxMode, mode_at};

/// A directive found in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Span of the whole directive, delimiters included.
    pub span: Span,
    /// Text between the delimiters.
    pub content: &'a str,
    /// Whether the directive used the doubled `{{...}}` delimiters.
    pub double: bool,
}

/// Characters that may follow an opening delimiter.
///
/// Excludes `}` (empty pair), quotes and whitespace, so object literals such
/// as `{}` or `{'a': 1}` are never taken for directives.
#[inline]
fn is_leading_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'$' | b'\\' | b'/' | b'=')
}

/// Scans `text` for directives in a single pass.
///
/// The mode at each candidate's opening brace decides what may match there:
/// nothing inside `off` regions, only `{{...}}` inside `double` regions and
/// only `{...}` elsewhere. Matches never overlap.
pub fn scan_directives<'a>(text: &'a str, regions: &[ModeRegion]) -> Vec<Directive<'a>> {
    let bytes = text.as_bytes();
    let mut directives = Vec::new();
    let mut pos = 0;

    while let Some(found) = find_open_brace(bytes, pos) {
        pos = found;
        let directive = match mode_at(regions, to_offset(pos)) {
            SyntaxMode::Off => None,
            SyntaxMode::Normal => match_delimited(text, pos, "{", "}"),
            SyntaxMode::Double => match_delimited(text, pos, "{{", "}}"),
        };

        match directive {
            Some(directive) => {
                pos = directive.span.end as usize;
                directives.push(directive);
            }
            None => pos += 1,
        }
    }

    directives
}

fn find_open_brace(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == b'{')
        .map(|i| from + i)
}

fn match_delimited<'a>(
    text: &'a str,
    start: usize,
    open: &str,
    close: &str,
) -> Option<Directive<'a>> {
    let rest = text.get(start..)?;
    let after_open = rest.strip_prefix(open)?;
    if !after_open.bytes().next().is_some_and(is_leading_byte) {
        return None;
    }

    // Content is at least the leading character; the close search starts after it.
    let content_start = start + open.len();
    let close_at = text[content_start + 1..].find(close)? + content_start + 1;
    let end = close_at + close.len();

    Some(Directive {
        span: Span::from(start..end),
        content: &text[content_start..close_at],
        double: open.len() == 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::detect_regions;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn contents(text: &str) -> Vec<&str> {
        scan_directives(text, &detect_regions(text))
            .into_iter()
            .map(|d| d.content)
            .collect()
    }

    #[test]
    fn test_finds_directives_with_spans() {
        let text = "let a = {$b}; {if $c}x{/if}";
        let found = scan_directives(text, &[]);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].span, Span::new(8, 12));
        assert_eq!(found[0].content, "$b");
        assert_eq!(&text[found[1].span.range()], "{if $c}");
        assert_eq!(found[2].content, "/if");
        assert!(found.iter().all(|d| !d.double));
    }

    #[rstest]
    #[case::letter("{foo}", "foo")]
    #[case::underscore(r#"{_"Hello"}"#, r#"_"Hello""#)]
    #[case::dollar("{$var}", "$var")]
    #[case::backslash(r"{\Foo::bar()}", r"\Foo::bar()")]
    #[case::slash("{/foreach}", "/foreach")]
    #[case::equals("{=1 + 2}", "=1 + 2")]
    #[case::bare_sigil("{$}", "$")]
    fn test_leading_characters(#[case] text: &str, #[case] content: &str) {
        assert_eq!(contents(text), vec![content]);
    }

    #[rstest]
    #[case::empty_pair("console.log({});")]
    #[case::quoted_key("console.log({'a': 123});")]
    #[case::space("if (x) { return; }")]
    #[case::number("{1}")]
    #[case::unterminated("let a = {$b;")]
    fn test_not_directives(#[case] text: &str) {
        assert!(contents(text).is_empty());
    }

    #[test]
    fn test_nested_brackets_end_at_first_close() {
        assert_eq!(
            contents(r#"console.log({$array["key"]["nested"]});"#),
            vec![r#"$array["key"]["nested"]"#]
        );
    }

    #[test]
    fn test_close_brace_in_string_ends_directive_early() {
        assert_eq!(contents(r#"{="a}b"}"#), vec![r#"="a"#]);
    }

    #[test]
    fn test_multiline_content() {
        assert_eq!(
            contents("before {$multiline\nwith newlines} after"),
            vec!["$multiline\nwith newlines"]
        );
    }

    #[test]
    fn test_object_literal_inside_directive_like_text() {
        // `{` followed by a space is not a directive, the inner one is.
        assert_eq!(contents("x = { a: {$b} };"), vec!["$b"]);
    }

    #[test]
    fn test_unterminated_candidate_does_not_hide_later_text() {
        assert_eq!(contents("{$a {$b}"), vec!["$a {$b"]);
        assert_eq!(contents("{ {$b}"), vec!["$b"]);
    }

    #[test]
    fn test_off_region_is_left_alone() {
        let text = "{$a}<script n:syntax=\"off\">{if: 1}</script>{$b}";
        assert_eq!(contents(text), vec!["$a", "$b"]);
    }

    #[test]
    fn test_double_region_only_matches_double_braces() {
        let text = "{$a}<script n:syntax=double>{$single} {{$double}}</script>{{$outside}}";
        let found = scan_directives(text, &detect_regions(text));

        let contents: Vec<_> = found.iter().map(|d| (d.content, d.double)).collect();
        assert_eq!(contents, vec![("$a", false), ("$double", true), ("$outside", false)]);
    }

    #[test]
    fn test_double_directive_span_includes_both_braces() {
        let text = "<script n:syntax=double>{{if $x}}</script>";
        let found = scan_directives(text, &detect_regions(text));

        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].span.range()], "{{if $x}}");
        assert_eq!(found[0].content, "if $x");
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(contents("x = {_'žluťoučký'};"), vec!["_'žluťoučký'"]);
    }
}
