//! Host language of a template, named by the suffix before the template extension.

use serde::Serialize;

/// The language the non-directive text of a template is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostLanguage {
    JavaScript,
    TypeScript,
    Css,
    Text,
    /// HTML or XML markup; the default for a bare template extension.
    Markup,
}

impl HostLanguage {
    /// Detects the host language from `filename` with its template `extension` stripped.
    ///
    /// `app.js.latte` is JavaScript, `app.latte` is markup.
    pub fn detect(filename: &str, extension: &str) -> Self {
        let stem = filename.strip_suffix(extension).unwrap_or(filename);
        let inner = match stem.rsplit_once('.') {
            Some((_, inner)) if !inner.contains(['/', '\\']) => inner,
            _ => return HostLanguage::Markup,
        };

        match inner.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => HostLanguage::JavaScript,
            "ts" | "mts" | "cts" => HostLanguage::TypeScript,
            "css" => HostLanguage::Css,
            "txt" => HostLanguage::Text,
            _ => HostLanguage::Markup,
        }
    }
}

impl std::fmt::Display for HostLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HostLanguage::JavaScript => "javascript",
            HostLanguage::TypeScript => "typescript",
            HostLanguage::Css => "css",
            HostLanguage::Text => "text",
            HostLanguage::Markup => "markup",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("test.js.latte", HostLanguage::JavaScript)]
    #[case("test.mjs.latte", HostLanguage::JavaScript)]
    #[case("test.ts.latte", HostLanguage::TypeScript)]
    #[case("test.css.latte", HostLanguage::Css)]
    #[case("test.txt.latte", HostLanguage::Text)]
    #[case("test.latte", HostLanguage::Markup)]
    #[case("test.html.latte", HostLanguage::Markup)]
    #[case("dir.js/test.latte", HostLanguage::Markup)]
    #[case("APP.JS.latte", HostLanguage::JavaScript)]
    fn test_detect(#[case] filename: &str, #[case] expected: HostLanguage) {
        assert_eq!(HostLanguage::detect(filename, ".latte"), expected);
    }

    #[test]
    fn test_display_matches_serialization() {
        let json = serde_json::to_string(&HostLanguage::JavaScript).unwrap();
        assert_eq!(json, format!("\"{}\"", HostLanguage::JavaScript));
    }
}
