//! Substitution text for directives.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

/// Placeholder standing in for every directive that produces a value.
///
/// An empty array literal is a valid expression in scripts and a harmless
/// token in styles. It is deliberately not a string literal, so quote-style
/// fixers leave it alone and the mapping stays intact.
pub const PLACEHOLDER: &str = "[]";

/// Directive content written in place of a literal `{`.
pub const ESCAPED_OPEN: &str = "l";

/// Directive content written in place of a literal `}`.
pub const ESCAPED_CLOSE: &str = "r";

/// Caller-supplied replacement. `None` defers to the built-in rule.
pub type ReplacementFn = dyn Fn(&str) -> Option<String> + Send + Sync;

fn expression_like() -> &'static Regex {
    static EXPRESSION_LIKE: OnceLock<Regex> = OnceLock::new();
    EXPRESSION_LIKE.get_or_init(|| {
        Regex::new(
            r"^(?:[=_$]|(?:control|link|plink|asset)(?:[^A-Za-z0-9_]|$)|[A-Za-z0-9_][A-Za-z0-9_:\\]*(?:\(|::))",
        )
        .expect("expression pattern is valid")
    })
}

/// Resolves directive contents to substitution text.
#[derive(Clone, Default)]
pub struct ReplacementPolicy {
    custom: Option<Arc<ReplacementFn>>,
}

impl fmt::Debug for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplacementPolicy")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ReplacementPolicy {
    /// Creates a policy using only the built-in rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy consulting `custom` before the built-in rule.
    pub fn with_custom(custom: Arc<ReplacementFn>) -> Self {
        Self {
            custom: Some(custom),
        }
    }

    /// Returns the substitution for a directive's inner content.
    pub fn resolve(&self, content: &str) -> String {
        self.custom
            .as_ref()
            .and_then(|custom| custom(content))
            .unwrap_or_else(|| default_replacement(content).to_string())
    }
}

/// The built-in rule.
///
/// Escape markers become the literal delimiter, expression-like content becomes
/// [`PLACEHOLDER`], and everything else (control structures) is elided.
pub fn default_replacement(content: &str) -> &'static str {
    match content {
        ESCAPED_OPEN => "{",
        ESCAPED_CLOSE => "}",
        _ if expression_like().is_match(content) => PLACEHOLDER,
        _ => "",
    }
}
