//! Diagnostic types as emitted by the host linter.
//!
//! Only the location, end location and fix range are interpreted. Every other
//! field is kept in an order-preserving map and written back untouched.

use lattelint_ast::Position;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity level as emitted by the host linter (`1` warning, `2` error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Off, or an unknown level.
    Off,
    /// Warning - should be reviewed.
    Warning,
    /// Error - must be fixed.
    Error,
}

impl From<u64> for Severity {
    fn from(level: u64) -> Self {
        match level {
            1 => Severity::Warning,
            2 => Severity::Error,
            _ => Severity::Off,
        }
    }
}

/// A linter finding.
///
/// Whole-file messages, such as "file ignored", carry no location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Line (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Column (1-indexed, in UTF-16 code units).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,

    /// Optional fix for this diagnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,

    /// Every other field, in input order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Diagnostic {
    /// Creates a new diagnostic at `line:column` with a message.
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("message".to_string(), Value::String(message.into()));
        Self {
            line: Some(line),
            column: Some(column),
            end_line: None,
            end_column: None,
            fix: None,
            extra,
        }
    }

    /// Sets the rule identifier.
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.extra
            .insert("ruleId".to_string(), Value::String(rule_id.into()));
        self
    }

    /// Sets the end location.
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Sets an auto-fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        let level = match severity {
            Severity::Off => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        };
        self.extra.insert("severity".to_string(), Value::from(level));
        self
    }

    /// Returns the start location, or `None` unless both line and column are set.
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.line?, self.column?))
    }

    /// Returns the message, if present.
    pub fn message(&self) -> Option<&str> {
        self.extra.get("message").and_then(Value::as_str)
    }

    /// Returns the rule identifier. Parse errors carry none.
    pub fn rule_id(&self) -> Option<&str> {
        self.extra.get("ruleId").and_then(Value::as_str)
    }

    /// Returns the severity, or `None` when absent.
    pub fn severity(&self) -> Option<Severity> {
        self.extra
            .get("severity")
            .and_then(Value::as_u64)
            .map(Severity::from)
    }
}

/// An auto-fix: replace `range` with `text`.
///
/// The range holds absolute character offsets counted in UTF-16 code units,
/// as JavaScript strings index them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub range: [u32; 2],
    pub text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fix {
    /// Creates a new fix.
    pub fn new(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self {
            range: [start, end],
            text: text.into(),
            extra: Map::new(),
        }
    }

    /// Creates a fix that inserts text at a position.
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(offset, offset, text)
    }

    /// Creates a fix that deletes a range.
    pub fn delete(start: u32, end: u32) -> Self {
        Self::new(start, end, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(1, 5, "Missing semicolon").with_rule_id("semi");

        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.column, Some(5));
        assert_eq!(diag.position(), Some(Position::new(1, 5)));
        assert_eq!(diag.message(), Some("Missing semicolon"));
        assert_eq!(diag.rule_id(), Some("semi"));
        assert!(diag.end_line.is_none());
        assert!(diag.fix.is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::new(2, 3, "msg")
            .with_rule_id("rule")
            .with_end(2, 9)
            .with_severity(Severity::Warning)
            .with_fix(Fix::insert(10, ";"));

        assert_eq!(diag.end_line, Some(2));
        assert_eq!(diag.end_column, Some(9));
        assert_eq!(diag.severity(), Some(Severity::Warning));
        assert_eq!(diag.fix.as_ref().map(|f| f.range), Some([10, 10]));
    }

    #[test]
    fn test_fix_constructors() {
        assert_eq!(Fix::insert(4, "x").range, [4, 4]);
        let delete = Fix::delete(5, 15);
        assert_eq!(delete.range, [5, 15]);
        assert!(delete.text.is_empty());
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::from(1), Severity::Warning);
        assert_eq!(Severity::from(2), Severity::Error);
        assert_eq!(Severity::from(0), Severity::Off);
        assert_eq!(Severity::from(7), Severity::Off);
    }

    #[test]
    fn test_deserialize_host_message() {
        let json = r#"{
            "ruleId": "no-undef",
            "severity": 2,
            "message": "'x' is not defined.",
            "line": 3,
            "column": 14,
            "nodeType": "Identifier",
            "messageId": "undef",
            "endLine": 3,
            "endColumn": 15
        }"#;

        let diag: Diagnostic = serde_json::from_str(json).unwrap();

        assert_eq!(diag.line, Some(3));
        assert_eq!(diag.column, Some(14));
        assert_eq!(diag.end_line, Some(3));
        assert_eq!(diag.end_column, Some(15));
        assert_eq!(diag.rule_id(), Some("no-undef"));
        assert_eq!(diag.severity(), Some(Severity::Error));
        assert_eq!(diag.extra["nodeType"], "Identifier");
    }

    #[test]
    fn test_absent_optional_fields_stay_absent() {
        let json = r#"{"line":1,"column":2,"message":"m","ruleId":null}"#;
        let diag: Diagnostic = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&diag).unwrap();

        assert!(out.get("endLine").is_none());
        assert!(out.get("endColumn").is_none());
        assert!(out.get("fix").is_none());
        assert_eq!(out["ruleId"], Value::Null);
        assert_eq!(diag.rule_id(), None);
    }

    #[test]
    fn test_message_without_location_round_trips() {
        let json = r#"{"fatal":false,"severity":1,"message":"File ignored because of a matching ignore pattern."}"#;
        let diag: Diagnostic = serde_json::from_str(json).unwrap();

        assert_eq!(diag.line, None);
        assert_eq!(diag.column, None);
        assert_eq!(diag.position(), None);
        assert_eq!(diag.severity(), Some(Severity::Warning));
        assert_eq!(serde_json::to_string(&diag).unwrap(), json);
    }

    #[test]
    fn test_line_without_column_has_no_position() {
        let diag: Diagnostic = serde_json::from_str(r#"{"line":4,"message":"m"}"#).unwrap();
        assert_eq!(diag.line, Some(4));
        assert_eq!(diag.position(), None);
    }

    #[test]
    fn test_fix_round_trips_unknown_fields() {
        let json = r#"{"range":[3,7],"text":"x","origin":"semi"}"#;
        let fix: Fix = serde_json::from_str(json).unwrap();

        assert_eq!(fix.range, [3, 7]);
        assert_eq!(serde_json::to_string(&fix).unwrap(), json);
    }

    #[test]
    fn test_opaque_fields_keep_order() {
        let json = r#"{"line":1,"column":1,"zeta":1,"alpha":{"b":2,"a":1}}"#;
        let diag: Diagnostic = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = diag.extra.keys().cloned().collect();

        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(serde_json::to_string(&diag).unwrap(), json);
    }
}
