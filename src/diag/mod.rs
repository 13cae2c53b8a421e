//! Diagnostic types for N3 parsing errors.
//!
//! This module provides structured diagnostics with:
//! - Stable error codes for programmatic handling
//! - Precise source spans for error locations
//! - Optional help and note text
//! - JSON serialization for tooling
//!
//! The core parser emits errors only; the severity machinery is part of
//! the diagnostic vocabulary for downstream consumers.

mod render;

pub use render::{render_diagnostic, render_diagnostics};

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unrecoverable error - the document cannot be parsed
    Error,
    /// Warning - reserved for downstream tooling
    Warning,
    /// Informational note
    Note,
}

impl Severity {
    /// Check if this severity is an error.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Stable error codes for diagnostics.
///
/// `N001`-`N005` are lexical, `N006`-`N009` syntactic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagCode {
    // =========================================================================
    // Lexical errors (N001-N005)
    // =========================================================================
    /// Input that cannot begin any token
    #[serde(rename = "N001")]
    InvalidToken,

    /// String literal not terminated
    #[serde(rename = "N002")]
    UnterminatedString,

    /// Invalid or unterminated IRI reference
    #[serde(rename = "N003")]
    InvalidIri,

    /// Invalid escape sequence in a string, IRI, or local name
    #[serde(rename = "N004")]
    InvalidEscape,

    /// Malformed or out-of-range numeric literal
    #[serde(rename = "N005")]
    InvalidNumericLiteral,

    // =========================================================================
    // Syntax errors (N006-N009)
    // =========================================================================
    /// Expected a specific token
    #[serde(rename = "N006")]
    ExpectedToken,

    /// Unexpected end of input
    #[serde(rename = "N007")]
    UnexpectedEof,

    /// Expected a term (subject, predicate, or object position)
    #[serde(rename = "N008")]
    ExpectedTerm,

    /// Nesting depth limit exceeded
    #[serde(rename = "N009")]
    DepthExceeded,
}

impl DiagCode {
    /// Get the string code (e.g., "N001").
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical
            Self::InvalidToken => "N001",
            Self::UnterminatedString => "N002",
            Self::InvalidIri => "N003",
            Self::InvalidEscape => "N004",
            Self::InvalidNumericLiteral => "N005",
            // Syntax
            Self::ExpectedToken => "N006",
            Self::UnexpectedEof => "N007",
            Self::ExpectedTerm => "N008",
            Self::DepthExceeded => "N009",
        }
    }

    /// Get the default severity for this code.
    pub fn default_severity(&self) -> Severity {
        // Every deviation from the grammar is fatal to the parse
        Severity::Error
    }
}

impl std::fmt::Display for DiagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A labeled span within a diagnostic.
///
/// Labels provide additional context about specific locations
/// within the diagnostic's primary span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The span this label covers
    pub span: SourceSpan,
    /// The label message
    pub message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: impl Into<SourceSpan>, message: impl Into<String>) -> Self {
        Self {
            span: span.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic message from the N3 parser.
///
/// Diagnostics are structured to be both human- and machine-readable,
/// with precise source locations and stable codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable error code
    pub code: DiagCode,

    /// Severity level
    pub severity: Severity,

    /// Primary message (one sentence)
    pub message: String,

    /// Primary source span
    pub span: SourceSpan,

    /// Additional labeled spans
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,

    /// Suggested fix or rewrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Additional context or explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with the given code and message.
    pub fn new(code: DiagCode, message: impl Into<String>, span: impl Into<SourceSpan>) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
            span: span.into(),
            labels: Vec::new(),
            help: None,
            note: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(code: DiagCode, message: impl Into<String>, span: impl Into<SourceSpan>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span: span.into(),
            labels: Vec::new(),
            help: None,
            note: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(
        code: DiagCode,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            span: span.into(),
            labels: Vec::new(),
            help: None,
            note: None,
        }
    }

    /// Add a labeled span.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Check if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Check if this diagnostic is a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

/// Result of parsing, including AST and diagnostics.
#[derive(Debug)]
pub struct ParseOutput<T> {
    /// The parsed AST (if parsing succeeded)
    pub ast: Option<T>,
    /// All diagnostics emitted during parsing
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> ParseOutput<T> {
    /// Create a successful parse output.
    pub fn success(ast: T) -> Self {
        Self {
            ast: Some(ast),
            diagnostics: Vec::new(),
        }
    }

    /// Create a parse output with an AST and diagnostics.
    pub fn with_diagnostics(ast: Option<T>, diagnostics: Vec<Diagnostic>) -> Self {
        Self { ast, diagnostics }
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Get just the errors.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Get just the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diag_code_string() {
        assert_eq!(DiagCode::InvalidToken.code(), "N001");
        assert_eq!(DiagCode::InvalidNumericLiteral.code(), "N005");
        assert_eq!(DiagCode::ExpectedToken.code(), "N006");
        assert_eq!(DiagCode::DepthExceeded.code(), "N009");
    }

    #[test]
    fn test_default_severity_is_error() {
        assert_eq!(DiagCode::InvalidToken.default_severity(), Severity::Error);
        assert_eq!(DiagCode::DepthExceeded.default_severity(), Severity::Error);
    }

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::error(
            DiagCode::ExpectedToken,
            "expected '.' after statement",
            SourceSpan::new(10, 20),
        )
        .with_label(Label::new(SourceSpan::new(15, 19), "statement starts here"))
        .with_help("terminate the statement with '.'")
        .with_note("formulas separate statements with '.' instead");

        assert!(diag.is_error());
        assert_eq!(diag.labels.len(), 1);
        assert!(diag.help.is_some());
        assert!(diag.note.is_some());
    }

    #[test]
    fn test_diagnostic_json() {
        let diag = Diagnostic::error(
            DiagCode::ExpectedToken,
            "expected '.'",
            SourceSpan::new(10, 15),
        );

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"code\":\"N006\""));
        assert!(json.contains("\"severity\":\"error\""));
    }

    #[test]
    fn test_parse_output() {
        let output: ParseOutput<String> = ParseOutput::with_diagnostics(
            None,
            vec![Diagnostic::error(
                DiagCode::UnexpectedEof,
                "unexpected end of input",
                SourceSpan::new(0, 1),
            )],
        );

        assert!(output.has_errors());
        assert_eq!(output.errors().count(), 1);
        assert_eq!(output.warnings().count(), 0);
    }
}
