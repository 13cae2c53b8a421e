//! Error types for N3 parsing.
//!
//! [`crate::diag::Diagnostic`] is the richer surface (spans, labels,
//! help text); [`N3Error`] collapses the first diagnostic of a failed
//! parse into a three-way taxonomy for callers that just match and bail.

use crate::diag::{DiagCode, Diagnostic};
use crate::lex::LexError;

/// Error type for the first-error convenience API.
#[derive(Debug, thiserror::Error)]
pub enum N3Error {
    /// Input that cannot be tokenized
    #[error("Lexical error at position {position}: {message}")]
    Lexical { position: usize, message: String },

    /// Token stream that does not match the grammar
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Nesting past the configured depth limit
    #[error("Nesting depth {depth} exceeds the maximum of {max} at position {position}")]
    DepthExceeded {
        position: usize,
        depth: usize,
        max: usize,
    },
}

/// Result type for N3 operations.
pub type Result<T> = std::result::Result<T, N3Error>;

impl N3Error {
    /// Create a lexical error.
    pub fn lexical(position: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            position,
            message: message.into(),
        }
    }

    /// Create a syntax error.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Classify a diagnostic into the three-way taxonomy.
    ///
    /// Diagnostics do not carry the depth limit, so `max_depth` supplies
    /// it for [`N3Error::DepthExceeded`]; the reported depth is the first
    /// value past the limit.
    pub fn from_diagnostic(diagnostic: &Diagnostic, max_depth: usize) -> Self {
        let position = diagnostic.span.start;
        match diagnostic.code {
            DiagCode::InvalidToken
            | DiagCode::UnterminatedString
            | DiagCode::InvalidIri
            | DiagCode::InvalidEscape
            | DiagCode::InvalidNumericLiteral => Self::Lexical {
                position,
                message: diagnostic.message.clone(),
            },
            DiagCode::ExpectedToken | DiagCode::UnexpectedEof | DiagCode::ExpectedTerm => {
                Self::Syntax {
                    position,
                    message: diagnostic.message.clone(),
                }
            }
            DiagCode::DepthExceeded => Self::DepthExceeded {
                position,
                depth: max_depth + 1,
                max: max_depth,
            },
        }
    }

    /// Byte offset of the failure.
    pub fn position(&self) -> usize {
        match self {
            Self::Lexical { position, .. }
            | Self::Syntax { position, .. }
            | Self::DepthExceeded { position, .. } => *position,
        }
    }
}

impl From<LexError> for N3Error {
    fn from(err: LexError) -> Self {
        Self::Lexical {
            position: err.span.start,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceSpan;

    #[test]
    fn test_classification() {
        let lexical = Diagnostic::error(
            DiagCode::UnterminatedString,
            "unterminated string literal",
            SourceSpan::new(5, 6),
        );
        assert!(matches!(
            N3Error::from_diagnostic(&lexical, 128),
            N3Error::Lexical { position: 5, .. }
        ));

        let syntax = Diagnostic::error(
            DiagCode::ExpectedTerm,
            "expected object",
            SourceSpan::new(10, 11),
        );
        assert!(matches!(
            N3Error::from_diagnostic(&syntax, 128),
            N3Error::Syntax { position: 10, .. }
        ));

        let depth = Diagnostic::error(
            DiagCode::DepthExceeded,
            "nesting exceeds the maximum depth of 8",
            SourceSpan::new(20, 21),
        );
        assert!(matches!(
            N3Error::from_diagnostic(&depth, 8),
            N3Error::DepthExceeded {
                position: 20,
                depth: 9,
                max: 8,
            }
        ));
    }

    #[test]
    fn test_display() {
        let err = N3Error::syntax(12, "expected '.' after statement");
        assert_eq!(
            err.to_string(),
            "Syntax error at position 12: expected '.' after statement"
        );

        let err = N3Error::DepthExceeded {
            position: 40,
            depth: 129,
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "Nesting depth 129 exceeds the maximum of 128 at position 40"
        );
    }

    #[test]
    fn test_position() {
        assert_eq!(N3Error::lexical(3, "bad token").position(), 3);
    }
}
