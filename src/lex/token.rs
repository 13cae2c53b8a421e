//! N3 Token types.
//!
//! Tokens are the output of lexical analysis, ready for parsing.
//! Each token carries its source span for precise diagnostics.

use crate::span::SourceSpan;
use std::sync::Arc;

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,
    /// Source location
    pub span: SourceSpan,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Create a token from a range.
    pub fn from_range(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: SourceSpan::new(start, end),
        }
    }

    /// Check if this token is of a specific kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(&kind)
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token kinds for N3.
///
/// Based on the N3 grammar terminals (a superset of Turtle's). Bracketed
/// forms (`[]`, `()`) are not single tokens here: the parser assembles them
/// so that comments remain legal between the delimiters.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // =========================================================================
    // IRIs
    // =========================================================================
    /// Full IRI reference: `<http://example.org/>` (escape-decoded body)
    Iri(Arc<str>),

    /// Prefixed name namespace: `prefix:` (just the prefix, no local)
    PrefixedNameNs(Arc<str>),

    /// Prefixed name with local: `prefix:local`
    PrefixedName {
        /// Namespace prefix (without colon; empty for the default prefix)
        prefix: Arc<str>,
        /// Local name (`%HH` kept verbatim, `\`-escapes decoded)
        local: Arc<str>,
    },

    // =========================================================================
    // Variables
    // =========================================================================
    /// Quick variable: `?name` (stored without the sigil)
    Var(Arc<str>),

    // =========================================================================
    // Blank Nodes
    // =========================================================================
    /// Labeled blank node: `_:name`
    BlankNodeLabel(Arc<str>),

    // =========================================================================
    // Literals
    // =========================================================================
    /// String literal (unescaped content; any of the four quoting forms)
    String(Arc<str>),

    /// Integer literal
    Integer(i64),

    /// Decimal literal (stored as written to preserve precision)
    Decimal(Arc<str>),

    /// Double literal (mantissa with exponent)
    Double(f64),

    /// Language tag (e.g., `@en`, `@en-US`), stored without the `@`.
    LangTag(Arc<str>),

    // =========================================================================
    // Keywords / Directives
    // =========================================================================
    /// `@prefix` directive
    KwPrefix,

    /// `@base` directive
    KwBase,

    /// SPARQL-style `PREFIX` (case-insensitive, no `@`)
    KwSparqlPrefix,

    /// SPARQL-style `BASE` (case-insensitive, no `@`)
    KwSparqlBase,

    /// `a` keyword (rdf:type shorthand)
    KwA,

    /// `true` boolean literal
    KwTrue,

    /// `false` boolean literal
    KwFalse,

    /// `has` verb keyword
    KwHas,

    /// `is` verb keyword (paired with `of`)
    KwIs,

    /// `of` verb keyword (closes `is ... of`)
    KwOf,

    /// `id` keyword (only meaningful after `[` in an IRI property list)
    KwId,

    // =========================================================================
    // Punctuation and Operators
    // =========================================================================
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `^^` (datatype marker)
    DoubleCaret,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{` (formula open)
    LBrace,
    /// `}` (formula close)
    RBrace,
    /// `!` (forward path operator)
    Bang,
    /// `^` (backward path operator)
    Caret,
    /// `=` (equality verb)
    Eq,
    /// `=>` (implication verb)
    Implies,
    /// `<=` (reverse implication verb)
    ImpliedBy,
    /// `<-` (inverted predicate marker)
    BackArrow,

    // =========================================================================
    // Special
    // =========================================================================
    /// End of input
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Iri(s) => write!(f, "<{}>", s),
            TokenKind::PrefixedNameNs(s) => write!(f, "{}:", s),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{}:{}", prefix, local),
            TokenKind::Var(s) => write!(f, "?{}", s),
            TokenKind::BlankNodeLabel(s) => write!(f, "_:{}", s),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Decimal(s) => write!(f, "{}", s),
            TokenKind::Double(n) => write!(f, "{:e}", n),
            TokenKind::LangTag(s) => write!(f, "@{}", s),
            TokenKind::KwPrefix => write!(f, "@prefix"),
            TokenKind::KwBase => write!(f, "@base"),
            TokenKind::KwSparqlPrefix => write!(f, "PREFIX"),
            TokenKind::KwSparqlBase => write!(f, "BASE"),
            TokenKind::KwA => write!(f, "a"),
            TokenKind::KwTrue => write!(f, "true"),
            TokenKind::KwFalse => write!(f, "false"),
            TokenKind::KwHas => write!(f, "has"),
            TokenKind::KwIs => write!(f, "is"),
            TokenKind::KwOf => write!(f, "of"),
            TokenKind::KwId => write!(f, "id"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::DoubleCaret => write!(f, "^^"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Implies => write!(f, "=>"),
            TokenKind::ImpliedBy => write!(f, "<="),
            TokenKind::BackArrow => write!(f, "<-"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_matches_on_discriminant() {
        let t = Token::from_range(TokenKind::Iri(Arc::from("urn:a")), 0, 7);
        assert!(t.is(TokenKind::Iri(Arc::from(""))));
        assert!(!t.is(TokenKind::Dot));
    }

    #[test]
    fn test_display_round_trips_fixed_tokens() {
        assert_eq!(TokenKind::Implies.to_string(), "=>");
        assert_eq!(TokenKind::ImpliedBy.to_string(), "<=");
        assert_eq!(TokenKind::BackArrow.to_string(), "<-");
        assert_eq!(TokenKind::Caret.to_string(), "^");
        assert_eq!(TokenKind::DoubleCaret.to_string(), "^^");
        assert_eq!(TokenKind::LBrace.to_string(), "{");
        assert_eq!(TokenKind::Var(Arc::from("x")).to_string(), "?x");
    }
}
