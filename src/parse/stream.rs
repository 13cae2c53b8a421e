//! Token stream for parsing.
//!
//! The `TokenStream` wraps the lexer output and provides:
//! - Lookahead (peeking) without consuming tokens
//! - Convenient matching and consuming methods
//! - Diagnostic collection
//!
//! The parser never backtracks: every decision is made on bounded
//! lookahead, so the stream moves strictly forward.

use crate::diag::{DiagCode, Diagnostic};
use crate::lex::{Token, TokenKind};
use crate::span::SourceSpan;
use std::sync::Arc;

/// A stream of tokens for parsing.
///
/// Provides lookahead, matching, and diagnostic utilities.
#[derive(Debug)]
pub struct TokenStream {
    /// The tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Collected diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl TokenStream {
    /// Create a new token stream from a vector of tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Get collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    /// Check if at end of stream (only EOF remains).
    pub fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("Token stream should have at least EOF")
        })
    }

    /// Peek at the nth token ahead (0 = current).
    pub fn peek_n(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("Token stream should have at least EOF")
        })
    }

    /// Get the span of the current token.
    pub fn current_span(&self) -> SourceSpan {
        self.peek().span
    }

    /// Get the span of the previous token.
    pub fn previous_span(&self) -> SourceSpan {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            SourceSpan::point(0)
        }
    }

    /// Advance to the next token, returning the current one.
    pub fn advance(&mut self) -> &Token {
        let token = self.peek();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    /// Consume the current token and return it (owned).
    pub fn consume(&mut self) -> Token {
        self.advance().clone()
    }

    /// Check if the current token matches the expected kind.
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Check if the current token is a specific keyword or punctuation.
    pub fn check_keyword(&self, kw: TokenKind) -> bool {
        self.peek().kind == kw
    }

    /// Consume the current token if it's the expected keyword.
    pub fn match_keyword(&mut self, kw: TokenKind) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token kind, or emit an error.
    ///
    /// Returns the token if matched, or None if error.
    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.consume())
        } else {
            self.error_at_current(message);
            None
        }
    }

    /// Expect and consume a specific keyword, or emit an error.
    pub fn expect_keyword(&mut self, kw: TokenKind, name: &str) -> Option<Token> {
        if self.check_keyword(kw) {
            Some(self.consume())
        } else {
            self.error_at_current(&format!("expected '{}'", name));
            None
        }
    }

    /// Add an error at the current token position.
    pub fn error_at_current(&mut self, message: &str) {
        let span = self.current_span();
        self.add_diagnostic(Diagnostic::error(
            DiagCode::ExpectedToken,
            message.to_string(),
            span,
        ));
    }

    /// Add a term-position error at the current token.
    pub fn error_expected_term(&mut self, message: &str) {
        let span = self.current_span();
        self.add_diagnostic(Diagnostic::error(
            DiagCode::ExpectedTerm,
            message.to_string(),
            span,
        ));
    }

    /// Add an error for unexpected end of input.
    pub fn error_unexpected_eof(&mut self, expected: &str) {
        let span = self.current_span();
        self.add_diagnostic(
            Diagnostic::error(
                DiagCode::UnexpectedEof,
                format!("unexpected end of input, expected {}", expected),
                span,
            )
            .with_help("The document appears to be incomplete."),
        );
    }

    // =========================================================================
    // Convenience methods for common token patterns
    // =========================================================================

    /// Consume and return a variable name if the current token is a variable.
    pub fn consume_var(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::Var(_) => {
                let token = self.consume();
                if let TokenKind::Var(name) = token.kind {
                    Some((name, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return an IRI if the current token is an IRI.
    pub fn consume_iri(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::Iri(_) => {
                let token = self.consume();
                if let TokenKind::Iri(iri) = token.kind {
                    Some((iri, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a prefixed name if the current token is one.
    pub fn consume_prefixed_name(&mut self) -> Option<(Arc<str>, Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::PrefixedName { .. } => {
                let token = self.consume();
                if let TokenKind::PrefixedName { prefix, local } = token.kind {
                    Some((prefix, local, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a prefixed name namespace if the current token is one.
    pub fn consume_prefixed_name_ns(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::PrefixedNameNs(_) => {
                let token = self.consume();
                if let TokenKind::PrefixedNameNs(prefix) = token.kind {
                    Some((prefix, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a blank node label if the current token is one.
    pub fn consume_blank_node_label(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::BlankNodeLabel(_) => {
                let token = self.consume();
                if let TokenKind::BlankNodeLabel(label) = token.kind {
                    Some((label, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return an integer if the current token is one.
    pub fn consume_integer(&mut self) -> Option<(i64, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::Integer(_) => {
                let token = self.consume();
                if let TokenKind::Integer(n) = token.kind {
                    Some((n, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a string if the current token is one.
    pub fn consume_string(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::String(_) => {
                let token = self.consume();
                if let TokenKind::String(s) = token.kind {
                    Some((s, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a decimal if the current token is one.
    pub fn consume_decimal(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::Decimal(_) => {
                let token = self.consume();
                if let TokenKind::Decimal(s) = token.kind {
                    Some((s, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a double if the current token is one.
    pub fn consume_double(&mut self) -> Option<(f64, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::Double(_) => {
                let token = self.consume();
                if let TokenKind::Double(n) = token.kind {
                    Some((n, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume and return a language tag if the current token is one.
    pub fn consume_lang_tag(&mut self) -> Option<(Arc<str>, SourceSpan)> {
        match &self.peek().kind {
            TokenKind::LangTag(_) => {
                let token = self.consume();
                if let TokenKind::LangTag(s) = token.kind {
                    Some((s, token.span))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Check if the current token can start a path expression.
    ///
    /// Covers every `PathItem` opener: terms, literals, `[`, `(`, `{`.
    pub fn is_expression_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Var(_)
                | TokenKind::Iri(_)
                | TokenKind::PrefixedName { .. }
                | TokenKind::PrefixedNameNs(_)
                | TokenKind::String(_)
                | TokenKind::Integer(_)
                | TokenKind::Decimal(_)
                | TokenKind::Double(_)
                | TokenKind::BlankNodeLabel(_)
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::LBracket // property list or anon
                | TokenKind::LParen  // collection
                | TokenKind::LBrace  // formula
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Lexer;

    fn stream_from(source: &str) -> TokenStream {
        TokenStream::new(Lexer::new(source).tokenize().unwrap())
    }

    #[test]
    fn test_peek_and_advance() {
        let mut stream = stream_from("?x :p");

        assert!(matches!(stream.peek().kind, TokenKind::Var(_)));
        stream.advance();
        assert!(matches!(stream.peek().kind, TokenKind::PrefixedName { .. }));
        stream.advance();
        assert!(stream.is_eof());
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut stream = stream_from("");
        assert!(stream.is_eof());
        stream.advance();
        stream.advance();
        assert!(stream.is_eof());
    }

    #[test]
    fn test_check_and_match() {
        let mut stream = stream_from("a :b");

        assert!(stream.check_keyword(TokenKind::KwA));
        assert!(!stream.check_keyword(TokenKind::KwHas));

        assert!(stream.match_keyword(TokenKind::KwA));
        assert!(!stream.match_keyword(TokenKind::KwA)); // Already consumed
    }

    #[test]
    fn test_consume_var() {
        let mut stream = stream_from("?name");

        let (name, span) = stream.consume_var().expect("should consume var");
        assert_eq!(name.as_ref(), "name");
        assert_eq!(span, SourceSpan::new(0, 5));
    }

    #[test]
    fn test_consume_iri() {
        let mut stream = stream_from("<http://example.org/>");

        let (iri, _span) = stream.consume_iri().expect("should consume IRI");
        assert_eq!(iri.as_ref(), "http://example.org/");
    }

    #[test]
    fn test_consume_blank_node_label() {
        let mut stream = stream_from("_:b1");

        let (label, span) = stream
            .consume_blank_node_label()
            .expect("should consume label");
        assert_eq!(label.as_ref(), "b1");
        assert_eq!(span, SourceSpan::new(0, 4));
    }

    #[test]
    fn test_expect_success() {
        let mut stream = stream_from(". ?x");

        let token = stream.expect_keyword(TokenKind::Dot, ".");
        assert!(token.is_some());
        assert!(stream.diagnostics().is_empty());
    }

    #[test]
    fn test_expect_failure() {
        let mut stream = stream_from("?x .");

        let token = stream.expect_keyword(TokenKind::Dot, ".");
        assert!(token.is_none());
        assert_eq!(stream.diagnostics().len(), 1);
    }

    #[test]
    fn test_peek_n() {
        let stream = stream_from("[ id <urn:x>");

        assert!(matches!(stream.peek_n(0).kind, TokenKind::LBracket));
        assert!(matches!(stream.peek_n(1).kind, TokenKind::KwId));
        assert!(matches!(stream.peek_n(2).kind, TokenKind::Iri(_)));

        // Past the end clamps to EOF
        assert!(matches!(stream.peek_n(10).kind, TokenKind::Eof));
    }

    #[test]
    fn test_is_expression_start() {
        for source in ["?x", "<urn:x>", "ex:foo", "\"s\"", "42", "_:b", "[", "(", "{", "true"] {
            let stream = stream_from(source);
            assert!(stream.is_expression_start(), "{source} should start an expression");
        }

        for source in ["a", "=>", ".", "has", "@en"] {
            let stream = stream_from(source);
            assert!(
                !stream.is_expression_start(),
                "{source} should not start an expression"
            );
        }
    }
}
