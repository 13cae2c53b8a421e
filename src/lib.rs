//! # N3 Syntax
//!
//! A lexer and recursive-descent parser for Notation3 (N3), the RDF
//! syntax that extends Turtle with quantified variables, rules, and
//! nested graph formulas.
//!
//! - Fast compiled parsing (no runtime BNF interpretation)
//! - Diagnostics with stable codes and precise source spans
//! - A full syntax tree: every node carries its byte span
//! - Canonical serialization via [`std::fmt::Display`], round-trip stable
//!
//! ## Architecture
//!
//! Parsing operates in two phases:
//!
//! 1. **Lex**: N3 string → `Vec<Token>` with source spans, failing fast
//!    on the first lexical error
//! 2. **Parse**: token stream → [`Document`] plus `Vec<Diagnostic>`
//!
//! The parse phase never backtracks and stops at the first deviation from
//! the grammar; a [`ParseOutput`] with `ast: None` always carries at
//! least one error diagnostic.
//!
//! ## Quick Start
//!
//! ```
//! use n3_syntax::parse_n3;
//!
//! let n3 = r#"
//!     @prefix : <http://example.org/#> .
//!     { ?x :parent ?y . ?y :brother ?z } => { ?x :uncle ?z } .
//! "#;
//! let output = parse_n3(n3);
//! assert!(!output.has_errors());
//!
//! let document = output.ast.unwrap();
//! assert_eq!(document.statements.len(), 2);
//! ```
//!
//! For callers that only want the first failure, [`parse_document`]
//! collapses the diagnostics into an [`N3Error`].

pub mod ast;
pub mod diag;
pub mod error;
pub mod lex;
pub mod parse;
pub mod span;

mod write;

// Re-exports
pub use ast::{Directive, Document, Expression, Formula, PathItem, Statement, Triples, Verb};
pub use diag::{render_diagnostic, DiagCode, Diagnostic, ParseOutput, Severity};
pub use error::{N3Error, Result};
pub use lex::{Token, TokenKind};
pub use parse::{parse_n3, parse_n3_with, ParseOptions};
pub use span::{LineIndex, SourceSpan};

/// Parse an N3 document, returning the first error if any.
///
/// This is the convenience form of [`parse_n3`] for callers that do not
/// need the full diagnostic list. Parsing uses [`ParseOptions::default`].
pub fn parse_document(input: &str) -> Result<Document> {
    let output = parse_n3(input);
    match output.ast {
        Some(document) => Ok(document),
        None => {
            let first = output
                .diagnostics
                .first()
                .expect("Failed parse should carry a diagnostic");
            Err(N3Error::from_diagnostic(
                first,
                ParseOptions::default().max_depth,
            ))
        }
    }
}

/// Tokenize an N3 document without parsing it.
///
/// The token vector always ends with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    lex::Lexer::new(input).tokenize().map_err(N3Error::from)
}
