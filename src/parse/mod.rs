//! N3 parser.
//!
//! This module parses tokenized N3 into the typed syntax tree. The
//! parser consumes tokens (not raw `&str`) and pushes diagnostics onto
//! the stream as it goes; the first error ends the parse, so a failed
//! parse carries exactly the classified, positioned diagnostic that
//! stopped it.
//!
//! ## Usage
//!
//! ```
//! use n3_syntax::parse::parse_n3;
//!
//! let output = parse_n3("@prefix ex: <http://example.org/> . ex:alice a ex:Person .");
//! assert!(!output.has_errors());
//! let document = output.ast.unwrap();
//! assert_eq!(document.statements.len(), 2);
//! ```

mod doc;
mod path;
mod stream;
mod term;


pub use stream::TokenStream;

use crate::ast::Document;
use crate::diag::{DiagCode, Diagnostic, ParseOutput};
use crate::lex::{Lexer, TokenKind};
use crate::span::SourceSpan;

/// Options controlling a parse.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Maximum nesting depth. Formulas, collections, property lists,
    /// and path links each count one level.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Parse an N3 document string with default options.
///
/// Returns a `ParseOutput` containing the document (if parsing
/// succeeded) and any diagnostics.
pub fn parse_n3(input: &str) -> ParseOutput<Document> {
    parse_n3_with(input, ParseOptions::default())
}

/// Parse an N3 document string with explicit options.
pub fn parse_n3_with(input: &str, options: ParseOptions) -> ParseOutput<Document> {
    let tokens = match Lexer::new(input).tokenize() {
        Ok(tokens) => tokens,
        Err(err) => {
            return ParseOutput::with_diagnostics(None, vec![err.into_diagnostic()]);
        }
    };

    let mut stream = TokenStream::new(tokens);
    let mut parser = Parser::new(&mut stream, options);

    match parser.parse_document() {
        Some(document) => {
            ParseOutput::with_diagnostics(Some(document), stream.take_diagnostics())
        }
        None => ParseOutput::with_diagnostics(None, stream.take_diagnostics()),
    }
}

/// The N3 parser.
///
/// Submodules contribute `impl` blocks: `doc` for statements and
/// directives, `term` for path items, `path` for path expressions.
struct Parser<'a> {
    stream: &'a mut TokenStream,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(stream: &'a mut TokenStream, options: ParseOptions) -> Self {
        Self {
            stream,
            options,
            depth: 0,
        }
    }

    /// Enter one nesting level, failing with a diagnostic once the
    /// configured limit is exceeded.
    fn enter_nested(&mut self) -> Option<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let span = self.stream.current_span();
            self.stream.add_diagnostic(
                Diagnostic::error(
                    DiagCode::DepthExceeded,
                    format!(
                        "nesting exceeds the maximum depth of {}",
                        self.options.max_depth
                    ),
                    span,
                )
                .with_help("Flatten the nesting or raise ParseOptions::max_depth."),
            );
            return None;
        }
        Some(())
    }

    /// Leave one nesting level.
    fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Expect a closing delimiter, with an end-of-input diagnostic when
    /// the input stops short.
    fn expect_closing(&mut self, kind: TokenKind, what: &str) -> Option<SourceSpan> {
        if self.stream.is_eof() {
            self.stream.error_unexpected_eof(what);
            return None;
        }
        self.stream
            .expect(&kind, &format!("expected {}", what))
            .map(|token| token.span)
    }
}
