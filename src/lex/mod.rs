//! N3 Lexical Analysis.
//!
//! This module handles tokenization of N3 documents, producing a stream
//! of tokens with source spans. The parser then consumes these tokens.
//!
//! ## Design
//!
//! N3 lexing is non-trivial due to:
//! - Comments (single-line `#` style)
//! - String escaping (single/double quotes, long strings)
//! - IRIs with `\u`/`\U` escapes, and the `<=` / `<-` arrows that share
//!   their opening character with `<iri>`
//! - Prefixed names (PN_CHARS rules, namespace:local, interior dots)
//! - Keyword vs. prefix ambiguity (`a`, `has`, `is`, `of`, `true` are all
//!   valid prefix labels when followed by `:`)
//! - Quick variables (`?name`)
//! - Numeric formats (integer, decimal, double; `.5` is a decimal while
//!   `5.` lexes as an integer followed by a dot)
//!
//! ## Implementation
//!
//! Uses winnow for all tokenization. The lexer produces `Token` values
//! with source spans for precise diagnostic locations.
//!
//! ## Usage
//!
//! ```
//! use n3_syntax::lex::Lexer;
//!
//! let tokens = Lexer::new(":alice :knows :bob .").tokenize()?;
//! for token in &tokens {
//!     println!("{:?} at {:?}", token.kind, token.span);
//! }
//! # Ok::<(), n3_syntax::lex::LexError>(())
//! ```

pub(crate) mod chars;
mod lexer;
mod token;

pub use lexer::{LexError, Lexer};
pub use token::{Token, TokenKind};
