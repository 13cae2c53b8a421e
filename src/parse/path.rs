//! Path expression parsing.
//!
//! ## Grammar
//!
//! ```text
//! expression ::= path
//! path       ::= pathItem ( ( '!' | '^' ) path )?
//! ```
//!
//! The optional tail recurses on the whole remaining path, which makes
//! `!` and `^` right-associative: `<a>!<b>^<c>` parses as
//! `<a> ! (<b> ^ <c>)`. Each link counts one level against the nesting
//! limit, so pathological chains fail the same way deeply nested
//! formulas do.

use crate::ast::{Expression, PathOp};
use crate::lex::TokenKind;

impl<'a> super::Parser<'a> {
    /// Parse a path expression: one item, optionally linked to the rest
    /// of the path by `!` or `^`.
    pub(super) fn parse_expression(&mut self) -> Option<Expression> {
        let item = self.parse_path_item()?;

        let op = match &self.stream.peek().kind {
            TokenKind::Bang => PathOp::Forward,
            TokenKind::Caret => PathOp::Backward,
            _ => return Some(Expression::simple(item)),
        };
        self.stream.advance(); // ! or ^

        self.enter_nested()?;
        let rest = self.parse_expression()?;
        self.exit_nested();

        let span = item.span().union(rest.span);
        Some(Expression::path(item, op, rest, span))
    }
}
