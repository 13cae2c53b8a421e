//! Path item parsing.
//!
//! A path item is the unit a path expression links together: an IRI,
//! blank node, quick variable, literal, collection, property list, or
//! formula. The bracketed forms (`[ ... ]`, `( ... )`) are assembled
//! here from their delimiter tokens, so comments stay legal anywhere
//! between them.

use crate::ast::{
    BlankNode, BlankNodePropertyList, Collection, Iri, IriPropertyList, Literal, PathItem,
    QuickVar,
};
use crate::lex::TokenKind;
use crate::span::SourceSpan;

impl<'a> super::Parser<'a> {
    /// Parse one path item.
    pub(super) fn parse_path_item(&mut self) -> Option<PathItem> {
        // Quick variable
        if let Some((name, span)) = self.stream.consume_var() {
            return Some(PathItem::Var(QuickVar::new(name, span)));
        }

        // Labeled blank node
        if let Some((label, span)) = self.stream.consume_blank_node_label() {
            return Some(PathItem::BlankNode(BlankNode::labeled(label, span)));
        }

        // IRI or prefixed name
        if Self::is_iri_token(&self.stream.peek().kind) {
            return self.parse_iri_term().map(PathItem::Iri);
        }

        // Literal
        if Self::is_literal_token(&self.stream.peek().kind) {
            return self.parse_literal().map(PathItem::Literal);
        }

        // Bracketed forms
        match &self.stream.peek().kind {
            TokenKind::LBracket => self.parse_bracket_item(),
            TokenKind::LParen => self.parse_collection().map(PathItem::Collection),
            TokenKind::LBrace => self.parse_formula().map(PathItem::Formula),
            TokenKind::Eof => {
                self.stream.error_unexpected_eof("a term");
                None
            }
            _ => {
                self.stream.error_expected_term("expected a term");
                None
            }
        }
    }

    /// Parse an IRI term: `<iri>`, `prefix:local`, `prefix:`, or `:`.
    pub(super) fn parse_iri_term(&mut self) -> Option<Iri> {
        // Full IRI
        if let Some((iri, span)) = self.stream.consume_iri() {
            return Some(Iri::reference(iri, span));
        }

        // Prefixed name with local part
        if let Some((prefix, local, span)) = self.stream.consume_prefixed_name() {
            return Some(Iri::prefixed(prefix, local, span));
        }

        // Prefixed name namespace only (e.g., "ex:" or ":")
        if let Some((prefix, span)) = self.stream.consume_prefixed_name_ns() {
            return Some(Iri::prefixed(prefix, "", span));
        }

        None
    }

    /// Whether `kind` can begin an IRI term.
    pub(super) fn is_iri_token(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } | TokenKind::PrefixedNameNs(_)
        )
    }

    /// Whether `kind` can begin a literal.
    fn is_literal_token(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::String(_)
                | TokenKind::Integer(_)
                | TokenKind::Decimal(_)
                | TokenKind::Double(_)
                | TokenKind::KwTrue
                | TokenKind::KwFalse
        )
    }

    /// Parse a literal: a string with an optional language tag or `^^`
    /// datatype, a number, or a boolean.
    fn parse_literal(&mut self) -> Option<Literal> {
        if let Some((value, span)) = self.stream.consume_integer() {
            return Some(Literal::integer(value, span));
        }
        if let Some((value, span)) = self.stream.consume_decimal() {
            return Some(Literal::decimal(value, span));
        }
        if let Some((value, span)) = self.stream.consume_double() {
            return Some(Literal::double(value, span));
        }
        if self.stream.check_keyword(TokenKind::KwTrue) {
            let span = self.stream.consume().span;
            return Some(Literal::boolean(true, span));
        }
        if self.stream.check_keyword(TokenKind::KwFalse) {
            let span = self.stream.consume().span;
            return Some(Literal::boolean(false, span));
        }

        let (value, span) = self.stream.consume_string()?;

        // Optional language tag or datatype IRI
        if let Some((lang, lang_span)) = self.stream.consume_lang_tag() {
            return Some(Literal::lang_string(value, lang, span.union(lang_span)));
        }
        if self.stream.match_keyword(TokenKind::DoubleCaret) {
            if !Self::is_iri_token(&self.stream.peek().kind) {
                if self.stream.is_eof() {
                    self.stream.error_unexpected_eof("a datatype IRI after '^^'");
                } else {
                    self.stream
                        .error_expected_term("expected datatype IRI after '^^'");
                }
                return None;
            }
            let datatype = self.parse_iri_term()?;
            let full = span.union(datatype.span);
            return Some(Literal::typed(value, datatype, full));
        }

        Some(Literal::string(value, span))
    }

    /// Parse `[ ... ]`: an anonymous blank node, a blank node property
    /// list, or an IRI property list, decided by lookahead after `[`.
    fn parse_bracket_item(&mut self) -> Option<PathItem> {
        let start = self.stream.current_span();
        self.stream.advance(); // [

        // `[ ]` is an anonymous blank node
        if self.stream.check_keyword(TokenKind::RBracket) {
            let end = self.stream.consume().span;
            return Some(PathItem::BlankNode(BlankNode::anon(start.union(end))));
        }

        // `[ id <iri> ... ]` names the node instead of minting a fresh
        // blank node. A bare `id` used as a predicate still starts a
        // plain property list, so require an IRI right behind it.
        if self.stream.check_keyword(TokenKind::KwId)
            && Self::is_iri_token(&self.stream.peek_n(1).kind)
        {
            return self
                .parse_iri_property_list(start)
                .map(PathItem::IriPropertyList);
        }

        self.parse_blank_node_property_list(start)
            .map(PathItem::PropertyList)
    }

    /// Parse the rest of `[ predicateObjectList ]` after the bracket.
    fn parse_blank_node_property_list(
        &mut self,
        start: SourceSpan,
    ) -> Option<BlankNodePropertyList> {
        self.enter_nested()?;
        let properties = self.parse_predicate_object_list()?;
        let end = self.expect_closing(TokenKind::RBracket, "']' to close property list")?;
        self.exit_nested();
        Some(BlankNodePropertyList {
            properties,
            span: start.union(end),
        })
    }

    /// Parse the rest of `[ id <iri> predicateObjectList ]` after the bracket.
    fn parse_iri_property_list(&mut self, start: SourceSpan) -> Option<IriPropertyList> {
        self.enter_nested()?;
        self.stream.advance(); // id
        let iri = self.parse_iri_term()?;
        let properties = self.parse_predicate_object_list()?;
        let end = self.expect_closing(TokenKind::RBracket, "']' to close property list")?;
        self.exit_nested();
        Some(IriPropertyList {
            iri,
            properties,
            span: start.union(end),
        })
    }

    /// Parse a collection: `( expression* )`, possibly empty.
    fn parse_collection(&mut self) -> Option<Collection> {
        let start = self.stream.current_span();
        self.stream.advance(); // (
        self.enter_nested()?;

        let mut items = Vec::new();
        while self.stream.is_expression_start() {
            items.push(self.parse_expression()?);
        }

        let end = self.expect_closing(TokenKind::RParen, "')' to close collection")?;
        self.exit_nested();
        Some(Collection {
            items,
            span: start.union(end),
        })
    }
}
