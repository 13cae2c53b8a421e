//! Document and statement parsing.
//!
//! A document is a sequence of statements, each terminated by `.`,
//! mixed with SPARQL-style directives that take no terminator:
//!
//! ```text
//! n3Doc     ::= ( ( n3Statement '.' ) | sparqlDirective )*
//! statement ::= directive | triples
//! triples   ::= subject predicateObjectList
//! ```
//!
//! Formulas reuse the statement machinery with different `.` rules, see
//! [`Parser::parse_formula`](super::Parser).

use crate::ast::{
    BaseDecl, Directive, Document, Expression, Formula, Iri, PredicateObjectList,
    PredicateObjects, PrefixDecl, Statement, Triples, Verb,
};
use crate::lex::TokenKind;
use crate::span::SourceSpan;

impl<'a> super::Parser<'a> {
    /// Parse a complete document, running to end of input.
    pub(super) fn parse_document(&mut self) -> Option<Document> {
        let mut statements = Vec::new();

        while !self.stream.is_eof() {
            statements.push(self.parse_statement()?);
        }

        let end = self.stream.current_span();
        Some(Document {
            statements,
            span: SourceSpan::new(0, end.end),
        })
    }

    /// Parse one document-level statement.
    ///
    /// `@`-directives and triples require a terminating `.`; the SPARQL
    /// directive forms do not take one.
    fn parse_statement(&mut self) -> Option<Statement> {
        match &self.stream.peek().kind {
            TokenKind::KwPrefix => {
                let decl = self.parse_prefix_decl()?;
                self.expect_statement_dot()?;
                Some(Statement::Directive(Directive::Prefix(decl)))
            }
            TokenKind::KwBase => {
                let decl = self.parse_base_decl()?;
                self.expect_statement_dot()?;
                Some(Statement::Directive(Directive::Base(decl)))
            }
            TokenKind::KwSparqlPrefix => {
                let decl = self.parse_prefix_decl()?;
                Some(Statement::Directive(Directive::SparqlPrefix(decl)))
            }
            TokenKind::KwSparqlBase => {
                let decl = self.parse_base_decl()?;
                Some(Statement::Directive(Directive::SparqlBase(decl)))
            }
            _ => {
                if !self.stream.is_expression_start() {
                    self.stream
                        .error_expected_term("expected statement or directive");
                    return None;
                }
                let triples = self.parse_triples()?;
                self.expect_statement_dot()?;
                Some(Statement::Triples(triples))
            }
        }
    }

    /// Require the `.` that terminates a document-level statement.
    fn expect_statement_dot(&mut self) -> Option<()> {
        if self.stream.is_eof() {
            self.stream.error_unexpected_eof("'.' after statement");
            return None;
        }
        self.stream
            .expect(&TokenKind::Dot, "expected '.' after statement")
            .map(|_| ())
    }

    /// Parse a prefix declaration after its keyword: `p: <iri>`.
    ///
    /// Shared by `@prefix` and the case-insensitive `PREFIX`; the caller
    /// decides whether a terminating `.` follows.
    fn parse_prefix_decl(&mut self) -> Option<PrefixDecl> {
        let start = self.stream.current_span();
        self.stream.advance(); // @prefix or PREFIX

        let prefix = if let Some((prefix, _)) = self.stream.consume_prefixed_name_ns() {
            prefix
        } else {
            self.stream
                .error_at_current("expected prefix namespace (e.g., 'ex:')");
            return None;
        };

        if let Some((iri, iri_span)) = self.stream.consume_iri() {
            let span = start.union(iri_span);
            Some(PrefixDecl {
                prefix,
                iri: Iri::reference(iri, iri_span),
                span,
            })
        } else {
            self.stream
                .error_at_current("expected IRI after prefix namespace");
            None
        }
    }

    /// Parse a base declaration after its keyword: `<iri>`.
    ///
    /// Shared by `@base` and the case-insensitive `BASE`.
    fn parse_base_decl(&mut self) -> Option<BaseDecl> {
        let start = self.stream.current_span();
        self.stream.advance(); // @base or BASE

        if let Some((iri, iri_span)) = self.stream.consume_iri() {
            let span = start.union(iri_span);
            Some(BaseDecl {
                iri: Iri::reference(iri, iri_span),
                span,
            })
        } else {
            self.stream.error_at_current("expected IRI in base declaration");
            None
        }
    }

    /// Parse a triples statement: subject + predicate-object list.
    fn parse_triples(&mut self) -> Option<Triples> {
        let start = self.stream.current_span();
        let subject = self.parse_expression()?;
        let predicates = self.parse_predicate_object_list()?;
        let span = start.union(self.stream.previous_span());
        Some(Triples {
            subject,
            predicates,
            span,
        })
    }

    /// Parse a predicate-object list: one verb/objects pair, then
    /// further pairs after `;`.
    ///
    /// A pair after `;` is optional, so trailing and repeated
    /// semicolons are legal: `:s :p :o ;` and `:s :p :o ;; :q :r`.
    pub(super) fn parse_predicate_object_list(&mut self) -> Option<PredicateObjectList> {
        let start = self.stream.current_span();
        let mut pairs = Vec::new();

        loop {
            let pair_start = self.stream.current_span();
            let verb = self.parse_verb()?;
            let objects = self.parse_object_list()?;
            let span = pair_start.union(self.stream.previous_span());
            pairs.push(PredicateObjects {
                verb,
                objects,
                span,
            });

            if !self.stream.match_keyword(TokenKind::Semicolon) {
                break;
            }
            while self.stream.match_keyword(TokenKind::Semicolon) {}
            if !self.is_verb_start() {
                break;
            }
        }

        let span = start.union(self.stream.previous_span());
        Some(PredicateObjectList { pairs, span })
    }

    /// Parse a verb: `a`, `has`/`is ... of`, a rule arrow, `<-`, or an
    /// expression predicate.
    fn parse_verb(&mut self) -> Option<Verb> {
        match &self.stream.peek().kind {
            TokenKind::KwA => {
                let span = self.stream.consume().span;
                Some(Verb::A { span })
            }
            TokenKind::Eq => {
                let span = self.stream.consume().span;
                Some(Verb::Equals { span })
            }
            TokenKind::Implies => {
                let span = self.stream.consume().span;
                Some(Verb::Implies { span })
            }
            TokenKind::ImpliedBy => {
                let span = self.stream.consume().span;
                Some(Verb::ImpliedBy { span })
            }
            TokenKind::KwHas => {
                self.stream.advance();
                let expression = self.parse_verb_expression("expected predicate after 'has'")?;
                Some(Verb::Has(expression))
            }
            TokenKind::KwIs => {
                self.stream.advance();
                let expression = self.parse_verb_expression("expected predicate after 'is'")?;
                if self.stream.is_eof() {
                    self.stream.error_unexpected_eof("'of'");
                    return None;
                }
                self.stream.expect_keyword(TokenKind::KwOf, "of")?;
                Some(Verb::IsOf(expression))
            }
            TokenKind::BackArrow => {
                self.stream.advance();
                let expression = self.parse_verb_expression("expected predicate after '<-'")?;
                Some(Verb::Inverse(expression))
            }
            _ => {
                let expression = self.parse_verb_expression("expected predicate")?;
                Some(Verb::Predicate(expression))
            }
        }
    }

    /// Parse the expression part of a verb.
    fn parse_verb_expression(&mut self, message: &str) -> Option<Expression> {
        if !self.stream.is_expression_start() {
            if self.stream.is_eof() {
                self.stream.error_unexpected_eof("a predicate");
            } else {
                self.stream.error_expected_term(message);
            }
            return None;
        }
        self.parse_expression()
    }

    /// Check if the current token can start a verb.
    pub(super) fn is_verb_start(&self) -> bool {
        self.stream.is_expression_start()
            || matches!(
                self.stream.peek().kind,
                TokenKind::KwA
                    | TokenKind::KwHas
                    | TokenKind::KwIs
                    | TokenKind::Eq
                    | TokenKind::Implies
                    | TokenKind::ImpliedBy
                    | TokenKind::BackArrow
            )
    }

    /// Parse a comma-separated object list (at least one object).
    fn parse_object_list(&mut self) -> Option<Vec<Expression>> {
        let mut objects = Vec::new();

        loop {
            objects.push(self.parse_object()?);
            if !self.stream.match_keyword(TokenKind::Comma) {
                break;
            }
        }

        Some(objects)
    }

    /// Parse one object expression.
    fn parse_object(&mut self) -> Option<Expression> {
        if !self.stream.is_expression_start() {
            if self.stream.is_eof() {
                self.stream.error_unexpected_eof("an object");
            } else {
                self.stream.error_expected_term("expected object");
            }
            return None;
        }
        self.parse_expression()
    }

    /// Parse a formula: `{ content? }`.
    ///
    /// Inside the braces, `.` is a separator rather than a terminator:
    /// after a statement it demands another content item, so
    /// `{ :a :b :c . }` is an error while `{ :a :b :c }` and
    /// `{ :a :b :c . :d :e :f }` are both legal. Directives in SPARQL
    /// form chain without dots.
    pub(super) fn parse_formula(&mut self) -> Option<Formula> {
        let start = self.stream.current_span();
        self.stream.advance(); // {
        self.enter_nested()?;

        let mut statements = Vec::new();
        loop {
            if self.stream.check_keyword(TokenKind::RBrace) {
                break;
            }
            if self.stream.is_eof() {
                self.stream.error_unexpected_eof("'}' to close formula");
                return None;
            }

            let statement = match &self.stream.peek().kind {
                TokenKind::KwSparqlPrefix => {
                    let decl = self.parse_prefix_decl()?;
                    statements.push(Statement::Directive(Directive::SparqlPrefix(decl)));
                    continue;
                }
                TokenKind::KwSparqlBase => {
                    let decl = self.parse_base_decl()?;
                    statements.push(Statement::Directive(Directive::SparqlBase(decl)));
                    continue;
                }
                TokenKind::KwPrefix => {
                    Statement::Directive(Directive::Prefix(self.parse_prefix_decl()?))
                }
                TokenKind::KwBase => {
                    Statement::Directive(Directive::Base(self.parse_base_decl()?))
                }
                _ => {
                    if !self.stream.is_expression_start() {
                        self.stream.error_expected_term("unexpected token in formula");
                        return None;
                    }
                    Statement::Triples(self.parse_triples()?)
                }
            };
            statements.push(statement);

            // After a statement, `.` separates and requires more content
            if !self.stream.match_keyword(TokenKind::Dot) {
                break;
            }
            if self.stream.check_keyword(TokenKind::RBrace) {
                self.stream
                    .error_expected_term("expected statement after '.' in formula");
                return None;
            }
            if self.stream.is_eof() {
                self.stream
                    .error_unexpected_eof("a statement after '.' in formula");
                return None;
            }
        }

        let end = self.expect_closing(TokenKind::RBrace, "'}' to close formula")?;
        self.exit_nested();
        Some(Formula {
            statements,
            span: start.union(end),
        })
    }
}
