//! N3 document structure types.
//!
//! A document is a sequence of statements: directives (`@prefix`,
//! `@base`, and their SPARQL-style forms) and triples. Triples pair a
//! subject expression with a predicate-object list, and both sides may
//! contain the bracketed composites defined here (collections, property
//! lists, formulas).

use super::path::Expression;
use super::term::Iri;
use crate::span::SourceSpan;
use std::sync::Arc;

/// A complete N3 document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The statements in document order
    pub statements: Vec<Statement>,
    /// Span of the whole document
    pub span: SourceSpan,
}

/// A top-level or formula-level statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// A directive (`@prefix`, `@base`, `PREFIX`, `BASE`)
    Directive(Directive),
    /// A triples statement
    Triples(Triples),
}

impl Statement {
    /// Get the source span of this statement.
    pub fn span(&self) -> SourceSpan {
        match self {
            Statement::Directive(d) => d.span(),
            Statement::Triples(t) => t.span,
        }
    }
}

/// A prefix or base directive.
///
/// The `@`-forms are terminated by a `.` belonging to the enclosing
/// statement; the SPARQL-style forms take no terminator.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// `@prefix p: <iri> .`
    Prefix(PrefixDecl),
    /// `@base <iri> .`
    Base(BaseDecl),
    /// `PREFIX p: <iri>` (case-insensitive keyword, no dot)
    SparqlPrefix(PrefixDecl),
    /// `BASE <iri>` (case-insensitive keyword, no dot)
    SparqlBase(BaseDecl),
}

impl Directive {
    /// Get the source span of this directive.
    pub fn span(&self) -> SourceSpan {
        match self {
            Directive::Prefix(d) | Directive::SparqlPrefix(d) => d.span,
            Directive::Base(d) | Directive::SparqlBase(d) => d.span,
        }
    }
}

/// A prefix declaration binding a namespace label to an IRI.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixDecl {
    /// The prefix label (empty string for the default prefix)
    pub prefix: Arc<str>,
    /// The namespace IRI
    pub iri: Iri,
    /// Source span
    pub span: SourceSpan,
}

/// A base declaration for relative IRI resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseDecl {
    /// The base IRI
    pub iri: Iri,
    /// Source span
    pub span: SourceSpan,
}

/// A triples statement: subject plus predicate-object list.
#[derive(Clone, Debug, PartialEq)]
pub struct Triples {
    /// The subject expression
    pub subject: Expression,
    /// The predicates and objects
    pub predicates: PredicateObjectList,
    /// Source span (not including the terminating `.`)
    pub span: SourceSpan,
}

/// A predicate-object list: `v1 o1, o2; v2 o3`.
///
/// Groups are separated by `;` (trailing and repeated semicolons are
/// legal no-ops), objects within a group by `,`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredicateObjectList {
    /// The verb/objects groups (at least one)
    pub pairs: Vec<PredicateObjects>,
    /// Source span
    pub span: SourceSpan,
}

/// One verb with its objects.
#[derive(Clone, Debug, PartialEq)]
pub struct PredicateObjects {
    /// The verb
    pub verb: Verb,
    /// The objects (at least one)
    pub objects: Vec<Expression>,
    /// Source span
    pub span: SourceSpan,
}

/// A verb: the predicate position of a statement.
///
/// Besides a plain expression predicate, N3 has keyword verbs (`a`,
/// `has`, `is ... of`) and the rule arrows (`=`, `=>`, `<=`, `<-`).
/// `is p of` and `<- p` both invert the direction of `p`; the tree
/// records the syntactic form and leaves interpretation to consumers.
#[derive(Clone, Debug, PartialEq)]
pub enum Verb {
    /// An expression predicate
    Predicate(Expression),
    /// `<-` expression (inverted predicate)
    Inverse(Expression),
    /// `a` (rdf:type shorthand)
    A {
        /// Span of the keyword
        span: SourceSpan,
    },
    /// `has` expression
    Has(Expression),
    /// `is` expression `of` (inverted predicate)
    IsOf(Expression),
    /// `=` (owl:sameAs in the N3 reading)
    Equals {
        /// Span of the operator
        span: SourceSpan,
    },
    /// `=>` (log:implies)
    Implies {
        /// Span of the operator
        span: SourceSpan,
    },
    /// `<=` (reverse implication)
    ImpliedBy {
        /// Span of the operator
        span: SourceSpan,
    },
}

impl Verb {
    /// Get the source span of this verb.
    ///
    /// For the expression-carrying forms this is the span of the
    /// expression itself.
    pub fn span(&self) -> SourceSpan {
        match self {
            Verb::Predicate(e) | Verb::Inverse(e) | Verb::Has(e) | Verb::IsOf(e) => e.span,
            Verb::A { span } | Verb::Equals { span } | Verb::Implies { span }
            | Verb::ImpliedBy { span } => *span,
        }
    }
}

/// A collection: `( item1 item2 ... )`, possibly empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    /// The items in order
    pub items: Vec<Expression>,
    /// Source span (including the parentheses)
    pub span: SourceSpan,
}

/// A blank node property list: `[ v1 o1; v2 o2 ]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlankNodePropertyList {
    /// The properties of the implicit blank node
    pub properties: PredicateObjectList,
    /// Source span (including the brackets)
    pub span: SourceSpan,
}

/// An IRI property list: `[ id <iri> v1 o1; v2 o2 ]`.
///
/// An N3 extension giving the bracketed node an explicit identifier
/// instead of a fresh blank node.
#[derive(Clone, Debug, PartialEq)]
pub struct IriPropertyList {
    /// The explicit node identifier
    pub iri: Iri,
    /// The properties
    pub properties: PredicateObjectList,
    /// Source span (including the brackets)
    pub span: SourceSpan,
}

/// A formula: `{ ... }`, a nested graph literal.
///
/// Contains statements under the same grammar as the document except
/// that `.` acts as a statement *separator* rather than a terminator.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    /// The statements inside the braces
    pub statements: Vec<Statement>,
    /// Source span (including the braces)
    pub span: SourceSpan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::path::PathItem;

    fn expr(local: &str, start: usize, end: usize) -> Expression {
        Expression::simple(PathItem::Iri(Iri::prefixed(
            "ex",
            local,
            SourceSpan::new(start, end),
        )))
    }

    #[test]
    fn test_statement_span() {
        let triples = Triples {
            subject: expr("s", 0, 4),
            predicates: PredicateObjectList {
                pairs: vec![PredicateObjects {
                    verb: Verb::A {
                        span: SourceSpan::new(5, 6),
                    },
                    objects: vec![expr("o", 7, 11)],
                    span: SourceSpan::new(5, 11),
                }],
                span: SourceSpan::new(5, 11),
            },
            span: SourceSpan::new(0, 11),
        };
        let stmt = Statement::Triples(triples);
        assert_eq!(stmt.span(), SourceSpan::new(0, 11));
    }

    #[test]
    fn test_verb_spans() {
        let a = Verb::A {
            span: SourceSpan::new(3, 4),
        };
        assert_eq!(a.span(), SourceSpan::new(3, 4));

        let pred = Verb::Predicate(expr("knows", 3, 11));
        assert_eq!(pred.span(), SourceSpan::new(3, 11));

        let has = Verb::Has(expr("age", 7, 13));
        assert_eq!(has.span(), SourceSpan::new(7, 13));
    }

    #[test]
    fn test_directive_span() {
        let decl = PrefixDecl {
            prefix: Arc::from("ex"),
            iri: Iri::reference("http://example.org/", SourceSpan::new(11, 32)),
            span: SourceSpan::new(0, 32),
        };
        let d = Directive::Prefix(decl.clone());
        assert_eq!(d.span(), SourceSpan::new(0, 32));

        let sparql = Directive::SparqlPrefix(decl);
        assert_eq!(sparql.span(), SourceSpan::new(0, 32));
    }
}
