//! N3 path expression types.
//!
//! Every term position in N3 (subject, predicate, object, collection
//! item) holds a *path expression*: a term optionally extended by the
//! path operators `!` (forward) and `^` (backward).
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `x!p` | the object reached from `x` via `p` |
//! | `x^p` | the subject reaching `x` via `p` |
//!
//! Paths are right-associative: `<a>!<b>^<c>` groups as
//! `<a> ! (<b> ^ <c>)`, which the tree makes structural — the
//! tail of the first link holds the entire remaining path.

use super::doc::{BlankNodePropertyList, Collection, Formula, IriPropertyList};
use super::term::{BlankNode, Iri, Literal, QuickVar};
use crate::span::SourceSpan;

/// A path expression: one item, optionally followed by a path tail.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    /// The first (or only) item of the path
    pub item: PathItem,
    /// The rest of the path, if any
    pub tail: Option<PathTail>,
    /// Source span of the whole path
    pub span: SourceSpan,
}

impl Expression {
    /// Create a bare expression with no path tail.
    pub fn simple(item: PathItem) -> Self {
        let span = item.span();
        Self {
            item,
            tail: None,
            span,
        }
    }

    /// Create a path expression `item op rest`.
    pub fn path(item: PathItem, op: PathOp, rest: Expression, span: SourceSpan) -> Self {
        Self {
            item,
            tail: Some(PathTail {
                op,
                rest: Box::new(rest),
            }),
            span,
        }
    }

    /// Check if this is a bare term (no path operators).
    pub fn is_simple(&self) -> bool {
        self.tail.is_none()
    }

    /// Number of path links in this expression.
    pub fn link_count(&self) -> usize {
        match &self.tail {
            Some(tail) => 1 + tail.rest.link_count(),
            None => 0,
        }
    }
}

/// The continuation of a path expression.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTail {
    /// The operator joining the item to the rest
    pub op: PathOp,
    /// The remaining path (right-associative)
    pub rest: Box<Expression>,
}

/// A path operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOp {
    /// `!` — forward traversal
    Forward,
    /// `^` — backward traversal
    Backward,
}

/// An item at one position of a path expression.
#[derive(Clone, Debug, PartialEq)]
pub enum PathItem {
    /// IRI (full or prefixed)
    Iri(Iri),
    /// Blank node (label or anonymous)
    BlankNode(BlankNode),
    /// Quick variable (`?name`)
    Var(QuickVar),
    /// Collection (`( ... )`)
    Collection(Collection),
    /// Blank node property list (`[ ...props ]`)
    PropertyList(BlankNodePropertyList),
    /// IRI property list (`[ id <iri> ...props ]`)
    IriPropertyList(IriPropertyList),
    /// Literal (string, number, boolean)
    Literal(Literal),
    /// Formula (`{ ... }`)
    Formula(Formula),
}

impl PathItem {
    /// Get the source span of this item.
    pub fn span(&self) -> SourceSpan {
        match self {
            PathItem::Iri(iri) => iri.span,
            PathItem::BlankNode(b) => b.span,
            PathItem::Var(v) => v.span,
            PathItem::Collection(c) => c.span,
            PathItem::PropertyList(p) => p.span,
            PathItem::IriPropertyList(p) => p.span,
            PathItem::Literal(l) => l.span,
            PathItem::Formula(f) => f.span,
        }
    }
}
