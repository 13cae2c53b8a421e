//! N3 term types with source spans.
//!
//! These types represent the leaf terms of an N3 document: IRIs, blank
//! nodes, quick variables, and literals. All types carry source spans
//! for precise diagnostics.

use crate::span::SourceSpan;
use std::sync::Arc;

/// An IRI reference.
///
/// This can be either a full IRI (`<http://example.org/foo>`) or
/// a prefixed name (`ex:foo`). Prefixed names are kept unexpanded;
/// resolution against `@prefix` declarations is a consumer concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Iri {
    /// The IRI value (reference or prefixed)
    pub value: IriValue,
    /// Source span
    pub span: SourceSpan,
}

impl Iri {
    /// Create a full IRI reference (from `<...>` syntax).
    pub fn reference(iri: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: IriValue::Reference(Arc::from(iri.as_ref())),
            span,
        }
    }

    /// Create a prefixed IRI (from `prefix:local` syntax).
    pub fn prefixed(prefix: impl AsRef<str>, local: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: IriValue::Prefixed {
                prefix: Arc::from(prefix.as_ref()),
                local: Arc::from(local.as_ref()),
            },
            span,
        }
    }
}

/// The value of an IRI reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IriValue {
    /// Full IRI reference with escapes decoded (`<http://...>`)
    Reference(Arc<str>),
    /// Prefixed name (needs expansion using prefix declarations)
    Prefixed {
        /// The prefix (empty string for the default prefix `:local`)
        prefix: Arc<str>,
        /// The local part (empty string for a bare namespace `p:`)
        local: Arc<str>,
    },
}

/// A blank node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlankNode {
    /// The blank node value
    pub value: BlankNodeValue,
    /// Source span
    pub span: SourceSpan,
}

impl BlankNode {
    /// Create a labeled blank node (e.g., `_:label`).
    pub fn labeled(label: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: BlankNodeValue::Label(Arc::from(label.as_ref())),
            span,
        }
    }

    /// Create an anonymous blank node (`[ ]`).
    pub fn anon(span: SourceSpan) -> Self {
        Self {
            value: BlankNodeValue::Anon,
            span,
        }
    }
}

/// The value of a blank node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlankNodeValue {
    /// Labeled blank node (`_:label`)
    Label(Arc<str>),
    /// Anonymous blank node (`[ ]` with no properties)
    Anon,
}

/// A quick variable (e.g., `?name`).
///
/// The name does not include the leading `?`. N3 quick variables are
/// implicitly universally quantified over the outermost formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickVar {
    /// Variable name (without the `?` sigil)
    pub name: Arc<str>,
    /// Source span (includes the sigil)
    pub span: SourceSpan,
}

impl QuickVar {
    /// Create a new quick variable.
    pub fn new(name: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            span,
        }
    }
}

/// A literal value.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    /// The literal value
    pub value: LiteralValue,
    /// Source span
    pub span: SourceSpan,
}

impl Literal {
    /// Create a simple string literal.
    pub fn string(value: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Simple(Arc::from(value.as_ref())),
            span,
        }
    }

    /// Create a language-tagged string.
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::LangTagged {
                value: Arc::from(value.as_ref()),
                lang: Arc::from(lang.as_ref()),
            },
            span,
        }
    }

    /// Create a typed literal with an IRI datatype.
    pub fn typed(value: impl AsRef<str>, datatype: Iri, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Typed {
                value: Arc::from(value.as_ref()),
                datatype: Box::new(datatype),
            },
            span,
        }
    }

    /// Create an integer literal.
    pub fn integer(value: i64, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Integer(value),
            span,
        }
    }

    /// Create a decimal literal.
    pub fn decimal(value: impl AsRef<str>, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Decimal(Arc::from(value.as_ref())),
            span,
        }
    }

    /// Create a double literal.
    pub fn double(value: f64, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Double(value),
            span,
        }
    }

    /// Create a boolean literal.
    pub fn boolean(value: bool, span: SourceSpan) -> Self {
        Self {
            value: LiteralValue::Boolean(value),
            span,
        }
    }
}

/// The value of a literal.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    /// Simple string literal (no language tag or datatype)
    Simple(Arc<str>),
    /// Language-tagged string (e.g., `"hello"@en`)
    LangTagged {
        /// The string value
        value: Arc<str>,
        /// The language tag (e.g., "en", "en-US")
        lang: Arc<str>,
    },
    /// Typed literal (e.g., `"42"^^xsd:integer`)
    Typed {
        /// The lexical form
        value: Arc<str>,
        /// The datatype IRI
        datatype: Box<Iri>,
    },
    /// Integer literal (syntactic shorthand, implicitly xsd:integer)
    Integer(i64),
    /// Decimal literal (syntactic shorthand, implicitly xsd:decimal)
    ///
    /// Stored as string to preserve exact representation.
    Decimal(Arc<str>),
    /// Double literal (syntactic shorthand, implicitly xsd:double)
    Double(f64),
    /// Boolean literal (`true` or `false`)
    Boolean(bool),
}
