//! Canonical N3 serialization.
//!
//! Every AST node implements [`std::fmt::Display`], emitting a canonical
//! form: one statement per line, single spaces, double-quoted short
//! strings, uppercase SPARQL directive keywords, and escapes re-applied
//! wherever a raw character would not lex. The canonical form is a
//! fixpoint: parsing a rendered document and rendering the result yields
//! the same text.
//!
//! Inside formulas the `.` is written as a separator between statements,
//! and never after a SPARQL-style directive, matching the grammar the
//! parser accepts.

use crate::ast::{
    BaseDecl, BlankNode, BlankNodePropertyList, BlankNodeValue, Collection, Directive, Document,
    Expression, Formula, Iri, IriPropertyList, IriValue, Literal, LiteralValue, PathItem, PathOp,
    PathTail, PredicateObjectList, PredicateObjects, PrefixDecl, QuickVar, Statement, Triples,
    Verb,
};
use crate::lex::chars::{is_iri_char, is_pn_chars, is_pn_local_esc, is_pn_local_start};
use std::fmt;

/// Escape a string value for a short double-quoted literal.
///
/// Handles the ECHAR set: `\` `"` and the control characters newline,
/// carriage return, tab, backspace, and form feed. Everything else is
/// legal raw in a short string.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out
}

/// Escape an IRI body for `<...>` syntax.
///
/// Characters outside the IRIREF alphabet (controls, space, `<>"{}|^`,
/// backtick, backslash) become `\uXXXX` escapes; the excluded set is
/// entirely ASCII, so four hex digits always suffice.
fn escape_iri(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if is_iri_char(ch) {
            out.push(ch);
        } else {
            out.push_str(&format!("\\u{:04X}", ch as u32));
        }
    }
    out
}

/// Escape the local part of a prefixed name.
///
/// Dots are legal only strictly inside the name and dashes only after
/// the first character; those boundary cases and the PN_LOCAL_ESC
/// punctuation (including every `%`) get a backslash.
fn escape_local(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut first = true;
    while let Some(ch) = chars.next() {
        let is_last = chars.peek().is_none();
        let raw = if first {
            is_pn_local_start(ch)
        } else if is_last {
            is_pn_chars(ch) || ch == ':'
        } else {
            is_pn_chars(ch) || ch == ':' || ch == '.'
        };
        if raw {
            out.push(ch);
        } else if is_pn_local_esc(ch) {
            out.push('\\');
            out.push(ch);
        } else {
            // Outside the local-name alphabet; pass through untouched.
            out.push(ch);
        }
        first = false;
    }
    out
}

/// Whether a statement form takes a `.`: terminator at the top level,
/// separator inside a formula. SPARQL-style directives take none in
/// either position.
fn takes_dot(statement: &Statement) -> bool {
    !matches!(
        statement,
        Statement::Directive(Directive::SparqlPrefix(_) | Directive::SparqlBase(_))
    )
}

// =========================================================================
// Terms
// =========================================================================

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            IriValue::Reference(iri) => write!(f, "<{}>", escape_iri(iri)),
            IriValue::Prefixed { prefix, local } => {
                write!(f, "{}:{}", prefix, escape_local(local))
            }
        }
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            BlankNodeValue::Label(label) => write!(f, "_:{}", label),
            BlankNodeValue::Anon => f.write_str("[]"),
        }
    }
}

impl fmt::Display for QuickVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            LiteralValue::Simple(value) => write!(f, "\"{}\"", escape_string(value)),
            LiteralValue::LangTagged { value, lang } => {
                write!(f, "\"{}\"@{}", escape_string(value), lang)
            }
            LiteralValue::Typed { value, datatype } => {
                write!(f, "\"{}\"^^{}", escape_string(value), datatype)
            }
            LiteralValue::Integer(n) => write!(f, "{}", n),
            LiteralValue::Decimal(d) => f.write_str(d),
            // `{:e}` keeps the exponent, so the output re-lexes as a double
            LiteralValue::Double(x) => write!(f, "{:e}", x),
            LiteralValue::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

// =========================================================================
// Paths
// =========================================================================

impl fmt::Display for PathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOp::Forward => f.write_str("!"),
            PathOp::Backward => f.write_str("^"),
        }
    }
}

impl fmt::Display for PathTail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.rest)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tail {
            Some(tail) => write!(f, "{}{}", self.item, tail),
            None => write!(f, "{}", self.item),
        }
    }
}

impl fmt::Display for PathItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathItem::Iri(iri) => write!(f, "{}", iri),
            PathItem::BlankNode(node) => write!(f, "{}", node),
            PathItem::Var(var) => write!(f, "{}", var),
            PathItem::Collection(collection) => write!(f, "{}", collection),
            PathItem::PropertyList(list) => write!(f, "{}", list),
            PathItem::IriPropertyList(list) => write!(f, "{}", list),
            PathItem::Literal(literal) => write!(f, "{}", literal),
            PathItem::Formula(formula) => write!(f, "{}", formula),
        }
    }
}

// =========================================================================
// Statements
// =========================================================================

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Predicate(e) => write!(f, "{}", e),
            Verb::Inverse(e) => write!(f, "<- {}", e),
            Verb::A { .. } => f.write_str("a"),
            Verb::Has(e) => write!(f, "has {}", e),
            Verb::IsOf(e) => write!(f, "is {} of", e),
            Verb::Equals { .. } => f.write_str("="),
            Verb::Implies { .. } => f.write_str("=>"),
            Verb::ImpliedBy { .. } => f.write_str("<="),
        }
    }
}

impl fmt::Display for PredicateObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        for (i, object) in self.objects.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", object)?;
            } else {
                write!(f, ", {}", object)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PredicateObjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ; ")?;
            }
            write!(f, "{}", pair)?;
        }
        Ok(())
    }
}

impl fmt::Display for Triples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.predicates)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for BlankNodePropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} ]", self.properties)
    }
}

impl fmt::Display for IriPropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ id {} {} ]", self.iri, self.properties)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        let mut statements = self.statements.iter().peekable();
        while let Some(statement) = statements.next() {
            write!(f, "{}", statement)?;
            if statements.peek().is_some() {
                if takes_dot(statement) {
                    f.write_str(" . ")?;
                } else {
                    f.write_str(" ")?;
                }
            }
        }
        f.write_str(" }")
    }
}

impl fmt::Display for PrefixDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prefix, self.iri)
    }
}

impl fmt::Display for BaseDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iri)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Prefix(decl) => write!(f, "@prefix {}", decl),
            Directive::Base(decl) => write!(f, "@base {}", decl),
            Directive::SparqlPrefix(decl) => write!(f, "PREFIX {}", decl),
            Directive::SparqlBase(decl) => write!(f, "BASE {}", decl),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Directive(directive) => write!(f, "{}", directive),
            Statement::Triples(triples) => write!(f, "{}", triples),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            if takes_dot(statement) {
                writeln!(f, "{} .", statement)?;
            } else {
                writeln!(f, "{}", statement)?;
            }
        }
        Ok(())
    }
}
