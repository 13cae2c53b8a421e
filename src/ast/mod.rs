//! N3 Abstract Syntax Tree types.
//!
//! This module contains the typed AST representation of N3 documents.
//! All nodes carry source spans for precise diagnostics, and the tree
//! is fully disambiguated: path associativity, verb direction, and the
//! three bracketed `[` forms are all structural.
//!
//! ## Module Structure
//!
//! - [`term`]: Leaf terms (IRIs, blank nodes, quick variables, literals)
//! - [`path`]: Path expressions (`!`/`^`, right-associative)
//! - [`doc`]: Document structure (statements, directives, verbs,
//!   collections, property lists, formulas)
//!
//! ## Example
//!
//! ```
//! use n3_syntax::parse_n3;
//!
//! let output = parse_n3("@prefix ex: <http://example.org/> . ex:alice a ex:Person .");
//! let doc = output.ast.unwrap();
//! assert_eq!(doc.statements.len(), 2);
//! ```

pub mod doc;
pub mod path;
pub mod term;

// Re-export commonly used types at the ast module level
pub use doc::{
    BaseDecl, BlankNodePropertyList, Collection, Directive, Document, Formula, IriPropertyList,
    PredicateObjectList, PredicateObjects, PrefixDecl, Statement, Triples, Verb,
};
pub use path::{Expression, PathItem, PathOp, PathTail};
pub use term::{BlankNode, BlankNodeValue, Iri, IriValue, Literal, LiteralValue, QuickVar};
