//! IRIs for the relational database's entities and relation codes.

use oxigraph::model::{IriParseError, NamedNode};

/// Builds entity IRIs by appending a local id to a fixed base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    base: String,
}

impl Namespace {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<base><local>`; fails when the result is not a valid IRI (e.g. an id
    /// containing whitespace).
    pub fn iri(&self, local: &str) -> Result<NamedNode, IriParseError> {
        NamedNode::new(format!("{}{local}", self.base))
    }
}
