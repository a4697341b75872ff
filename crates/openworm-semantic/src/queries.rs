//! The fixed neuron queries, parameterized by neuron name.
//!
//! Each query starts from the anchor node: any subject with a statement whose
//! object is the neuron's name, then follows one relation and reads the
//! target's label. `?name` (and `?item` for references) are substituted at
//! evaluation time and never spliced into the query text.

use oxigraph::model::{Literal, Term, Variable};
use oxigraph::sparql::Query;

use openworm_core::{ReferenceKind, SemanticConfig};

use crate::error::{QueryError, Result, SemanticError};
use crate::store::StatementStore;

/// Prepared queries for the `Neuron` accessors.
#[derive(Debug, Clone)]
pub struct NeuronQueries {
    type_query: Query,
    receptor_query: Query,
    receptor_reference: Option<Query>,
    neighbor_reference: Option<Query>,
}

const PREFIXES: &str = "PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>";

fn related_label_query(namespace: &str, relation: u64) -> String {
    format!(
        "{PREFIXES}
        SELECT ?label WHERE {{
            ?node ?p ?name .
            ?node <{namespace}{relation}> ?object .
            ?object rdfs:label ?label .
        }}
        ORDER BY ?object ?label"
    )
}

fn reference_query(namespace: &str, relation: u64, provenance: u64) -> String {
    format!(
        "{PREFIXES}
        SELECT ?url WHERE {{
            ?node ?p ?name .
            ?node <{namespace}{relation}> ?object .
            ?object rdfs:label ?item .
            ?object <{namespace}{provenance}> ?evidence .
            ?evidence rdfs:label ?url .
        }}
        ORDER BY ?evidence ?url"
    )
}

fn bind(variable: &str, value: &str) -> (Variable, Term) {
    (
        Variable::new_unchecked(variable),
        Literal::new_simple_literal(value).into(),
    )
}

impl NeuronQueries {
    /// Parse the queries for the configured namespace and relation codes.
    pub fn new(config: &SemanticConfig) -> std::result::Result<Self, QueryError> {
        let ns = config.namespace.as_str();
        let parse = |text: String| Query::parse(&text, None);
        let provenance = config.reference_relation;

        let receptor_reference = provenance
            .map(|v| parse(reference_query(ns, config.receptor_relation, v)))
            .transpose()?;
        let neighbor_reference = provenance
            .zip(config.neighbor_relation)
            .map(|(v, rel)| parse(reference_query(ns, rel, v)))
            .transpose()?;

        Ok(Self {
            type_query: parse(related_label_query(ns, config.is_a_relation))?,
            receptor_query: parse(related_label_query(ns, config.receptor_relation))?,
            receptor_reference,
            neighbor_reference,
        })
    }

    /// Label of the "is a" target. When several match, the last solution
    /// wins; the query's ordering makes that choice stable.
    pub fn neuron_type(
        &self,
        store: &StatementStore,
        name: &str,
    ) -> std::result::Result<Option<String>, QueryError> {
        let labels = labels(store, &self.type_query, [bind("name", name)], "label")?;
        Ok(labels.into_iter().last())
    }

    /// Labels of every receptor target, duplicates kept, in solution order.
    pub fn receptors(
        &self,
        store: &StatementStore,
        name: &str,
    ) -> std::result::Result<Vec<String>, QueryError> {
        labels(store, &self.receptor_query, [bind("name", name)], "label")
    }

    /// Evidence URL for the neuron's association with `item`.
    ///
    /// Fails with `RelationNotConfigured` when the database's provenance
    /// relation (or, for neighbors, the neighbor relation) is not configured.
    pub fn reference(
        &self,
        store: &StatementStore,
        kind: ReferenceKind,
        name: &str,
        item: &str,
    ) -> Result<Option<String>> {
        let query = match kind {
            ReferenceKind::Receptor => self.receptor_reference.as_ref(),
            ReferenceKind::Neighbor => self.neighbor_reference.as_ref(),
        };
        let query = query.ok_or(SemanticError::RelationNotConfigured {
            relation: if self.receptor_reference.is_none() {
                "reference_relation"
            } else {
                "neighbor_relation"
            },
        })?;

        let urls = labels(
            store,
            query,
            [bind("name", name), bind("item", item)],
            "url",
        )?;
        Ok(urls.into_iter().next())
    }
}

fn labels(
    store: &StatementStore,
    query: &Query,
    bindings: impl IntoIterator<Item = (Variable, Term)>,
    variable: &str,
) -> std::result::Result<Vec<String>, QueryError> {
    Ok(store
        .select(query, bindings, variable)?
        .into_iter()
        .map(|term| match term {
            Term::Literal(literal) => literal.value().to_string(),
            Term::NamedNode(node) => node.into_string(),
            other => other.to_string(),
        })
        .collect())
}
