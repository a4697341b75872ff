//! In-memory statement store.
//!
//! Triples are deduplicated and loaded into an in-memory oxigraph `Store`,
//! which answers the SPARQL queries. The canonical order is the sorted
//! N-Triples form; two stores built from the same triples share a
//! fingerprint whatever order the triples arrived in.

use std::collections::BTreeMap;
use std::fmt;

use oxigraph::model::vocab::rdfs;
use oxigraph::model::{GraphName, Term, Triple, Variable};
use oxigraph::sparql::{Query, QueryOptions, QueryResults};
use oxigraph::store::Store;

use crate::error::{QueryError, Result};

pub struct StatementStore {
    graph: Store,
    len: usize,
    labels: usize,
    fingerprint: String,
}

impl fmt::Debug for StatementStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementStore")
            .field("len", &self.len)
            .field("labels", &self.labels)
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

impl StatementStore {
    /// Build a store from any collection of triples; duplicates collapse.
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Result<Self> {
        let canonical: BTreeMap<String, Triple> = triples
            .into_iter()
            .map(|t| (t.to_string(), t))
            .collect();

        let mut hasher = blake3::Hasher::new();
        for line in canonical.keys() {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        let labels = canonical
            .values()
            .filter(|t| t.predicate.as_ref() == rdfs::LABEL)
            .count();
        let len = canonical.len();

        let graph = Store::new()?;
        graph.extend(
            canonical
                .into_values()
                .map(|t| t.in_graph(GraphName::DefaultGraph)),
        )?;

        Ok(Self {
            graph,
            len,
            labels,
            fingerprint: hasher.finalize().to_hex().to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of `rdfs:label` statements.
    pub fn label_count(&self) -> usize {
        self.labels
    }

    /// BLAKE3 hash over the canonical N-Triples lines, hex-encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn contains(&self, triple: &Triple) -> Result<bool> {
        let quad = triple.clone().in_graph(GraphName::DefaultGraph);
        Ok(self.graph.contains(&quad)?)
    }

    /// Evaluate a prepared SELECT with `bindings` substituted for its
    /// variables, returning `variable` from each solution in result order.
    pub fn select(
        &self,
        query: &Query,
        bindings: impl IntoIterator<Item = (Variable, Term)>,
        variable: &str,
    ) -> std::result::Result<Vec<Term>, QueryError> {
        let results = self.graph.query_opt_with_substituted_variables(
            query.clone(),
            QueryOptions::default(),
            bindings,
        )?;
        let QueryResults::Solutions(solutions) = results else {
            return Err(QueryError::UnexpectedResults("a boolean or graph result"));
        };

        let mut values = Vec::new();
        for solution in solutions {
            if let Some(term) = solution?.get(variable) {
                values.push(term.clone());
            }
        }
        Ok(values)
    }
}
