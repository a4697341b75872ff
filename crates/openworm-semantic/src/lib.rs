//! openworm-semantic: Statement store built from the C. elegans relational database.
//!
//! The loader re-expresses entities and relationships as RDF triples in an
//! in-memory oxigraph store; `NeuronQueries` holds the fixed SPARQL type,
//! receptor, and reference queries the `Neuron` accessors run, with the
//! neuron name bound as a substituted variable.

pub mod error;
pub mod loader;
pub mod queries;
pub mod store;
pub mod term;

pub use error::{QueryError, SemanticError};
pub use loader::StatementStoreLoader;
pub use queries::NeuronQueries;
pub use store::StatementStore;
pub use term::Namespace;
