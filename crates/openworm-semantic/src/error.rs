//! Error types for the openworm-semantic crate.

use std::path::PathBuf;

use oxigraph::sparql::{EvaluationError, SparqlSyntaxError};
use oxigraph::store::StorageError;
use thiserror::Error;

/// Errors from preparing or evaluating one of the fixed SPARQL queries.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Malformed query: {0}")]
    Syntax(#[from] SparqlSyntaxError),

    #[error("Query evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Expected solutions, got {0}")]
    UnexpectedResults(&'static str),
}

#[derive(Error, Debug)]
pub enum SemanticError {
    #[error("Database file not found: {}", path.display())]
    MissingDatabase { path: PathBuf },

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Statement graph error: {0}")]
    Graph(#[from] StorageError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("No {relation} configured for this statement store")]
    RelationNotConfigured { relation: &'static str },
}

pub type Result<T> = std::result::Result<T, SemanticError>;
