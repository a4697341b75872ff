//! Error types for the openworm-neuron crate.

use openworm_connectome::ConnectomeError;
use openworm_semantic::{QueryError, SemanticError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuronError {
    #[error("Connectome error: {0}")]
    Connectome(#[from] ConnectomeError),

    #[error("Statement store error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

/// Coarse classification of a failure, for callers that only need to know
/// which kind of thing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A tabular resource could not be reached.
    Transport,
    /// A tabular resource was reached but is malformed.
    Parse,
    /// The relational database is missing, unreadable, or has the wrong schema.
    Store,
    /// A fixed query is malformed.
    Query,
    /// The requested accessor needs a relation that is not configured, or
    /// the HTTP client could not be set up.
    Config,
}

impl NeuronError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connectome(ConnectomeError::Client(_)) => FailureKind::Config,
            Self::Connectome(e) if e.is_transport() => FailureKind::Transport,
            Self::Connectome(_) => FailureKind::Parse,
            Self::Semantic(SemanticError::Query(_)) | Self::Query(_) => FailureKind::Query,
            Self::Semantic(SemanticError::RelationNotConfigured { .. }) => FailureKind::Config,
            Self::Semantic(_) => FailureKind::Store,
        }
    }
}

pub type Result<T> = std::result::Result<T, NeuronError>;
