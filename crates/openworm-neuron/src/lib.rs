//! openworm-neuron: C. elegans neuron entity over two data representations.
//!
//! A `Neuron` answers type, receptor, degree, neighbor, and reference
//! questions by consulting the connectivity graph (built from the remote
//! neuron registry and edge list) or the statement store (built from the
//! local relational database). Both are built lazily and shared across
//! neurons through a `DataCache` keyed by data-source identity.

pub mod cache;
pub mod error;
pub mod neuron;
pub mod sources;

pub use cache::DataCache;
pub use error::{FailureKind, NeuronError};
pub use neuron::Neuron;
pub use sources::DataSources;
