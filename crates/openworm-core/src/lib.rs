//! openworm-core: Shared types, configuration, and error handling for the OpenWorm data layer.
//!
//! This crate provides the foundational types used across all OpenWorm components:
//! - Neuron functional types derived from the neuron registry
//! - Synapse classification shared by degree and neighbor traversals
//! - Neighbor and reference selectors for the `Neuron` accessors
//! - Layered configuration for the data sources
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConnectomeConfig, OpenWormConfig, SemanticConfig};
pub use error::CoreError;
pub use types::{NeighborKind, NeuronType, ReferenceKind, SynapseClass};
