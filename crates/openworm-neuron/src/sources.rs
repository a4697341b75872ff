//! Wiring between configuration, loaders, prepared queries, and the cache.

use std::sync::Arc;

use openworm_connectome::{ConnectomeGraph, ConnectomeLoader};
use openworm_core::OpenWormConfig;
use openworm_semantic::{NeuronQueries, StatementStore, StatementStoreLoader};

use crate::cache::DataCache;
use crate::error::Result;
use crate::neuron::Neuron;

/// Everything a `Neuron` needs to build its representations.
#[derive(Debug)]
pub struct DataSources {
    cache: Arc<DataCache>,
    connectome: ConnectomeLoader,
    statements: StatementStoreLoader,
    queries: NeuronQueries,
}

impl DataSources {
    /// Prepare loaders and queries for `config`, backed by `cache`.
    ///
    /// Nothing is fetched or opened here; the queries are parsed so a
    /// malformed relation setup fails early.
    pub fn new(config: &OpenWormConfig, cache: Arc<DataCache>) -> Result<Self> {
        let connectome = ConnectomeLoader::new(config.connectome.clone())?;
        let statements = StatementStoreLoader::new(config.semantic.clone());
        let queries = NeuronQueries::new(&config.semantic)?;
        Ok(Self {
            cache,
            connectome,
            statements,
            queries,
        })
    }

    /// Sources backed by the process-wide cache.
    pub fn shared(config: &OpenWormConfig) -> Result<Self> {
        Self::new(config, DataCache::shared())
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    pub fn queries(&self) -> &NeuronQueries {
        &self.queries
    }

    pub fn connectome_key(&self) -> String {
        self.connectome.source_key()
    }

    pub fn statements_key(&self) -> String {
        self.statements.source_key()
    }

    pub async fn connectome(&self) -> Result<Arc<ConnectomeGraph>> {
        self.cache.connectome(&self.connectome).await
    }

    pub async fn statements(&self) -> Result<Arc<StatementStore>> {
        self.cache.statements(&self.statements).await
    }

    /// A neuron handle over these sources. Nothing is built until an
    /// accessor needs it.
    pub fn neuron(self: &Arc<Self>, name: impl Into<String>) -> Neuron {
        Neuron::new(name, Arc::clone(self))
    }

    /// Drop both cached representations so neurons created afterwards
    /// rebuild them. Existing neurons keep what they already hold.
    pub fn invalidate(&self) {
        self.cache.invalidate_connectome(&self.connectome_key());
        self.cache.invalidate_statements(&self.statements_key());
    }
}
