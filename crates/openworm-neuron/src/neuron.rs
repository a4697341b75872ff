//! The `Neuron` entity.
//!
//! A neuron is a name plus two lazily taken snapshots: the connectivity
//! graph and the statement store. Each snapshot is taken at most once per
//! instance, on the first accessor that needs it, and kept for the
//! instance's lifetime. A failed build leaves the snapshot unset.

use std::sync::Arc;

use tokio::sync::OnceCell;

use openworm_connectome::ConnectomeGraph;
use openworm_core::{NeighborKind, NeuronType, ReferenceKind, SynapseClass};
use openworm_semantic::StatementStore;

use crate::error::Result;
use crate::sources::DataSources;

#[derive(Debug)]
pub struct Neuron {
    name: String,
    sources: Arc<DataSources>,
    connectome: OnceCell<Arc<ConnectomeGraph>>,
    statements: OnceCell<Arc<StatementStore>>,
}

impl Neuron {
    pub fn new(name: impl Into<String>, sources: Arc<DataSources>) -> Self {
        Self {
            name: name.into(),
            sources,
            connectome: OnceCell::new(),
            statements: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn graph(&self) -> Result<&ConnectomeGraph> {
        let graph = self
            .connectome
            .get_or_try_init(|| self.sources.connectome())
            .await?;
        Ok(graph.as_ref())
    }

    async fn store(&self) -> Result<&StatementStore> {
        let store = self
            .statements
            .get_or_try_init(|| self.sources.statements())
            .await?;
        Ok(store.as_ref())
    }

    /// Whether the name is a node of the connectivity graph.
    pub async fn in_connectome(&self) -> Result<bool> {
        Ok(self.graph().await?.node(&self.name).is_some())
    }

    /// Registry classification, e.g. "interneuron" or "sensorymotor".
    ///
    /// `None` when the neuron is absent from the graph or only appears as
    /// an edge endpoint.
    pub async fn type_from_connectome(&self) -> Result<Option<String>> {
        let graph = self.graph().await?;
        Ok(graph
            .node(&self.name)
            .and_then(|n| n.neuron_type.as_ref())
            .map(NeuronType::label))
    }

    /// The neuron's type, lower-cased. Uses the connectivity graph.
    pub async fn neuron_type(&self) -> Result<Option<String>> {
        Ok(self.type_from_connectome().await?.map(|t| t.to_lowercase()))
    }

    /// Label of the neuron's "is a" target in the statement store.
    pub async fn type_from_statements(&self) -> Result<Option<String>> {
        let store = self.store().await?;
        Ok(self.sources.queries().neuron_type(store, &self.name)?)
    }

    /// Receptor labels in solution order, duplicates kept.
    pub async fn receptors(&self) -> Result<Vec<String>> {
        let store = self.store().await?;
        Ok(self.sources.queries().receptors(store, &self.name)?)
    }

    /// Incident edges (in and out) whose synapse kind contains "GapJunction".
    pub async fn gap_junction_degree(&self) -> Result<usize> {
        Ok(self.graph().await?.degree(&self.name, SynapseClass::GapJunction))
    }

    /// Incident edges (in and out) whose synapse kind contains "Send".
    pub async fn chemical_synapse_degree(&self) -> Result<usize> {
        Ok(self.graph().await?.degree(&self.name, SynapseClass::Chemical))
    }

    /// Neighbor names for `kind`, deduplicated, in edge discovery order.
    pub async fn neighbors(&self, kind: NeighborKind) -> Result<Vec<String>> {
        Ok(self.graph().await?.neighbors(&self.name, kind))
    }

    /// Evidence URL for the association between this neuron and `item`.
    pub async fn reference(&self, kind: ReferenceKind, item: &str) -> Result<Option<String>> {
        let store = self.store().await?;
        Ok(self
            .sources
            .queries()
            .reference(store, kind, &self.name, item)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use openworm_core::OpenWormConfig;

    use crate::cache::DataCache;
    use crate::error::FailureKind;

    fn unreachable_sources() -> Arc<DataSources> {
        let mut config = OpenWormConfig::default();
        config.connectome.neurons_url = "http://127.0.0.1:1/neurons.csv".to_string();
        config.connectome.connectome_url = "http://127.0.0.1:1/connectome.csv".to_string();
        config.connectome.timeout_secs = 2;
        config.semantic.db_path = "/nonexistent/openworm/celegans.db".into();
        Arc::new(DataSources::new(&config, Arc::new(DataCache::new())).unwrap())
    }

    #[test]
    fn test_name_needs_no_build() {
        let sources = unreachable_sources();
        let neuron = sources.neuron("AVAL");
        assert_eq!(neuron.name(), "AVAL");
        assert!(neuron.connectome.get().is_none());
        assert!(neuron.statements.get().is_none());
    }

    #[tokio::test]
    async fn test_failed_builds_leave_snapshots_unset() {
        let sources = unreachable_sources();
        let neuron = sources.neuron("AVAL");

        let err = neuron.gap_junction_degree().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(neuron.connectome.get().is_none());

        let err = neuron.receptors().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Store);
        assert!(neuron.statements.get().is_none());

        assert!(sources.cache().connectome_built_at(&sources.connectome_key()).is_none());
    }
}
