//! openworm-connectome: Directed connectivity graph of the C. elegans connectome.
//!
//! Fetches the neuron registry and the connectome edge list, parses the
//! delimited tables, and builds an in-memory directed graph with typed nodes
//! and attributed edges. Degree and neighbor traversals run on the built graph.

pub mod error;
pub mod fetch;
pub mod graph;
pub mod parse;

pub use error::ConnectomeError;
pub use graph::{ConnectomeGraph, GraphStats, NeuronNode, Synapse};

use std::time::Instant;

use openworm_core::ConnectomeConfig;

/// Builds a `ConnectomeGraph` from the configured resources.
#[derive(Debug, Clone)]
pub struct ConnectomeLoader {
    client: reqwest::Client,
    config: ConnectomeConfig,
}

impl ConnectomeLoader {
    /// Create a loader whose HTTP client enforces the configured timeout.
    pub fn new(config: ConnectomeConfig) -> error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConnectomeError::Client)?;
        Ok(Self { client, config })
    }

    /// Identity of the data source, used as a cache key.
    pub fn source_key(&self) -> String {
        format!("{}|{}", self.config.neurons_url, self.config.connectome_url)
    }

    /// Fetch and parse both tables and build the graph.
    ///
    /// Nothing is returned unless every fetch and every row succeeded.
    pub async fn load(&self) -> error::Result<ConnectomeGraph> {
        let start = Instant::now();

        let neurons_text = fetch::fetch_text(&self.client, &self.config.neurons_url).await?;
        let neurons = parse::parse_neurons(&neurons_text)?;

        let connectome_text =
            fetch::fetch_text(&self.client, &self.config.connectome_url).await?;
        let synapses = parse::parse_connectome(&connectome_text)?;

        let neuron_rows = neurons.len();
        let synapse_rows = synapses.len();
        let graph = ConnectomeGraph::from_rows(neurons, synapses);

        tracing::info!(
            neuron_rows,
            synapse_rows,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Built connectome graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use openworm_core::SynapseClass;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NEURONS: &str = "AVAL;Ring interneuron\nAVAR;Ring interneuron\nDA1;motor neuron\n";
    const CONNECTOME: &str = "AVAL;AVAR;GapJunction;2;\nAVAL;DA1;Send;4;Acetylcholine\n";

    async fn serve(neurons: ResponseTemplate, connectome: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/neurons.csv"))
            .respond_with(neurons)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/connectome.csv"))
            .respond_with(connectome)
            .mount(&server)
            .await;
        server
    }

    fn loader_for(base: &str) -> ConnectomeLoader {
        ConnectomeLoader::new(ConnectomeConfig {
            neurons_url: format!("{base}/neurons.csv"),
            connectome_url: format!("{base}/connectome.csv"),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_builds_graph() {
        let server = serve(
            ResponseTemplate::new(200).set_body_string(NEURONS),
            ResponseTemplate::new(200).set_body_string(CONNECTOME),
        )
        .await;

        let graph = loader_for(&server.uri()).load().await.unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("AVAL", SynapseClass::GapJunction), 1);
        assert_eq!(graph.degree("AVAL", SynapseClass::Chemical), 1);
    }

    #[tokio::test]
    async fn test_http_error_status_is_transport() {
        let server = serve(
            ResponseTemplate::new(200).set_body_string(NEURONS),
            ResponseTemplate::new(503),
        )
        .await;

        let err = loader_for(&server.uri()).load().await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, ConnectomeError::Transport { ref url, .. } if url.ends_with("/connectome.csv")));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        let err = loader_for("http://127.0.0.1:1").load().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_malformed_row_is_parse_error() {
        let server = serve(
            ResponseTemplate::new(200).set_body_string(NEURONS),
            ResponseTemplate::new(200).set_body_string("AVAL;AVAR;Send;lots;\n"),
        )
        .await;

        let err = loader_for(&server.uri()).load().await.unwrap_err();
        assert!(!err.is_transport());
        assert!(matches!(err, ConnectomeError::Parse { resource: "connectome", .. }));
    }

    #[test]
    fn test_source_key_covers_both_urls() {
        let loader = loader_for("http://data.example");
        assert_eq!(
            loader.source_key(),
            "http://data.example/neurons.csv|http://data.example/connectome.csv"
        );
    }
}
