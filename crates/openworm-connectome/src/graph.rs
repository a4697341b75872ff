//! In-memory directed connectivity graph.
//!
//! Nodes are neurons keyed by name; edges are synapses keyed by the ordered
//! pair (source, target). A second row for the same pair overwrites the
//! first edge's attributes rather than adding a parallel edge.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use openworm_core::types::Direction;
use openworm_core::{NeighborKind, NeuronType, SynapseClass};

use crate::parse::{NeuronRow, SynapseRow};

/// A neuron in the connectivity graph.
#[derive(Debug, Clone)]
pub struct NeuronNode {
    /// Dense index (0..N-1).
    pub index: usize,
    pub name: String,
    /// Registry classification. `None` for neurons that only appear as
    /// edge endpoints.
    pub neuron_type: Option<NeuronType>,
}

/// A directed synapse between two neurons.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    pub source_index: usize,
    pub target_index: usize,
    pub weight: f64,
    /// Raw synapse kind, e.g. "GapJunction" or "Send".
    pub synapse: String,
    pub neurotransmitter: String,
}

/// Summary counts for logging and reporting.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub untyped_nodes: usize,
    pub gap_junction_edges: usize,
    pub chemical_edges: usize,
}

/// The connectivity graph.
#[derive(Debug, Clone, Default)]
pub struct ConnectomeGraph {
    /// All nodes, indexed by dense index.
    pub nodes: Vec<NeuronNode>,
    /// `adjacency[i]` = outgoing synapses of node `i`.
    pub adjacency: Vec<Vec<Synapse>>,
    /// `incoming[i]` = (source index, position in `adjacency[source]`).
    incoming: Vec<Vec<(usize, usize)>>,
    /// Map from neuron name → dense index.
    pub node_index: HashMap<String, usize>,
    /// Map from (source, target) → position in `adjacency[source]`.
    edge_index: HashMap<(usize, usize), usize>,
}

impl ConnectomeGraph {
    /// Build from parsed registry and edge-list rows, in row order.
    pub fn from_rows(neurons: Vec<NeuronRow>, synapses: Vec<SynapseRow>) -> Self {
        let mut graph = Self::default();
        for row in neurons {
            graph.upsert_neuron(&row.name, row.neuron_type);
        }
        for row in synapses {
            graph.upsert_synapse(row);
        }
        graph
    }

    /// Add a neuron, or overwrite the type of an existing one.
    pub fn upsert_neuron(&mut self, name: &str, neuron_type: NeuronType) -> usize {
        let idx = self.ensure_node(name);
        self.nodes[idx].neuron_type = Some(neuron_type);
        idx
    }

    /// Add a synapse, or overwrite the attributes of the existing edge for the
    /// same ordered pair. Unknown endpoints are added as untyped nodes.
    pub fn upsert_synapse(&mut self, row: SynapseRow) {
        let src = self.ensure_node(&row.source);
        let tgt = self.ensure_node(&row.target);
        let synapse = Synapse {
            source_index: src,
            target_index: tgt,
            weight: row.weight,
            synapse: row.synapse,
            neurotransmitter: row.neurotransmitter,
        };

        match self.edge_index.get(&(src, tgt)) {
            Some(&pos) => self.adjacency[src][pos] = synapse,
            None => {
                let pos = self.adjacency[src].len();
                self.adjacency[src].push(synapse);
                self.incoming[tgt].push((src, pos));
                self.edge_index.insert((src, tgt), pos);
            }
        }
    }

    fn ensure_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(NeuronNode {
            index: idx,
            name: name.to_string(),
            neuron_type: None,
        });
        self.adjacency.push(Vec::new());
        self.incoming.push(Vec::new());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    pub fn node(&self, name: &str) -> Option<&NeuronNode> {
        self.node_index.get(name).map(|&idx| &self.nodes[idx])
    }

    /// The edge from `source` to `target`, if present.
    pub fn synapse(&self, source: &str, target: &str) -> Option<&Synapse> {
        let src = *self.node_index.get(source)?;
        let tgt = *self.node_index.get(target)?;
        self.edge_index
            .get(&(src, tgt))
            .map(|&pos| &self.adjacency[src][pos])
    }

    /// Incident synapses of `name` in the requested direction, outgoing first.
    /// A self-loop is reported once per direction.
    pub fn incident(&self, name: &str, direction: Direction) -> Vec<&Synapse> {
        let Some(&idx) = self.node_index.get(name) else {
            return Vec::new();
        };

        let mut edges = Vec::new();
        if matches!(direction, Direction::Outgoing | Direction::Both) {
            edges.extend(self.adjacency[idx].iter());
        }
        if matches!(direction, Direction::Incoming | Direction::Both) {
            edges.extend(
                self.incoming[idx]
                    .iter()
                    .map(|&(src, pos)| &self.adjacency[src][pos]),
            );
        }
        edges
    }

    /// Number of incoming plus outgoing synapses of `name` matching `class`.
    pub fn degree(&self, name: &str, class: SynapseClass) -> usize {
        self.incident(name, Direction::Both)
            .into_iter()
            .filter(|s| class.matches(&s.synapse))
            .count()
    }

    /// Names of the neurons connected to `name` by synapses selected by `kind`,
    /// deduplicated, in edge discovery order.
    pub fn neighbors(&self, name: &str, kind: NeighborKind) -> Vec<String> {
        let Some(&idx) = self.node_index.get(name) else {
            return Vec::new();
        };
        let class = kind.synapse_class();

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for synapse in self.incident(name, kind.direction()) {
            if let Some(class) = class {
                if !class.matches(&synapse.synapse) {
                    continue;
                }
            }
            let other = if synapse.source_index == idx {
                synapse.target_index
            } else {
                synapse.source_index
            };
            if seen.insert(other) {
                names.push(self.nodes[other].name.clone());
            }
        }
        names
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    pub fn stats(&self) -> GraphStats {
        let all_edges = || self.adjacency.iter().flatten();
        GraphStats {
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
            untyped_nodes: self.nodes.iter().filter(|n| n.neuron_type.is_none()).count(),
            gap_junction_edges: all_edges()
                .filter(|s| SynapseClass::GapJunction.matches(&s.synapse))
                .count(),
            chemical_edges: all_edges()
                .filter(|s| SynapseClass::Chemical.matches(&s.synapse))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neuron(name: &str, description: &str) -> NeuronRow {
        NeuronRow {
            name: name.to_string(),
            neuron_type: NeuronType::classify(description),
        }
    }

    fn synapse(source: &str, target: &str, kind: &str, weight: f64) -> SynapseRow {
        SynapseRow {
            source: source.to_string(),
            target: target.to_string(),
            synapse: kind.to_string(),
            weight,
            neurotransmitter: String::new(),
        }
    }

    fn sample_graph() -> ConnectomeGraph {
        ConnectomeGraph::from_rows(
            vec![
                neuron("AVAL", "Ring interneuron"),
                neuron("AVAR", "Ring interneuron"),
                neuron("DA1", "ventral cord motor neuron"),
                neuron("ASHL", "amphid sensory"),
            ],
            vec![
                synapse("AVAL", "AVAR", "GapJunction", 2.0),
                synapse("AVAR", "AVAL", "GapJunction", 2.0),
                synapse("AVAL", "DA1", "Send", 5.0),
                synapse("ASHL", "AVAL", "Send", 3.0),
                synapse("DA1", "AVAL", "GapJunction", 1.0),
            ],
        )
    }

    #[test]
    fn test_from_rows_basic() {
        let graph = sample_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.adjacency[0].len(), 2);
        assert_eq!(
            graph.node("DA1").unwrap().neuron_type.unwrap().label(),
            "motor"
        );
    }

    #[test]
    fn test_duplicate_neuron_row_overwrites_type() {
        let graph = ConnectomeGraph::from_rows(
            vec![neuron("RIAL", "unclassified"), neuron("RIAL", "interneuron")],
            vec![],
        );
        assert_eq!(graph.node_count(), 1);
        assert_eq!(
            graph.node("RIAL").unwrap().neuron_type.unwrap().label(),
            "interneuron"
        );
    }

    #[test]
    fn test_duplicate_edge_row_last_wins() {
        let mut rows = vec![synapse("AVAL", "AVAR", "Send", 1.0)];
        rows.push(SynapseRow {
            neurotransmitter: "Glutamate".to_string(),
            ..synapse("AVAL", "AVAR", "GapJunction", 7.0)
        });
        let graph = ConnectomeGraph::from_rows(vec![], rows);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.synapse("AVAL", "AVAR").unwrap();
        assert_eq!(edge.synapse, "GapJunction");
        assert_eq!(edge.weight, 7.0);
        assert_eq!(edge.neurotransmitter, "Glutamate");
        assert_eq!(graph.incident("AVAR", Direction::Incoming).len(), 1);
    }

    #[test]
    fn test_edge_with_unknown_endpoint_adds_untyped_node() {
        let graph = ConnectomeGraph::from_rows(
            vec![neuron("AVAL", "interneuron")],
            vec![synapse("AVAL", "M4", "Send", 1.0)],
        );
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node("M4").unwrap().neuron_type.is_none());
        assert_eq!(graph.stats().untyped_nodes, 1);
    }

    #[test]
    fn test_degrees() {
        let graph = sample_graph();
        assert_eq!(graph.degree("AVAL", SynapseClass::GapJunction), 3);
        assert_eq!(graph.degree("AVAL", SynapseClass::Chemical), 2);
        assert_eq!(graph.degree("ASHL", SynapseClass::GapJunction), 0);
        assert_eq!(graph.degree("NOPE", SynapseClass::Chemical), 0);
    }

    #[test]
    fn test_self_loop_counted_in_both_directions() {
        let graph = ConnectomeGraph::from_rows(vec![], vec![synapse("PVT", "PVT", "Send", 1.0)]);
        assert_eq!(graph.degree("PVT", SynapseClass::Chemical), 2);
        assert_eq!(graph.neighbors("PVT", NeighborKind::All), vec!["PVT"]);
    }

    #[test]
    fn test_neighbors_by_kind() {
        let graph = sample_graph();
        assert_eq!(
            graph.neighbors("AVAL", NeighborKind::All),
            vec!["AVAR", "DA1", "ASHL"]
        );
        assert_eq!(
            graph.neighbors("AVAL", NeighborKind::GapJunctionOnly),
            vec!["AVAR", "DA1"]
        );
        assert_eq!(
            graph.neighbors("AVAL", NeighborKind::AllChemicalSynapses),
            vec!["DA1", "ASHL"]
        );
        assert_eq!(
            graph.neighbors("AVAL", NeighborKind::IncomingChemicalSynapses),
            vec!["ASHL"]
        );
        assert_eq!(
            graph.neighbors("AVAL", NeighborKind::OutgoingChemicalSynapses),
            vec!["DA1"]
        );
        assert!(graph.neighbors("NOPE", NeighborKind::All).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = sample_graph().stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 5);
        assert_eq!(stats.gap_junction_edges, 3);
        assert_eq!(stats.chemical_edges, 2);
        assert_eq!(stats.untyped_nodes, 0);
    }
}
