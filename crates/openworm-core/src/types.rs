//! Core domain types shared by the connectome, semantic, and neuron crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Neuron Type ───────────────────────────────────────────────────

/// Functional type of a neuron, classified from its registry description.
///
/// A description may mention more than one category, in which case every
/// matching flag is set and the label is the concatenation in the fixed order
/// sensory, motor, interneuron (e.g. "sensorymotor").
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NeuronType {
    pub sensory: bool,
    pub motor: bool,
    pub interneuron: bool,
}

impl NeuronType {
    /// Classify a free-text description by case-insensitive keyword search.
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        Self {
            sensory: lower.contains("sensory"),
            motor: lower.contains("motor"),
            interneuron: lower.contains("interneuron"),
        }
    }

    /// True when no category keyword matched.
    pub fn is_unknown(&self) -> bool {
        !(self.sensory || self.motor || self.interneuron)
    }

    /// The compound label, or "unknown" when nothing matched.
    pub fn label(&self) -> String {
        if self.is_unknown() {
            return "unknown".to_string();
        }
        let mut label = String::new();
        if self.sensory {
            label.push_str("sensory");
        }
        if self.motor {
            label.push_str("motor");
        }
        if self.interneuron {
            label.push_str("interneuron");
        }
        label
    }
}

impl fmt::Display for NeuronType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ── Synapses ──────────────────────────────────────────────────────

/// Marker substring identifying an electrical (gap junction) synapse.
pub const GAP_JUNCTION_MARKER: &str = "GapJunction";

/// Marker substring identifying a chemical synapse.
pub const CHEMICAL_MARKER: &str = "Send";

/// Classification of connectome edges by their synapse kind string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SynapseClass {
    GapJunction,
    Chemical,
}

impl SynapseClass {
    /// Substring match against a raw synapse kind, e.g. "GapJunction" or "Send".
    pub fn matches(&self, synapse: &str) -> bool {
        match self {
            Self::GapJunction => synapse.contains(GAP_JUNCTION_MARKER),
            Self::Chemical => synapse.contains(CHEMICAL_MARKER),
        }
    }
}

/// Which incident edges of a node to traverse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
    Both,
}

// ── Selectors ─────────────────────────────────────────────────────

/// Which neighbors to list for a neuron.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NeighborKind {
    /// Every neighbor, any synapse kind, either direction.
    All,
    GapJunctionOnly,
    AllChemicalSynapses,
    IncomingChemicalSynapses,
    OutgoingChemicalSynapses,
}

impl NeighborKind {
    /// Legacy numeric selector: 0=all, 1=gap junctions, 2=all chemical,
    /// 3=incoming chemical, 4=outgoing chemical.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::All),
            1 => Some(Self::GapJunctionOnly),
            2 => Some(Self::AllChemicalSynapses),
            3 => Some(Self::IncomingChemicalSynapses),
            4 => Some(Self::OutgoingChemicalSynapses),
            _ => None,
        }
    }

    /// Synapse filter for this selector; `None` admits every edge.
    pub fn synapse_class(&self) -> Option<SynapseClass> {
        match self {
            Self::All => None,
            Self::GapJunctionOnly => Some(SynapseClass::GapJunction),
            Self::AllChemicalSynapses
            | Self::IncomingChemicalSynapses
            | Self::OutgoingChemicalSynapses => Some(SynapseClass::Chemical),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::IncomingChemicalSynapses => Direction::Incoming,
            Self::OutgoingChemicalSynapses => Direction::Outgoing,
            _ => Direction::Both,
        }
    }
}

impl FromStr for NeighborKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = s.parse::<u8>().ok().and_then(Self::from_code) {
            return Ok(kind);
        }
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "gap-junction" | "gap_junction" | "gap" => Ok(Self::GapJunctionOnly),
            "chemical" | "all-chemical" | "all_chemical" => Ok(Self::AllChemicalSynapses),
            "incoming-chemical" | "incoming_chemical" | "incoming" => {
                Ok(Self::IncomingChemicalSynapses)
            }
            "outgoing-chemical" | "outgoing_chemical" | "outgoing" => {
                Ok(Self::OutgoingChemicalSynapses)
            }
            _ => Err(CoreError::UnknownSelector {
                selector: "neighbor",
                value: s.to_string(),
            }),
        }
    }
}

/// What kind of association a reference is requested for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Receptor,
    Neighbor,
}

impl ReferenceKind {
    /// Legacy numeric selector: 0=receptor, 1=neighbor.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Receptor),
            1 => Some(Self::Neighbor),
            _ => None,
        }
    }
}

impl FromStr for ReferenceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = s.parse::<u8>().ok().and_then(Self::from_code) {
            return Ok(kind);
        }
        match s.to_lowercase().as_str() {
            "receptor" => Ok(Self::Receptor),
            "neighbor" => Ok(Self::Neighbor),
            _ => Err(CoreError::UnknownSelector {
                selector: "reference",
                value: s.to_string(),
            }),
        }
    }
}
