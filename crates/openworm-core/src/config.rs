//! Configuration management for the OpenWorm data sources.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (OPENWORM__ prefix, `__` as the section separator)
//! 2. Config file (openworm.toml)
//! 3. Defaults

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::CoreError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenWormConfig {
    #[serde(default)]
    pub connectome: ConnectomeConfig,

    #[serde(default)]
    pub semantic: SemanticConfig,
}

/// Where the connectivity graph's two tabular resources live.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectomeConfig {
    /// Neuron registry (name; description).
    #[serde(default = "default_neurons_url")]
    pub neurons_url: String,

    /// Connectome edge list (source; target; synapse; weight; neurotransmitter).
    #[serde(default = "default_connectome_url")]
    pub connectome_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ConnectomeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the statement store's relational source lives, and how its
/// relation codes map onto the fixed queries.
#[derive(Debug, Clone, Deserialize)]
pub struct SemanticConfig {
    /// SQLite database file, opened read-only.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base IRI that entity ids and relation codes are appended to.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Relation code for "is a".
    #[serde(default = "default_is_a_relation")]
    pub is_a_relation: u64,

    /// Relation code for "has receptor".
    #[serde(default = "default_receptor_relation")]
    pub receptor_relation: u64,

    /// Relation code linking a neuron to a neighbor entity, if the database has one.
    #[serde(default)]
    pub neighbor_relation: Option<u64>,

    /// Relation code linking an entity to its evidence (a DOI label), if the
    /// database has one.
    #[serde(default)]
    pub reference_relation: Option<u64>,
}

fn default_neurons_url() -> String {
    "https://raw.github.com/openworm/data-viz/master/HivePlots/neurons.csv".to_string()
}

fn default_connectome_url() -> String {
    "https://raw.github.com/openworm/data-viz/master/HivePlots/connectome.csv".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db/celegans.db")
}

fn default_namespace() -> String {
    "http://openworm.org/entities/".to_string()
}

fn default_is_a_relation() -> u64 {
    1515
}

fn default_receptor_relation() -> u64 {
    361
}

impl Default for ConnectomeConfig {
    fn default() -> Self {
        Self {
            neurons_url: default_neurons_url(),
            connectome_url: default_connectome_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            namespace: default_namespace(),
            is_a_relation: default_is_a_relation(),
            receptor_relation: default_receptor_relation(),
            neighbor_relation: None,
            reference_relation: None,
        }
    }
}

impl OpenWormConfig {
    /// Load configuration from `{file_prefix}.toml` (optional) and
    /// `OPENWORM__` environment variables.
    pub fn load(file_prefix: &str) -> Result<Self, CoreError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("OPENWORM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = cfg.try_deserialize()?;
        tracing::debug!(
            neurons_url = %loaded.connectome.neurons_url,
            connectome_url = %loaded.connectome.connectome_url,
            db_path = %loaded.semantic.db_path.display(),
            "Loaded configuration"
        );
        Ok(loaded)
    }
}
