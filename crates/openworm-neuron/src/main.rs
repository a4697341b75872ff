//! CLI entry point for the openworm-neuron query tool.
//!
//! Answers one question about one neuron and writes the answer to stdout as
//! JSON. Logs go to stderr.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use openworm_core::{NeighborKind, OpenWormConfig, ReferenceKind};
use openworm_neuron::{DataSources, Neuron};

#[derive(Parser)]
#[command(name = "openworm-neuron")]
#[command(about = "Query a C. elegans neuron across the connectome and the statement store")]
struct Cli {
    /// Neuron name, e.g. AVAL.
    name: String,

    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: openworm).
    #[arg(short, long, default_value = "openworm", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Type from the connectivity graph, lower-cased.
    Type,
    /// Type from the statement store.
    TypeSemantic,
    /// Receptor labels from the statement store.
    Receptors,
    /// Gap-junction and chemical-synapse degree.
    Degree,
    /// Neighbor names.
    Neighbors {
        /// all, gap-junction, chemical, incoming, outgoing (or 0-4).
        #[arg(long, default_value = "all")]
        kind: NeighborKind,
    },
    /// Evidence URL for a receptor or neighbor association.
    Reference {
        /// receptor or neighbor (or 0-1).
        #[arg(long)]
        kind: ReferenceKind,
        /// Receptor or neighbor name.
        #[arg(long)]
        item: String,
    },
    /// Summary of both representations.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let config = OpenWormConfig::load(&cli.config)?;
    let sources = Arc::new(DataSources::shared(&config)?);
    let neuron = sources.neuron(cli.name.as_str());

    let output = run(&neuron, &sources, &cli.command).await?;
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

async fn run(
    neuron: &Neuron,
    sources: &DataSources,
    command: &Command,
) -> anyhow::Result<serde_json::Value> {
    let name = neuron.name();
    let value = match command {
        Command::Type => json!({ "name": name, "type": neuron.neuron_type().await? }),
        Command::TypeSemantic => {
            json!({ "name": name, "type": neuron.type_from_statements().await? })
        }
        Command::Receptors => json!({ "name": name, "receptors": neuron.receptors().await? }),
        Command::Degree => json!({
            "name": name,
            "gap_junction": neuron.gap_junction_degree().await?,
            "chemical": neuron.chemical_synapse_degree().await?,
        }),
        Command::Neighbors { kind } => json!({
            "name": name,
            "kind": kind,
            "neighbors": neuron.neighbors(*kind).await?,
        }),
        Command::Reference { kind, item } => json!({
            "name": name,
            "kind": kind,
            "item": item,
            "reference": neuron.reference(*kind, item).await?,
        }),
        Command::Stats => {
            let graph = sources.connectome().await?;
            let store = sources.statements().await?;
            json!({
                "connectome": graph.stats(),
                "connectome_built_at": sources.cache().connectome_built_at(&sources.connectome_key()),
                "statements": store.len(),
                "labels": store.label_count(),
                "fingerprint": store.fingerprint(),
                "statements_built_at": sources.cache().statements_built_at(&sources.statements_key()),
            })
        }
    };
    Ok(value)
}
