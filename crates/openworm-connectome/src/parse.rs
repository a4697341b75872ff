//! Parsing of the HivePlots delimited tables.
//!
//! Both tables use `;` as the field delimiter and `|` as the quote character,
//! with no header row. Blank lines are ignored.

use csv::{ReaderBuilder, StringRecord};

use openworm_core::NeuronType;

use crate::error::{ConnectomeError, Result};

const NEURONS: &str = "neurons";
const CONNECTOME: &str = "connectome";

/// A row of the neuron registry.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronRow {
    pub name: String,
    pub neuron_type: NeuronType,
}

/// A row of the connectome edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct SynapseRow {
    pub source: String,
    pub target: String,
    pub synapse: String,
    pub weight: f64,
    pub neurotransmitter: String,
}

/// Parse the neuron registry: `name;description`.
///
/// Rows with an empty name are skipped.
pub fn parse_neurons(text: &str) -> Result<Vec<NeuronRow>> {
    let mut rows = Vec::new();
    for_each_record(text, NEURONS, |record, line| {
        let (name, description) = match (record.get(0), record.get(1)) {
            (Some(name), Some(description)) => (name, description),
            _ => return Err(too_few_columns(NEURONS, line, 2, record.len())),
        };
        if !name.is_empty() {
            rows.push(NeuronRow {
                name: name.to_string(),
                neuron_type: NeuronType::classify(description),
            });
        }
        Ok(())
    })?;
    Ok(rows)
}

/// Parse the connectome edge list:
/// `source;target;synapse;weight;neurotransmitter`.
pub fn parse_connectome(text: &str) -> Result<Vec<SynapseRow>> {
    let mut rows = Vec::new();
    for_each_record(text, CONNECTOME, |record, line| {
        if record.len() < 5 {
            return Err(too_few_columns(CONNECTOME, line, 5, record.len()));
        }
        let raw_weight = record[3].trim();
        let weight = raw_weight
            .parse::<f64>()
            .map_err(|_| ConnectomeError::Parse {
                resource: CONNECTOME,
                line,
                message: format!("non-numeric weight {raw_weight:?}"),
            })?;
        rows.push(SynapseRow {
            source: record[0].to_string(),
            target: record[1].to_string(),
            synapse: record[2].to_string(),
            weight,
            neurotransmitter: record[4].to_string(),
        });
        Ok(())
    })?;
    Ok(rows)
}

fn for_each_record<F>(text: &str, resource: &'static str, mut f: F) -> Result<()>
where
    F: FnMut(&StringRecord, u64) -> Result<()>,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'|')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    for result in reader.records() {
        let record = result.map_err(|e| ConnectomeError::Parse {
            resource,
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        f(&record, line)?;
    }
    Ok(())
}

fn too_few_columns(resource: &'static str, line: u64, expected: usize, found: usize) -> ConnectomeError {
    ConnectomeError::Parse {
        resource,
        line,
        message: format!("expected at least {expected} columns, found {found}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_neurons_classifies_and_skips_empty_names() {
        let text = "ADAL;Ring interneuron\n;orphan description\nASHL;|Amphid sensory; nociceptive|\nVA1;\n";
        let rows = parse_neurons(text).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "ADAL");
        assert_eq!(rows[0].neuron_type.label(), "interneuron");
        assert_eq!(rows[1].name, "ASHL");
        assert_eq!(rows[1].neuron_type.label(), "sensory");
        assert_eq!(rows[2].name, "VA1");
        assert!(rows[2].neuron_type.is_unknown());
    }

    #[test]
    fn test_parse_neurons_ignores_blank_lines() {
        let rows = parse_neurons("AVAL;interneuron\n\n\nAVAR;interneuron\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_neurons_rejects_single_column_row() {
        let err = parse_neurons("AVAL;interneuron\nAVAR\n").unwrap_err();
        match err {
            ConnectomeError::Parse { resource, line, .. } => {
                assert_eq!(resource, "neurons");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_connectome_rows() {
        let text = "AVAL;AVAR;GapJunction;2;\nAVAL;DA1;Send;4.5;Acetylcholine\n";
        let rows = parse_connectome(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].synapse, "GapJunction");
        assert_eq!(rows[0].weight, 2.0);
        assert_eq!(rows[0].neurotransmitter, "");
        assert_eq!(rows[1].target, "DA1");
        assert_eq!(rows[1].weight, 4.5);
        assert_eq!(rows[1].neurotransmitter, "Acetylcholine");
    }

    #[test]
    fn test_parse_connectome_rejects_non_numeric_weight() {
        let err = parse_connectome("AVAL;AVAR;Send;many;Glutamate\n").unwrap_err();
        assert!(matches!(
            err,
            ConnectomeError::Parse { resource: "connectome", line: 1, .. }
        ));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_parse_connectome_rejects_short_row() {
        let err = parse_connectome("AVAL;AVAR;Send;1;Glutamate\nAVAL;AVAR;Send\n").unwrap_err();
        assert!(matches!(err, ConnectomeError::Parse { line: 2, .. }));
    }
}
