//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use qtopo_core::{Circuit, CouplingMatrix};
use qtopo_search::GaConfig;

/// Where a coupling matrix came from.
#[derive(Debug)]
pub enum InputSource {
    /// Built from a decomposed circuit.
    Circuit { name: String, operations: usize },
    /// Given directly as `{"coupling_matrix": [[..]]}`.
    Matrix,
}

/// Load a coupling matrix from a circuit JSON or matrix JSON file.
pub fn load_coupling(path: &str) -> Result<(CouplingMatrix, InputSource)> {
    let source = read_file(path)?;
    parse_coupling(&source).with_context(|| format!("Invalid placement input: {path}"))
}

/// Parse placement input; an object with a `coupling_matrix` key is a
/// matrix, anything else must be a circuit.
pub fn parse_coupling(source: &str) -> Result<(CouplingMatrix, InputSource)> {
    let mut value: Value = serde_json::from_str(source).context("Malformed JSON")?;

    if let Some(matrix) = value.get_mut("coupling_matrix") {
        let matrix: CouplingMatrix = serde_json::from_value(matrix.take())?;
        return Ok((matrix, InputSource::Matrix));
    }

    let circuit: Circuit = serde_json::from_value(value).context("Not a circuit description")?;
    let matrix = CouplingMatrix::from_circuit(&circuit)?;
    Ok((
        matrix,
        InputSource::Circuit {
            name: circuit.name.clone(),
            operations: circuit.operations.len(),
        },
    ))
}

/// Load a search configuration from a YAML or JSON file.
pub fn load_config(path: &str) -> Result<GaConfig> {
    let source = read_file(path)?;
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let config = match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON configuration: {path}"))?,
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML configuration: {path}"))?,
    };
    Ok(config)
}

fn read_file(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}
