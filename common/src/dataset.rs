//! Load the flight dataset from a JSON file.

use crate::FlightRecord;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse a dataset: either a bare array of records or the
/// `{"flights_data": [...]}` envelope served by the flight listing.
///
/// # Errors
/// Fails on malformed JSON or on the first record that cannot be read.
pub fn parse_dataset(json: &str) -> Result<Vec<FlightRecord>> {
    let document: Value = serde_json::from_str(json).context("Dataset is not valid JSON")?;
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("flights_data") {
            Some(Value::Array(rows)) => rows,
            _ => bail!("Dataset object has no \"flights_data\" array"),
        },
        _ => bail!("Dataset must be a JSON array of flight records"),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).with_context(|| format!("Malformed flight record #{i}"))
        })
        .collect()
}

/// Read and parse the dataset at `path`.
///
/// # Errors
/// Fails if the file cannot be read or parsed.
pub fn load_dataset(path: &Path) -> Result<Vec<FlightRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let records =
        parse_dataset(&json).with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    log::info!("Loaded {} flight record(s) from {}", records.len(), path.display());
    Ok(records)
}
