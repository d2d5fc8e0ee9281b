//! Input-file loading for the orchestration entry point.
//!
//! Accepts either a JSON array of address-bearing records (each
//! element's `address` field is read) or a CSV file with an `address`
//! column. Malformed or absent address values are treated as empty
//! strings and filtered out before grouping.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{ResolveError, Result};

/// Load incident addresses from a JSON or CSV file.
///
/// Empty addresses are dropped; an unrecognized file extension is the
/// one catastrophic input error surfaced to the caller.
pub fn load_addresses(path: &Path) -> Result<Vec<String>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let addresses = match ext.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => return Err(ResolveError::UnsupportedInput(path.display().to_string())),
    };
    let addresses: Vec<String> = addresses
        .into_iter()
        .filter(|a| !a.trim().is_empty())
        .collect();
    info!("loaded {} addresses from {}", addresses.len(), path.display());
    Ok(addresses)
}

fn load_json(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    Ok(records
        .iter()
        .map(|record| {
            record
                .get("address")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect())
}

fn load_csv(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("address"));
    let Some(column) = column else {
        warn!("no address column in {}", path.display());
        return Ok(Vec::new());
    };
    let mut addresses = Vec::new();
    for record in reader.records() {
        let record = record?;
        addresses.push(record.get(column).unwrap_or_default().to_string());
    }
    Ok(addresses)
}
