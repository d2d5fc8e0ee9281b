//! Run output: accumulate per-address outcomes and persist them as a
//! single JSON artifact.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::model::ResolutionResult;

/// The ordered sequence of all results for one run.
///
/// Created fresh per run and written out exactly once; never merged
/// with the output of prior runs.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<ResolutionResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, logging the one-line summary for the address.
    pub fn push(&mut self, result: ResolutionResult) {
        info!(
            "{} -> {} ({})",
            result.address,
            result.owner_name.as_deref().unwrap_or("-"),
            result.status
        );
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = ResolutionResult>) {
        for result in results {
            self.push(result);
        }
    }

    pub fn results(&self) -> &[ResolutionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Write the full result set as one pretty-printed JSON document.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_string_pretty(&self.results)?;
        std::fs::write(path, body)?;
        info!("wrote {} results to {}", self.results.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResolutionStatus;

    #[test]
    fn test_write_json_round_trips() {
        let mut set = ResultSet::new();
        set.push(ResolutionResult::from_lookup(
            "123 Main St, Clarkstown, NY",
            Some("J. Smith".to_string()),
            "Clarkstown Tax Search",
        ));
        set.push(ResolutionResult::error(
            "7 Pine Ave, Ramapo",
            "Ramapo Property Search",
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owner_names.json");
        set.write_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ResolutionResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, set.results());
        assert_eq!(parsed[0].status, ResolutionStatus::Success);
        assert_eq!(parsed[1].status, ResolutionStatus::Error);
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut set = ResultSet::new();
        set.extend(vec![
            ResolutionResult::error("a", "s"),
            ResolutionResult::error("b", "s"),
            ResolutionResult::error("c", "s"),
        ]);
        let addresses: Vec<&str> = set.results().iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_set_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owner_names.json");
        ResultSet::new().write_json(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
