//! Core data model: jurisdictions and per-address resolution outcomes.

use serde::{Deserialize, Serialize};

/// One of the four supported municipalities, each with its own
/// data-access method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Clarkstown,
    Orangetown,
    Ramapo,
    StonyPoint,
}

impl Jurisdiction {
    /// Fixed priority order for routing. Classification tests each
    /// jurisdiction in this order and the first match wins.
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::Clarkstown,
        Jurisdiction::Orangetown,
        Jurisdiction::Ramapo,
        Jurisdiction::StonyPoint,
    ];

    /// Canonical display name, also the substring matched against
    /// incident addresses during routing.
    pub fn display_name(&self) -> &'static str {
        match self {
            Jurisdiction::Clarkstown => "Clarkstown",
            Jurisdiction::Orangetown => "Orangetown",
            Jurisdiction::Ramapo => "Ramapo",
            Jurisdiction::StonyPoint => "Stony Point",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome taxonomy for a single address lookup.
///
/// Exhaustive and mutually exclusive: a lookup either produced an owner
/// name, completed cleanly without a match, or could not be completed
/// (network failure, missing runtime dependency, parse failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Success,
    NotFound,
    Error,
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResolutionStatus::Success => "success",
            ResolutionStatus::NotFound => "not_found",
            ResolutionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// The uniform per-address output record.
///
/// Invariant: `status == Success` iff `owner_name` is present and
/// non-empty. Build results through [`ResolutionResult::from_lookup`]
/// and [`ResolutionResult::error`] rather than by hand so the invariant
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub address: String,
    pub owner_name: Option<String>,
    /// Human-readable name of the portal or dataset that answered.
    pub source: String,
    pub status: ResolutionStatus,
}

impl ResolutionResult {
    /// Build a result from a completed lookup: a non-empty owner name
    /// is a success, anything else is a clean negative.
    pub fn from_lookup(address: &str, owner_name: Option<String>, source: &str) -> Self {
        let owner_name = owner_name.filter(|o| !o.trim().is_empty());
        let status = if owner_name.is_some() {
            ResolutionStatus::Success
        } else {
            ResolutionStatus::NotFound
        };
        ResolutionResult {
            address: address.to_string(),
            owner_name,
            source: source.to_string(),
            status,
        }
    }

    /// Build a result for a lookup that could not be completed.
    pub fn error(address: &str, source: &str) -> Self {
        ResolutionResult {
            address: address.to_string(),
            owner_name: None,
            source: source.to_string(),
            status: ResolutionStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_with_owner_is_success() {
        let r = ResolutionResult::from_lookup("123 Main St", Some("J. Smith".to_string()), "Test");
        assert_eq!(r.status, ResolutionStatus::Success);
        assert_eq!(r.owner_name.as_deref(), Some("J. Smith"));
    }

    #[test]
    fn test_from_lookup_without_owner_is_not_found() {
        let r = ResolutionResult::from_lookup("123 Main St", None, "Test");
        assert_eq!(r.status, ResolutionStatus::NotFound);
        assert!(r.owner_name.is_none());
    }

    #[test]
    fn test_from_lookup_blank_owner_is_not_found() {
        let r = ResolutionResult::from_lookup("123 Main St", Some("   ".to_string()), "Test");
        assert_eq!(r.status, ResolutionStatus::NotFound);
        assert!(r.owner_name.is_none(), "blank owner must not surface");
    }

    #[test]
    fn test_error_result_has_no_owner() {
        let r = ResolutionResult::error("123 Main St", "Test");
        assert_eq!(r.status, ResolutionStatus::Error);
        assert!(r.owner_name.is_none());
    }

    #[test]
    fn test_serde_shape() {
        let r = ResolutionResult::error("45 Elm Rd", "Ramapo Property Search");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["address"], "45 Elm Rd");
        assert_eq!(json["owner_name"], serde_json::Value::Null);
        assert_eq!(json["status"], "error");

        let ok = ResolutionResult::from_lookup("1 Oak St", Some("A. Jones".to_string()), "Test");
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");

        let miss = ResolutionResult::from_lookup("1 Oak St", None, "Test");
        let json = serde_json::to_value(&miss).unwrap();
        assert_eq!(json["status"], "not_found");
    }

    #[test]
    fn test_jurisdiction_display_names() {
        assert_eq!(Jurisdiction::StonyPoint.display_name(), "Stony Point");
        assert_eq!(Jurisdiction::ALL.len(), 4);
    }
}
