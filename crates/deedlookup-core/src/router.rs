//! Jurisdiction routing: classify each address by the municipality
//! named in it and partition the input set.

use crate::model::Jurisdiction;

/// Return the first jurisdiction whose canonical name appears in the
/// address, case-insensitively, in [`Jurisdiction::ALL`] order.
pub fn classify(address: &str) -> Option<Jurisdiction> {
    let lowered = address.to_lowercase();
    Jurisdiction::ALL
        .into_iter()
        .find(|j| lowered.contains(&j.display_name().to_lowercase()))
}

/// Addresses partitioned by jurisdiction, plus the unmatched bucket.
///
/// Every input address appears in exactly one group, in input order.
/// Unmatched addresses are kept for observability but are never
/// dispatched to a strategy and never appear in the output.
#[derive(Debug, Default)]
pub struct JurisdictionGroups {
    groups: Vec<(Jurisdiction, Vec<String>)>,
    unknown: Vec<String>,
}

impl JurisdictionGroups {
    /// Partition the input addresses.
    pub fn group(addresses: &[String]) -> Self {
        let mut groups: Vec<(Jurisdiction, Vec<String>)> = Jurisdiction::ALL
            .into_iter()
            .map(|j| (j, Vec::new()))
            .collect();
        let mut unknown = Vec::new();
        for address in addresses {
            match classify(address) {
                Some(jurisdiction) => {
                    if let Some((_, bucket)) =
                        groups.iter_mut().find(|(j, _)| *j == jurisdiction)
                    {
                        bucket.push(address.clone());
                    }
                }
                None => unknown.push(address.clone()),
            }
        }
        JurisdictionGroups { groups, unknown }
    }

    /// Jurisdiction groups in fixed priority order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Jurisdiction, &[String])> {
        self.groups.iter().map(|(j, a)| (*j, a.as_slice()))
    }

    /// Addresses routed to one jurisdiction.
    pub fn addresses(&self, jurisdiction: Jurisdiction) -> &[String] {
        self.groups
            .iter()
            .find(|(j, _)| *j == jurisdiction)
            .map(|(_, a)| a.as_slice())
            .unwrap_or(&[])
    }

    /// Addresses that matched no supported jurisdiction.
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }
}
