//! Per-jurisdiction retrieval strategies.
//!
//! Each jurisdiction exposes owner data through a different mechanism:
//! two server-rendered tax portals, a JavaScript-driven property
//! search, and a downloadable assessment roll. The [`SourceStrategy`]
//! trait unifies them behind a single lookup capability with shared
//! partial-failure semantics: no I/O error escapes a strategy, every
//! outcome is a [`ResolutionResult`].

mod browser;
mod form_portal;
mod spreadsheet;

pub use browser::BrowserSearchStrategy;
pub use form_portal::FormPortalStrategy;
pub use spreadsheet::{AssessmentRoll, SpreadsheetLookupStrategy};

use std::time::Duration;

use async_trait::async_trait;

use crate::model::ResolutionResult;

/// A jurisdiction-specific procedure for turning an address into an
/// owner name.
#[async_trait]
pub trait SourceStrategy: Send + Sync {
    /// Human-readable name of the portal or dataset, recorded in every
    /// result this strategy produces.
    fn source_name(&self) -> &'static str;

    /// Resolve one address. Failures are converted into
    /// `status = error` results at this boundary.
    async fn resolve(&self, address: &str) -> ResolutionResult;

    /// Delay the orchestrator inserts between successive lookups, for
    /// rate-sensitive sources.
    fn pacing(&self) -> Option<Duration> {
        None
    }

    /// Release any session held across the group. Called on every exit
    /// path, including cancellation.
    async fn close(&self) {}
}
