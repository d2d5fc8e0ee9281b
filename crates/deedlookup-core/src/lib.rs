//! deedlookup Core Library
//!
//! Resolves street addresses from public-safety incident reports to the
//! property owner of record, by querying per-jurisdiction municipal
//! sources (tax portals, an interactive property search, a published
//! assessment roll) behind one strategy interface with uniform
//! partial-failure semantics.

pub mod address;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod model;
pub mod orchestrator;
pub mod report;
pub mod router;
pub mod strategy;
pub mod telemetry;

pub use config::{ResolverConfig, RetryPolicy};
pub use error::{ResolveError, Result};
pub use input::load_addresses;
pub use model::{Jurisdiction, ResolutionResult, ResolutionStatus};
pub use orchestrator::Orchestrator;
pub use report::ResultSet;
pub use router::{classify, JurisdictionGroups};
pub use strategy::{
    BrowserSearchStrategy, FormPortalStrategy, SourceStrategy, SpreadsheetLookupStrategy,
};
pub use telemetry::init_tracing;

/// deedlookup version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
