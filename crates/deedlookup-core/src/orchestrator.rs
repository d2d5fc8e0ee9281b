//! Run orchestration: route addresses to jurisdiction strategies and
//! collect a uniform result set.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::http::RetryingHttpClient;
use crate::model::Jurisdiction;
use crate::report::ResultSet;
use crate::router::JurisdictionGroups;
use crate::strategy::{
    BrowserSearchStrategy, FormPortalStrategy, SourceStrategy, SpreadsheetLookupStrategy,
};

/// Drives one resolution run: grouping, strategy dispatch, result
/// collection. Processing is strictly sequential, one jurisdiction
/// group at a time and one address at a time, as a courtesy to the
/// small municipal servers on the other end.
pub struct Orchestrator {
    config: ResolverConfig,
    http: Arc<RetryingHttpClient>,
}

impl Orchestrator {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let http = Arc::new(RetryingHttpClient::new(
            config.request_timeout,
            config.retry.clone(),
        )?);
        Ok(Orchestrator { config, http })
    }

    fn strategy_for(&self, jurisdiction: Jurisdiction) -> Box<dyn SourceStrategy> {
        match jurisdiction {
            Jurisdiction::Clarkstown => Box::new(FormPortalStrategy::new(
                "Clarkstown Tax Search",
                self.config.clarkstown_portal_url.clone(),
                Arc::clone(&self.http),
            )),
            Jurisdiction::Orangetown => Box::new(FormPortalStrategy::new(
                "Orangetown Tax Search",
                self.config.orangetown_portal_url.clone(),
                Arc::clone(&self.http),
            )),
            Jurisdiction::Ramapo => Box::new(BrowserSearchStrategy::new(
                self.config.ramapo_search_url.clone(),
                self.config.webdriver_url.clone(),
                self.config.browser_wait,
                self.config.inter_request_delay,
            )),
            Jurisdiction::StonyPoint => Box::new(SpreadsheetLookupStrategy::new(
                self.config.stony_point_roll_url.clone(),
                self.config.roll_cache_path.clone(),
                Arc::clone(&self.http),
            )),
        }
    }

    /// Resolve every routable address and return the collected set.
    ///
    /// Systemic per-group failures surface as `status = error` results;
    /// the run always proceeds to the remaining groups. Cancellation
    /// abandons outstanding lookups promptly and returns whatever has
    /// been collected so far for flushing.
    pub async fn run(&self, addresses: &[String], cancel: &CancellationToken) -> ResultSet {
        let groups = JurisdictionGroups::group(addresses);
        if !groups.unknown().is_empty() {
            info!(
                "{} addresses matched no supported jurisdiction; skipping them",
                groups.unknown().len()
            );
        }

        let mut results = ResultSet::new();
        for (jurisdiction, group) in groups.iter() {
            if group.is_empty() {
                continue;
            }
            info!("processing {} addresses for {}", group.len(), jurisdiction);
            let strategy = self.strategy_for(jurisdiction);
            let cancelled = drive_group(strategy.as_ref(), group, cancel, &mut results).await;
            // The session (if any) is released on every exit path.
            strategy.close().await;
            if cancelled {
                warn!("run cancelled; flushing {} collected results", results.len());
                break;
            }
        }
        results
    }
}

async fn drive_group(
    strategy: &dyn SourceStrategy,
    group: &[String],
    cancel: &CancellationToken,
    results: &mut ResultSet,
) -> bool {
    for (idx, address) in group.iter().enumerate() {
        if idx > 0 {
            if let Some(delay) = strategy.pacing() {
                tokio::select! {
                    _ = cancel.cancelled() => return true,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
        tokio::select! {
            _ = cancel.cancelled() => return true,
            result = strategy.resolve(address) => results.push(result),
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::model::{ResolutionResult, ResolutionStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingStrategy {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SourceStrategy for CountingStrategy {
        fn source_name(&self) -> &'static str {
            "Counting"
        }

        async fn resolve(&self, address: &str) -> ResolutionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ResolutionResult::from_lookup(address, Some("Owner".to_string()), "Counting")
        }
    }

    fn local_config() -> ResolverConfig {
        ResolverConfig {
            clarkstown_portal_url: "http://127.0.0.1:9/clarkstown".to_string(),
            orangetown_portal_url: "http://127.0.0.1:9/orangetown".to_string(),
            ramapo_search_url: "http://127.0.0.1:9/ramapo".to_string(),
            webdriver_url: "http://127.0.0.1:9".to_string(),
            stony_point_roll_url: "http://127.0.0.1:9/roll.xlsx".to_string(),
            roll_cache_path: std::env::temp_dir().join("deedlookup-orch-test-roll.xlsx"),
            request_timeout: Duration::from_secs(2),
            retry: RetryPolicy {
                max_attempts: 1,
                base_delay: Duration::from_millis(1),
                ..RetryPolicy::default()
            },
            browser_wait: Duration::from_millis(100),
            inter_request_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_drive_group_resolves_all_in_order() {
        let strategy = CountingStrategy {
            calls: AtomicUsize::new(0),
        };
        let group = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let cancel = CancellationToken::new();
        let mut results = ResultSet::new();

        let cancelled = drive_group(&strategy, &group, &cancel, &mut results).await;
        assert!(!cancelled);
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 3);
        let addresses: Vec<&str> = results.results().iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_drive_group_stops_when_cancelled() {
        let strategy = CountingStrategy {
            calls: AtomicUsize::new(0),
        };
        let group = vec!["a".to_string(), "b".to_string()];
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut results = ResultSet::new();

        let cancelled = drive_group(&strategy, &group, &cancel, &mut results).await;
        assert!(cancelled);
        assert!(results.is_empty());
        assert_eq!(strategy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dead_browser_group_degrades_without_pacing() {
        // Once the WebDriver connect has failed, the remaining
        // addresses report errors immediately; the inter-request delay
        // only applies to lookups that actually reach the site.
        let config = ResolverConfig {
            inter_request_delay: Duration::from_millis(500),
            ..local_config()
        };
        let orchestrator = Orchestrator::new(config).unwrap();
        let cancel = CancellationToken::new();

        let input = vec![
            "7 Pine Ave, Ramapo".to_string(),
            "9 Oak St, Ramapo".to_string(),
            "11 Maple Ct, Ramapo".to_string(),
        ];
        let started = std::time::Instant::now();
        let results = orchestrator.run(&input, &cancel).await;
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 3);
        assert!(results
            .results()
            .iter()
            .all(|r| r.status == ResolutionStatus::Error));
        assert!(
            elapsed < Duration::from_millis(400),
            "failed group must not sleep between addresses, took {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_unknown_addresses_are_never_resolved() {
        let orchestrator = Orchestrator::new(local_config()).unwrap();
        let cancel = CancellationToken::new();

        let results = orchestrator
            .run(&["45 Elm Rd, Nowhere".to_string()], &cancel)
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_failing_group_does_not_abort_run() {
        // Every source is unreachable; each routed address still gets a
        // result and the run completes.
        let orchestrator = Orchestrator::new(local_config()).unwrap();
        let cancel = CancellationToken::new();

        let input = vec![
            "123 Main St, Clarkstown, NY".to_string(),
            "7 Pine Ave, Ramapo".to_string(),
            "45 Elm Rd, Nowhere".to_string(),
        ];
        let results = orchestrator.run(&input, &cancel).await;

        assert_eq!(results.len(), 2);
        assert!(results
            .results()
            .iter()
            .all(|r| r.status == ResolutionStatus::Error));
        // Groups are processed in fixed priority order.
        assert_eq!(results.results()[0].source, "Clarkstown Tax Search");
        assert_eq!(results.results()[1].source, "Ramapo Property Search");
    }
}
