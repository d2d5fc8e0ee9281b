//! Browser-search strategy: a property-search page that only answers
//! through a JavaScript-driven UI, driven over WebDriver.
//!
//! One session is reused across the whole jurisdiction group to
//! amortize startup cost. A failed session start is remembered: every
//! remaining address in the group degrades to `status = error` without
//! further connection attempts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use tokio::sync::Mutex;
use tracing::{error, warn};

use super::SourceStrategy;
use crate::address::split_house_number;
use crate::error::{ResolveError, Result};
use crate::model::ResolutionResult;

const SOURCE: &str = "Ramapo Property Search";

enum Session {
    Unopened,
    Ready(Client),
    Failed,
    Closed,
}

pub struct BrowserSearchStrategy {
    search_url: String,
    webdriver_url: String,
    wait: Duration,
    delay: Duration,
    session: Mutex<Session>,
    // Set once the session start has failed, so pacing can be skipped
    // for the rest of the group.
    session_failed: AtomicBool,
}

impl BrowserSearchStrategy {
    pub fn new(
        search_url: impl Into<String>,
        webdriver_url: impl Into<String>,
        wait: Duration,
        delay: Duration,
    ) -> Self {
        BrowserSearchStrategy {
            search_url: search_url.into(),
            webdriver_url: webdriver_url.into(),
            wait,
            delay,
            session: Mutex::new(Session::Unopened),
            session_failed: AtomicBool::new(false),
        }
    }

    async fn search(&self, client: &mut Client, address: &str) -> Result<Option<String>> {
        let (number, street) = split_house_number(address);

        client
            .goto(&self.search_url)
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;
        client
            .find(Locator::Css("input[name=houseNumber]"))
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?
            .send_keys(number)
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;
        client
            .find(Locator::Css("input[name=streetName]"))
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?
            .send_keys(street)
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;
        client
            .find(Locator::XPath("//*[normalize-space(text())='Search']"))
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?
            .click()
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;

        client
            .wait()
            .at_most(self.wait)
            .for_element(Locator::XPath("//td[contains(text(), 'Owner')]"))
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;

        let owner = client
            .find(Locator::XPath(
                "//td[contains(text(), 'Owner')]/following-sibling::td",
            ))
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?
            .text()
            .await
            .map_err(|e| ResolveError::Browser(e.to_string()))?;

        let owner = owner.trim().to_string();
        Ok((!owner.is_empty()).then_some(owner))
    }
}

#[async_trait]
impl SourceStrategy for BrowserSearchStrategy {
    fn source_name(&self) -> &'static str {
        SOURCE
    }

    async fn resolve(&self, address: &str) -> ResolutionResult {
        let mut session = self.session.lock().await;
        if matches!(*session, Session::Unopened) {
            *session = match ClientBuilder::rustls().connect(&self.webdriver_url).await {
                Ok(client) => Session::Ready(client),
                Err(err) => {
                    error!(
                        "unable to start browser session at {}: {}",
                        self.webdriver_url, err
                    );
                    self.session_failed.store(true, Ordering::SeqCst);
                    Session::Failed
                }
            };
        }
        let client = match &mut *session {
            Session::Ready(client) => client,
            _ => return ResolutionResult::error(address, SOURCE),
        };

        match self.search(client, address).await {
            Ok(owner) => ResolutionResult::from_lookup(address, owner, SOURCE),
            Err(err) => {
                // One bad lookup does not end the session; the next
                // address gets a fresh navigation.
                error!("{} search error for {}: {}", SOURCE, address, err);
                ResolutionResult::error(address, SOURCE)
            }
        }
    }

    fn pacing(&self) -> Option<Duration> {
        // A failed group makes no external calls; do not pace it.
        if self.session_failed.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.delay)
    }

    async fn close(&self) {
        let mut session = self.session.lock().await;
        if let Session::Ready(client) = std::mem::replace(&mut *session, Session::Closed) {
            if let Err(err) = client.close().await {
                warn!("error closing browser session: {}", err);
            }
        }
    }
}
