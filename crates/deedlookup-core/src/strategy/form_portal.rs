//! Form-portal strategy: tax portals that answer a plain form-encoded
//! POST with a server-rendered HTML result table.
//!
//! Clarkstown and Orangetown share this shape with different endpoints.
//! The portal markup is contractually fragile; a missing label or cell
//! is a clean negative, never a crash.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::error;

use super::SourceStrategy;
use crate::address::split_house_number;
use crate::http::RetryingHttpClient;
use crate::model::ResolutionResult;

pub struct FormPortalStrategy {
    source: &'static str,
    portal_url: String,
    http: Arc<RetryingHttpClient>,
}

impl FormPortalStrategy {
    pub fn new(
        source: &'static str,
        portal_url: impl Into<String>,
        http: Arc<RetryingHttpClient>,
    ) -> Self {
        FormPortalStrategy {
            source,
            portal_url: portal_url.into(),
            http,
        }
    }
}

/// Extract the owner name from a portal response: the trimmed text of
/// the `<td>` following the one whose text contains "Owner Name"
/// (case-insensitive). `None` when the label or the adjacent cell is
/// absent.
pub(crate) fn parse_owner_cell(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    for row in document.select(&row_selector) {
        let cells: Vec<_> = row.select(&cell_selector).collect();
        let Some(label_pos) = cells.iter().position(|cell| {
            cell.text()
                .collect::<String>()
                .to_lowercase()
                .contains("owner name")
        }) else {
            continue;
        };
        if let Some(owner_cell) = cells.get(label_pos + 1) {
            let owner = owner_cell.text().collect::<String>().trim().to_string();
            if !owner.is_empty() {
                return Some(owner);
            }
        }
    }
    None
}

#[async_trait]
impl SourceStrategy for FormPortalStrategy {
    fn source_name(&self) -> &'static str {
        self.source
    }

    async fn resolve(&self, address: &str) -> ResolutionResult {
        let (number, street) = split_house_number(address);
        let fields = [("house_number", number), ("street", street)];
        match self.http.post_form(&self.portal_url, &fields).await {
            Ok(body) => ResolutionResult::from_lookup(address, parse_owner_cell(&body), self.source),
            Err(err) => {
                error!("{}: error fetching {} -> {}", self.source, address, err);
                ResolutionResult::error(address, self.source)
            }
        }
    }
}
