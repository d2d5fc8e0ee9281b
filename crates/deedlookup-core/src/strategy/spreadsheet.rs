//! Spreadsheet-lookup strategy: a published assessment roll downloaded
//! once per run and searched locally.
//!
//! Download or parse failure degrades the whole jurisdiction group to
//! `status = error`; the failed load is remembered and not re-attempted
//! within the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use calamine::{Data, Range, Reader};
use tokio::sync::OnceCell;
use tracing::{error, info};

use super::SourceStrategy;
use crate::error::{ResolveError, Result};
use crate::http::RetryingHttpClient;
use crate::model::ResolutionResult;

const SOURCE: &str = "Stony Point Assessment Roll";

#[derive(Debug)]
struct RollRow {
    address: String,
    owner: String,
}

/// In-memory assessment roll: the address and owner columns of the
/// published spreadsheet.
#[derive(Debug)]
pub struct AssessmentRoll {
    rows: Vec<RollRow>,
}

impl AssessmentRoll {
    /// Parse the first worksheet of an .xlsx file, locating the
    /// `Address` and `Owner` columns by header (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut workbook: calamine::Xlsx<_> = calamine::open_workbook(path)
            .map_err(|e: calamine::XlsxError| ResolveError::RollUnavailable(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ResolveError::RollUnavailable("workbook has no sheets".to_string()))?
            .map_err(|e| ResolveError::RollUnavailable(e.to_string()))?;
        Self::from_range(&range)
    }

    fn from_range(range: &Range<Data>) -> Result<Self> {
        let mut rows = range.rows();
        let headers = rows
            .next()
            .ok_or_else(|| ResolveError::RollUnavailable("empty worksheet".to_string()))?;
        let address_col = find_column(headers, "address")
            .ok_or_else(|| ResolveError::MissingColumn("Address".to_string()))?;
        let owner_col = find_column(headers, "owner")
            .ok_or_else(|| ResolveError::MissingColumn("Owner".to_string()))?;

        let rows = rows
            .map(|row| RollRow {
                address: cell_text(row.get(address_col)),
                owner: cell_text(row.get(owner_col)),
            })
            .collect();
        Ok(AssessmentRoll { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Owner of the first row whose address cell contains the queried
    /// address, case-insensitively.
    ///
    /// Substring containment can match unintended rows (a short street
    /// name inside a longer one). That imprecision matches the roll's
    /// published lookup behavior and is kept deliberately.
    pub fn lookup(&self, address: &str) -> Option<String> {
        let needle = address.to_lowercase();
        self.rows
            .iter()
            .find(|row| row.address.to_lowercase().contains(&needle))
            .map(|row| row.owner.clone())
            .filter(|owner| !owner.trim().is_empty())
    }
}

fn find_column(headers: &[Data], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_string().trim().eq_ignore_ascii_case(name))
}

fn cell_text(cell: Option<&Data>) -> String {
    cell.map(|c| c.to_string().trim().to_string())
        .unwrap_or_default()
}

pub struct SpreadsheetLookupStrategy {
    roll_url: String,
    cache_path: PathBuf,
    http: Arc<RetryingHttpClient>,
    // Load outcome is computed once and reused for the whole group.
    roll: OnceCell<std::result::Result<AssessmentRoll, String>>,
}

impl SpreadsheetLookupStrategy {
    pub fn new(
        roll_url: impl Into<String>,
        cache_path: impl Into<PathBuf>,
        http: Arc<RetryingHttpClient>,
    ) -> Self {
        SpreadsheetLookupStrategy {
            roll_url: roll_url.into(),
            cache_path: cache_path.into(),
            http,
            roll: OnceCell::new(),
        }
    }

    async fn load_roll(&self) -> std::result::Result<AssessmentRoll, String> {
        match self.try_load().await {
            Ok(roll) => {
                info!("assessment roll loaded: {} rows", roll.len());
                Ok(roll)
            }
            Err(err) => {
                error!("unable to download or parse assessment roll: {}", err);
                Err(err.to_string())
            }
        }
    }

    async fn try_load(&self) -> Result<AssessmentRoll> {
        if !self.cache_path.exists() {
            info!("downloading assessment roll from {}", self.roll_url);
            let bytes = self.http.get_bytes(&self.roll_url).await?;
            std::fs::write(&self.cache_path, &bytes)?;
        }
        AssessmentRoll::from_path(&self.cache_path)
    }
}

#[async_trait]
impl SourceStrategy for SpreadsheetLookupStrategy {
    fn source_name(&self) -> &'static str {
        SOURCE
    }

    async fn resolve(&self, address: &str) -> ResolutionResult {
        match self.roll.get_or_init(|| self.load_roll()).await {
            Ok(roll) => ResolutionResult::from_lookup(address, roll.lookup(address), SOURCE),
            Err(_) => ResolutionResult::error(address, SOURCE),
        }
    }
}
