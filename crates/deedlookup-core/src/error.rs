//! Domain-level error taxonomy for owner-name resolution.

/// Errors produced while resolving addresses against external sources.
///
/// Strategies catch these at the address (or group) boundary and
/// translate them into `status = error` results; nothing here crosses
/// a strategy invocation.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("request to {url} failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        url: String,
        last: String,
    },

    #[error("browser session error: {0}")]
    Browser(String),

    #[error("assessment roll unavailable: {0}")]
    RollUnavailable(String),

    #[error("missing column in assessment roll: {0}")]
    MissingColumn(String),

    #[error("unsupported input file type: {0}")]
    UnsupportedInput(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
