//! Error types for the screener and its data collaborators

use thiserror::Error;

/// Failure of an external collaborator (price, news, sentiment, market).
///
/// The ranker never propagates these; they degrade the affected signal.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no data available")]
    NoData,

    #[error("missing credentials: {0} is not set")]
    MissingCredentials(&'static str),
}

impl ProviderError {
    /// Errors worth retrying with backoff
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport(_) | ProviderError::Timeout => true,
            ProviderError::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::Status {
                status: status.as_u16(),
            }
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Structurally invalid input that stops a whole scan
#[derive(Debug, Error, PartialEq)]
pub enum ScreenerError {
    #[error("ticker list is empty")]
    EmptyTickerList,

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("no Ticker, Symbol or Tickers column found (columns: {columns:?})")]
    MissingTickerColumn { columns: Vec<String> },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unreadable ticker table: {0}")]
    MalformedTable(String),
}
