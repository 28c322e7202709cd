//! Stock screening engine: ranks tickers by a confidence score built from
//! daily price indicators, news sentiment and market context.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod ranker;
pub mod services;
pub mod signals;
pub mod tickers;

pub use error::{ProviderError, ScreenerError};
pub use models::{PriceBar, TradeCandidate};
pub use ranker::TradeRanker;
