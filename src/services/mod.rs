//! External collaborators reached through narrow async traits.

pub mod http_client;
pub mod market_data;
pub mod news;
pub mod polygon;
pub mod sentiment;

pub use http_client::HttpTransport;
pub use market_data::{MarketContext, PriceHistorySource, StaticMarketContext, VolatilityIndexContext};
pub use news::{NewsSource, NoNews};
pub use sentiment::{SentimentScore, SentimentSource};
