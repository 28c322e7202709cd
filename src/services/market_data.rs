//! Price history and market context interfaces.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::ProviderError;
use crate::models::indicators::PriceBar;

#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Daily bars covering the trailing `lookback_days` trading days, oldest
    /// first. An empty series is reported as `ProviderError::NoData`.
    async fn fetch(&self, symbol: &str, lookback_days: u32)
        -> Result<Vec<PriceBar>, ProviderError>;
}

#[async_trait]
pub trait MarketContext: Send + Sync {
    /// Whether the broad market backdrop favours new long entries
    async fn is_favorable(&self) -> Result<bool, ProviderError>;
}

/// Market is favourable while a volatility index closes below a threshold
pub struct VolatilityIndexContext {
    source: Arc<dyn PriceHistorySource>,
    symbol: String,
    threshold: f64,
}

impl VolatilityIndexContext {
    pub const DEFAULT_THRESHOLD: f64 = 20.0;
    const LOOKBACK_DAYS: u32 = 5;

    pub fn new(source: Arc<dyn PriceHistorySource>, symbol: impl Into<String>, threshold: f64) -> Self {
        Self {
            source,
            symbol: symbol.into(),
            threshold,
        }
    }
}

#[async_trait]
impl MarketContext for VolatilityIndexContext {
    async fn is_favorable(&self) -> Result<bool, ProviderError> {
        let bars = self.source.fetch(&self.symbol, Self::LOOKBACK_DAYS).await?;
        let latest = bars.last().ok_or(ProviderError::NoData)?;
        if !latest.close.is_finite() {
            warn!(symbol = %self.symbol, "reference index close is not finite");
            return Err(ProviderError::Malformed(format!(
                "non-finite close for {}",
                self.symbol
            )));
        }
        Ok(latest.close < self.threshold)
    }
}

/// Fixed answer, for offline runs and tests
pub struct StaticMarketContext(pub bool);

#[async_trait]
impl MarketContext for StaticMarketContext {
    async fn is_favorable(&self) -> Result<bool, ProviderError> {
        Ok(self.0)
    }
}
