//! Per-ticker feature snapshot

use serde::Serialize;

use super::candidate::AdZone;
use super::indicators::{AtrIndicator, MacdIndicator, RsiIndicator, SmaIndicator, VolumeIndicator};

/// Closes at or above this fraction of resistance count as near a breakout
pub const NEAR_RESISTANCE_RATIO: f64 = 0.98;

/// Every rolling statistic the ranker needs for one ticker, computed once.
///
/// Indicators that need more bars than were fetched are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct TickerSnapshot {
    pub symbol: String,
    pub bar_count: usize,
    pub last_close: f64,
    pub resistance: f64,
    pub support: f64,
    pub atr: AtrIndicator,
    pub close_stdev: f64,
    pub rsi: Option<RsiIndicator>,
    pub macd: Option<MacdIndicator>,
    pub sma_50: Option<SmaIndicator>,
    pub sma_200: Option<SmaIndicator>,
    pub volume: Option<VolumeIndicator>,
    pub ad_zone: AdZone,
    pub volume_contraction: bool,
}

impl TickerSnapshot {
    pub fn relative_volume(&self) -> Option<f64> {
        self.volume.as_ref().map(|v| v.relative_volume)
    }

    /// RSI above 60 with a rising MACD line
    pub fn momentum_confirmed(&self) -> bool {
        let rsi_strong = self.rsi.as_ref().is_some_and(|r| r.value > 60.0);
        let macd_rising = self.macd.as_ref().is_some_and(MacdIndicator::is_rising);
        rsi_strong && macd_rising
    }

    /// Last close within 2% of (or above) resistance
    pub fn near_resistance(&self) -> bool {
        self.last_close >= NEAR_RESISTANCE_RATIO * self.resistance
    }
}
