//! Technical score and linear confidence calculation

use serde::Serialize;

use crate::common::math::round_to;
use crate::config::ConfidenceWeights;
use crate::models::candidate::AdZone;
use crate::models::snapshot::TickerSnapshot;

/// Signed contribution of one technical check.
///
/// A check whose indicator could not be computed contributes nothing.
fn check(outcome: Option<bool>, step: f64) -> f64 {
    match outcome {
        Some(true) => step,
        Some(false) => -step,
        None => 0.0,
    }
}

/// Sum of +/- `step` for RSI above 50, close above SMA50 and SMA200, and
/// MACD above zero.
pub fn technical_score(snapshot: &TickerSnapshot, step: f64) -> f64 {
    let rsi_bullish = snapshot.rsi.as_ref().map(|r| r.value > 50.0);
    let above_averages = match (&snapshot.sma_50, &snapshot.sma_200) {
        (Some(fast), Some(slow)) => {
            Some(snapshot.last_close > fast.value && snapshot.last_close > slow.value)
        }
        _ => None,
    };
    let macd_positive = snapshot.macd.as_ref().map(|m| m.macd > 0.0);

    check(rsi_bullish, step) + check(above_averages, step) + check(macd_positive, step)
}

/// Inputs that do not come from the price series
#[derive(Debug, Clone, Copy)]
pub struct ExternalSignals {
    pub sentiment: i32,
    pub market_favorable: bool,
}

/// Per-term contributions to the confidence score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfidenceBreakdown {
    pub sentiment: f64,
    pub relative_volume: f64,
    pub market: f64,
    pub ad_zone: f64,
    pub momentum: f64,
    pub breakout: f64,
    pub technical: f64,
}

impl ConfidenceBreakdown {
    pub fn total(&self) -> f64 {
        self.sentiment
            + self.relative_volume
            + self.market
            + self.ad_zone
            + self.momentum
            + self.breakout
            + self.technical
    }

    /// Total rounded to two decimals
    pub fn confidence(&self) -> f64 {
        round_to(self.total(), 2)
    }
}

/// Weighted linear combination of every signal.
///
/// Non-decreasing in sentiment, relative volume, market favorability,
/// accumulation, momentum and proximity to resistance; non-increasing on distribution, for any
/// weights that pass `ConfidenceWeights::validate`.
pub fn calculate_confidence(
    snapshot: &TickerSnapshot,
    external: ExternalSignals,
    weights: &ConfidenceWeights,
) -> ConfidenceBreakdown {
    let ad_zone = match snapshot.ad_zone {
        AdZone::Accumulation => weights.accumulation,
        AdZone::Distribution => weights.distribution,
        AdZone::Neutral => 0.0,
    };

    ConfidenceBreakdown {
        sentiment: weights.sentiment * external.sentiment as f64,
        relative_volume: weights.relative_volume * snapshot.relative_volume().unwrap_or(0.0),
        market: if external.market_favorable {
            weights.market_favorable
        } else {
            0.0
        },
        ad_zone,
        momentum: if snapshot.momentum_confirmed() {
            weights.momentum
        } else {
            0.0
        },
        breakout: if snapshot.near_resistance() {
            weights.near_resistance
        } else {
            0.0
        },
        technical: technical_score(snapshot, weights.technical_step),
    }
}
