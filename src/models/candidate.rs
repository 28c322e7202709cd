//! Ranker output records

use serde::{Deserialize, Serialize};

/// Accumulation/Distribution classification of recent volume flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdZone {
    Accumulation,
    Distribution,
    #[default]
    Neutral,
}

impl std::fmt::Display for AdZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AdZone::Accumulation => "accumulation",
            AdZone::Distribution => "distribution",
            AdZone::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Entry, stop and target for one ticker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry_price: f64,
    pub stop_loss: f64,
    pub exit_target: f64,
}

/// One ranked trade idea.
///
/// `exit_target - entry_price == risk_reward * (entry_price - stop_loss)` to
/// within currency rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeCandidate {
    pub symbol: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub exit_target: f64,
    pub sentiment_score: i32,
    /// False when the sentiment source failed and the neutral default was used.
    pub sentiment_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_volume: Option<f64>,
    pub market_favorable: bool,
    pub momentum_confirmed: bool,
    /// Last close within 2% of resistance
    pub near_resistance: bool,
    pub ad_zone: AdZone,
    pub technical_score: f64,
    pub confidence: f64,
}
