//! Shared data models spanning the engine layers.

pub mod candidate;
pub mod indicators;
pub mod snapshot;

pub use candidate::{AdZone, TradeCandidate, TradePlan};
pub use indicators::{
    AtrIndicator, MacdIndicator, PriceBar, RsiIndicator, SmaIndicator,
    SupportResistanceIndicator, VolumeIndicator,
};
pub use snapshot::TickerSnapshot;
