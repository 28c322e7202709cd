//! Entry, stop-loss and target derivation

use crate::common::math::round_to;
use crate::config::{RankerConfig, StopStrategy};
use crate::models::candidate::TradePlan;
use crate::models::snapshot::TickerSnapshot;

const TIGHT_ATR_MULTIPLIER: f64 = 1.5;
const WIDE_ATR_MULTIPLIER: f64 = 2.5;

/// ATR multiple used for the volatility stop
pub fn atr_multiplier(snapshot: &TickerSnapshot, config: &RankerConfig) -> f64 {
    if !config.adaptive_stop {
        return config.atr_multiplier;
    }
    if snapshot.volume_contraction {
        TIGHT_ATR_MULTIPLIER
    } else {
        WIDE_ATR_MULTIPLIER
    }
}

/// Build the trade plan, rounded to cents.
///
/// The target is derived from the already rounded entry and stop so the
/// risk-reward identity survives rounding.
pub fn build_trade_plan(snapshot: &TickerSnapshot, config: &RankerConfig) -> TradePlan {
    let entry = snapshot.resistance * config.entry_style.multiplier();

    let stop = match config.stop_strategy {
        StopStrategy::Volatility => {
            snapshot.resistance - atr_multiplier(snapshot, config) * snapshot.atr.value
        }
        StopStrategy::Dispersion => entry - config.dispersion_multiplier * snapshot.close_stdev,
    };

    let entry_price = round_to(entry, 2);
    let stop_loss = round_to(stop, 2);
    let exit_target = round_to(
        entry_price + config.risk_reward * (entry_price - stop_loss),
        2,
    );

    TradePlan {
        entry_price,
        stop_loss,
        exit_target,
    }
}
