//! Single feature-computation pass per ticker

use crate::config::RankerConfig;
use crate::indicators::momentum::{calculate_macd_default, calculate_rsi};
use crate::indicators::structure::calculate_support_resistance;
use crate::indicators::trend::calculate_sma;
use crate::indicators::volatility::{calculate_atr, close_stdev, dispersion_regime_default};
use crate::indicators::volume::{
    adl_trend, calculate_relative_volume_default, classify_ad_zone, is_volume_contraction,
};
use crate::models::indicators::PriceBar;
use crate::models::snapshot::TickerSnapshot;

pub const RSI_PERIOD: u32 = 14;
pub const ADL_TREND_PERIOD: usize = 10;

fn is_finite_bar(bar: &PriceBar) -> bool {
    [bar.open, bar.high, bar.low, bar.close, bar.volume]
        .iter()
        .all(|v| v.is_finite())
}

/// Compute every statistic the ranker needs from one bar series.
///
/// Returns `None` only for an empty series or a bar with a non-finite
/// price or volume; short series degrade individual indicators instead.
pub fn build_snapshot(
    symbol: &str,
    bars: &[PriceBar],
    config: &RankerConfig,
) -> Option<TickerSnapshot> {
    let last = bars.last()?;
    if !bars.iter().all(is_finite_bar) {
        return None;
    }

    let levels = calculate_support_resistance(bars, config.resistance_window)?;
    let atr = calculate_atr(bars, config.atr_period)?;
    let dispersion = dispersion_regime_default(bars);

    Some(TickerSnapshot {
        symbol: symbol.to_string(),
        bar_count: bars.len(),
        last_close: last.close,
        resistance: levels.resistance,
        support: levels.support,
        atr,
        close_stdev: close_stdev(bars),
        rsi: calculate_rsi(bars, RSI_PERIOD),
        macd: calculate_macd_default(bars),
        sma_50: calculate_sma(bars, 50),
        sma_200: calculate_sma(bars, 200),
        volume: calculate_relative_volume_default(bars),
        ad_zone: classify_ad_zone(adl_trend(bars, ADL_TREND_PERIOD), dispersion),
        volume_contraction: is_volume_contraction(bars, dispersion),
    })
}
