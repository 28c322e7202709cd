//! Accumulation/Distribution Line and the zone classifier built on it

use crate::common::math;
use crate::indicators::volatility::DispersionRegime;
use crate::models::candidate::AdZone;
use crate::models::indicators::PriceBar;

/// Money flow multiplier of one bar, zero for a bar with no range
pub fn money_flow_multiplier(bar: &PriceBar) -> f64 {
    let range = bar.high - bar.low;
    if range == 0.0 {
        return 0.0;
    }
    (2.0 * bar.close - bar.low - bar.high) / range
}

/// Cumulative A/D Line, one value per bar
pub fn accumulation_distribution_line(bars: &[PriceBar]) -> Vec<f64> {
    let mut adl = Vec::with_capacity(bars.len());
    let mut running = 0.0;
    for bar in bars {
        running += money_flow_multiplier(bar) * bar.volume;
        adl.push(running);
    }
    adl
}

/// Mean day-over-day ADL change over the last `period` changes
pub fn adl_trend(bars: &[PriceBar], period: usize) -> Option<f64> {
    let adl = accumulation_distribution_line(bars);
    let changes: Vec<f64> = adl.windows(2).map(|w| w[1] - w[0]).collect();
    math::sma(&changes, period)
}

/// Classify recent flow.
///
/// Accumulation needs a rising ADL trend with low dispersion, Distribution a
/// falling trend with elevated dispersion. Anything else, including missing
/// data, is Neutral.
pub fn classify_ad_zone(trend: Option<f64>, dispersion: Option<DispersionRegime>) -> AdZone {
    match (trend, dispersion) {
        (Some(t), Some(d)) if t > 0.0 && d.is_low() => AdZone::Accumulation,
        (Some(t), Some(d)) if t < 0.0 && d.is_elevated() => AdZone::Distribution,
        _ => AdZone::Neutral,
    }
}
