//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::{closes, MacdIndicator, PriceBar};

/// MACD line for every bar where both EMAs are defined
pub fn macd_line(bars: &[PriceBar], fast_period: u32, slow_period: u32) -> Vec<f64> {
    let closes = closes(bars);
    let fast = math::ema_series(&closes, fast_period as usize);
    let slow = math::ema_series(&closes, slow_period as usize);

    fast.iter()
        .zip(slow.iter())
        .filter_map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect()
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Needs `slow_period` bars for the line. The signal line and histogram are
/// only filled once `signal_period` MACD values exist.
pub fn calculate_macd(
    bars: &[PriceBar],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if fast_period == 0 || slow_period == 0 || bars.len() < slow_period as usize {
        return None;
    }

    let line = macd_line(bars, fast_period, slow_period);
    let macd = *line.last()?;
    let previous_macd = line.len().checked_sub(2).map(|i| line[i]);

    let signal = math::ema(&line, signal_period as usize);
    let histogram = signal.map(|s| macd - s);

    Some(MacdIndicator {
        macd,
        previous_macd,
        signal,
        histogram,
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(bars: &[PriceBar]) -> Option<MacdIndicator> {
    calculate_macd(bars, 12, 26, 9)
}
