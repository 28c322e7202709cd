//! RSI (Relative Strength Index) indicator

use crate::models::indicators::{PriceBar, RsiIndicator};

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are seeded with the mean of the first `period` changes and then
/// smoothed with Wilder's method over the rest of the series.
pub fn calculate_rsi(bars: &[PriceBar], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period == 0 || bars.len() < period_len + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);

    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let period_f = period as f64;
    let mut avg_gain: f64 = gains[..period_len].iter().sum::<f64>() / period_f;
    let mut avg_loss: f64 = losses[..period_len].iter().sum::<f64>() / period_f;

    for i in period_len..gains.len() {
        avg_gain = (avg_gain * (period_f - 1.0) + gains[i]) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + losses[i]) / period_f;
    }

    if avg_loss == 0.0 {
        // Flat series has no momentum either way
        let value = if avg_gain == 0.0 { 50.0 } else { 100.0 };
        return Some(RsiIndicator { value, period });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(RsiIndicator { value: rsi, period })
}
