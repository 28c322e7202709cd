//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::{AtrIndicator, PriceBar};

/// Calculate ATR with Wilder's smoothing.
///
/// The first `period` true ranges seed the average, later ones are smoothed
/// as `(atr * (period - 1) + tr) / period`. When fewer than `period` true
/// ranges exist the plain mean of the available ones is returned and
/// `full_window` is false. The first bar has no previous close, so its true
/// range is `high - low`.
pub fn calculate_atr(bars: &[PriceBar], period: u32) -> Option<AtrIndicator> {
    if bars.is_empty() || period == 0 {
        return None;
    }
    let period_len = period as usize;

    // With enough history the first bar only serves as a previous close
    let tr_values: Vec<f64> = if bars.len() > period_len {
        bars.windows(2)
            .map(|w| math::true_range(w[1].high, w[1].low, Some(w[0].close)))
            .collect()
    } else {
        bars.iter()
            .enumerate()
            .map(|(i, b)| {
                let prev_close = i.checked_sub(1).map(|p| bars[p].close);
                math::true_range(b.high, b.low, prev_close)
            })
            .collect()
    };

    if tr_values.len() < period_len {
        return Some(AtrIndicator {
            value: math::mean(&tr_values),
            period,
            full_window: false,
        });
    }

    let period_f = period as f64;
    let mut atr = math::mean(&tr_values[..period_len]);
    for &tr in &tr_values[period_len..] {
        atr = (atr * (period_f - 1.0) + tr) / period_f;
    }

    if !atr.is_finite() {
        return None;
    }

    Some(AtrIndicator {
        value: atr,
        period,
        full_window: true,
    })
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(bars: &[PriceBar]) -> Option<AtrIndicator> {
    calculate_atr(bars, 14)
}
