//! Support and Resistance levels from rolling close extremes

use crate::models::indicators::{PriceBar, SupportResistanceIndicator};

/// Calculate support (min close) and resistance (max close) over the last
/// `lookback` bars.
///
/// A shorter series uses every available bar.
pub fn calculate_support_resistance(
    bars: &[PriceBar],
    lookback: usize,
) -> Option<SupportResistanceIndicator> {
    if bars.is_empty() || lookback == 0 {
        return None;
    }

    let window = lookback.min(bars.len());
    let recent = &bars[bars.len() - window..];

    let resistance = recent.iter().map(|b| b.close).fold(f64::NEG_INFINITY, f64::max);
    let support = recent.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);

    Some(SupportResistanceIndicator {
        support,
        resistance,
        window,
    })
}

/// Calculate support/resistance with default lookback (20)
pub fn calculate_support_resistance_default(
    bars: &[PriceBar],
) -> Option<SupportResistanceIndicator> {
    calculate_support_resistance(bars, 20)
}
