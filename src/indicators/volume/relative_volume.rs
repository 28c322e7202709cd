//! Relative volume and volume contraction

use crate::common::math;
use crate::indicators::volatility::DispersionRegime;
use crate::models::indicators::{volumes, PriceBar, VolumeIndicator};

/// Current volume divided by the mean volume of the last `period` bars
/// (current bar included).
///
/// `None` when the window is not full or average volume is zero.
pub fn calculate_relative_volume(bars: &[PriceBar], period: u32) -> Option<VolumeIndicator> {
    let volume = bars.last()?.volume;
    let volume_ma = math::sma(&volumes(bars), period as usize)?;
    if volume_ma <= 0.0 {
        return None;
    }
    Some(VolumeIndicator {
        volume,
        volume_ma,
        volume_ma_period: period,
        relative_volume: volume / volume_ma,
    })
}

pub fn calculate_relative_volume_default(bars: &[PriceBar]) -> Option<VolumeIndicator> {
    calculate_relative_volume(bars, 20)
}

/// True when the `period`-bar volume mean is falling bar over bar
pub fn volume_mean_falling(bars: &[PriceBar], period: usize) -> bool {
    let series = math::rolling_mean(&volumes(bars), period);
    match series.as_slice() {
        [.., Some(prev), Some(last)] => last < prev,
        _ => false,
    }
}

/// Volume drying up while price dispersion sits below half its average
pub fn is_volume_contraction(bars: &[PriceBar], dispersion: Option<DispersionRegime>) -> bool {
    volume_mean_falling(bars, 5) && dispersion.is_some_and(|d| d.is_low())
}
