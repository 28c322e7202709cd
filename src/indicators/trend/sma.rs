//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::{closes, PriceBar, SmaIndicator};

/// Calculate SMA of closes for a specific period
pub fn calculate_sma(bars: &[PriceBar], period: u32) -> Option<SmaIndicator> {
    let value = math::sma(&closes(bars), period as usize)?;
    Some(SmaIndicator { value, period })
}
