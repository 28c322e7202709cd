//! Close-price dispersion: plain standard deviation and the rolling
//! dispersion regime used by the volume-flow classifiers.

use crate::common::math;
use crate::models::indicators::{closes, PriceBar};

/// Sample standard deviation of every close in the series.
///
/// Zero when there are fewer than two bars.
pub fn close_stdev(bars: &[PriceBar]) -> f64 {
    math::sample_std(&closes(bars)).unwrap_or(0.0)
}

/// Current rolling dispersion compared with its own recent average
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionRegime {
    pub current: f64,
    pub average: f64,
}

impl DispersionRegime {
    /// Ratio of current dispersion to its average, `None` when the average is zero
    pub fn ratio(&self) -> Option<f64> {
        if self.average > 0.0 {
            Some(self.current / self.average)
        } else {
            None
        }
    }

    pub fn is_low(&self) -> bool {
        self.ratio().is_some_and(|r| r < 0.5)
    }

    pub fn is_elevated(&self) -> bool {
        self.ratio().is_some_and(|r| r > 1.0)
    }
}

/// Rolling `window`-bar close stdev, and the mean of its last `window` values.
///
/// Returns `None` until at least one full window exists.
pub fn dispersion_regime(bars: &[PriceBar], window: usize) -> Option<DispersionRegime> {
    let series = math::rolling_std(&closes(bars), window);
    let current = series.last().copied().flatten()?;
    let average = math::trailing_defined_mean(&series, window)?;
    Some(DispersionRegime { current, average })
}

/// Dispersion regime with the default 20-bar window
pub fn dispersion_regime_default(bars: &[PriceBar]) -> Option<DispersionRegime> {
    dispersion_regime(bars, 20)
}
