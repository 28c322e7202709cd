//! Numeric helpers shared by the indicator modules.
//!
//! Series helpers return vectors aligned with their input; positions where the
//! window is not yet full are `None`.

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(mean(&values[values.len() - period..]))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1) of the whole slice.
///
/// Fewer than two values yield `None`.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// EMA step from the previous EMA value
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// EMA series seeded with the SMA of the first `period` values
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    let mut prev = mean(&values[..period]);
    out[period - 1] = Some(prev);
    for i in period..values.len() {
        prev = ema_from_previous(values[i], prev, period);
        out[i] = Some(prev);
    }
    out
}

/// Latest EMA value
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied().flatten()
}

/// True range of a bar. Without a previous close it is `high - low`.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let hl = high - low;
    match prev_close {
        Some(pc) => hl.max((high - pc).abs()).max((low - pc).abs()),
        None => hl,
    }
}

/// Rolling mean over a full window
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(mean(w)))
}

/// Rolling sample standard deviation over a full window
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, sample_std)
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for end in window..=values.len() {
        out[end - 1] = f(&values[end - window..end]);
    }
    out
}

/// Mean of the last `window` defined entries of a series.
///
/// Uses whatever is defined when fewer than `window` entries exist; `None`
/// when nothing is defined.
pub fn trailing_defined_mean(series: &[Option<f64>], window: usize) -> Option<f64> {
    let defined: Vec<f64> = series.iter().rev().flatten().take(window).copied().collect();
    if defined.is_empty() {
        None
    } else {
        Some(mean(&defined))
    }
}

/// Round to `decimals` places, half away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
