//! Unit tests for ATR and close dispersion

use tradescan::indicators::volatility::{
    calculate_atr, calculate_atr_default, close_stdev, dispersion_regime, DispersionRegime,
};

use crate::fixtures::{bar, bars_from_closes, flat_bars};

#[test]
fn atr_of_constant_range_is_that_range() {
    let bars = flat_bars(30, 100.0, 1.0);
    let atr = calculate_atr_default(&bars).expect("atr");
    assert!((atr.value - 2.0).abs() < 1e-12);
    assert!(atr.full_window);
    assert_eq!(atr.period, 14);
}

#[test]
fn atr_applies_wilder_smoothing_after_seed() {
    let bars = vec![
        bar(0, 9.0, 10.0, 8.0, 9.0, 1.0),
        bar(1, 9.5, 11.0, 9.0, 10.0, 1.0),
        bar(2, 10.5, 14.0, 10.0, 13.0, 1.0),
        bar(3, 12.8, 13.0, 12.0, 12.5, 1.0),
    ];
    // True ranges 2, 4, 1: seed (2 + 4) / 2 = 3, then (3 + 1) / 2 = 2
    let atr = calculate_atr(&bars, 2).expect("atr");
    assert!((atr.value - 2.0).abs() < 1e-12);
    assert!(atr.full_window);
}

#[test]
fn atr_uses_gaps_to_previous_close() {
    let bars = vec![
        bar(0, 10.0, 10.5, 9.5, 10.0, 1.0),
        bar(1, 13.0, 13.5, 12.5, 13.0, 1.0),
    ];
    // Second bar: high - prev close = 3.5 dominates its 1.0 range
    let atr = calculate_atr(&bars, 1).expect("atr");
    assert!((atr.value - 3.5).abs() < 1e-12);
}

#[test]
fn single_bar_falls_back_to_its_range() {
    let bars = vec![bar(0, 10.0, 11.0, 9.0, 10.0, 1.0)];
    let atr = calculate_atr_default(&bars).expect("atr");
    assert_eq!(atr.value, 2.0);
    assert!(!atr.full_window);
}

#[test]
fn empty_series_or_zero_period_has_no_atr() {
    assert!(calculate_atr_default(&[]).is_none());
    assert!(calculate_atr(&flat_bars(5, 10.0, 1.0), 0).is_none());
}

#[test]
fn close_stdev_is_sample_deviation() {
    let bars = bars_from_closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    // Sum of squared deviations is 32 over 7 degrees of freedom
    assert!((close_stdev(&bars) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    assert_eq!(close_stdev(&bars[..1]), 0.0);
}

#[test]
fn dispersion_regime_needs_a_full_window() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
    assert!(dispersion_regime(&bars, 5).is_none());
    assert!(dispersion_regime(&bars, 2).is_some());
}

#[test]
fn dispersion_ratio_thresholds() {
    let quiet = DispersionRegime {
        current: 1.0,
        average: 4.0,
    };
    let busy = DispersionRegime {
        current: 3.0,
        average: 2.0,
    };
    let dead = DispersionRegime {
        current: 0.0,
        average: 0.0,
    };
    assert!(quiet.is_low() && !quiet.is_elevated());
    assert!(busy.is_elevated() && !busy.is_low());
    assert_eq!(dead.ratio(), None);
    assert!(!dead.is_low() && !dead.is_elevated());
}
