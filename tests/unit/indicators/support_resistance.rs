//! Unit tests for rolling support and resistance

use tradescan::indicators::structure::{
    calculate_support_resistance, calculate_support_resistance_default,
};

use crate::fixtures::{bars_from_closes, linear_closes};

#[test]
fn resistance_is_max_close_of_trailing_window() {
    let mut closes = vec![500.0];
    closes.extend(linear_closes(20, 80.0, 1.0));
    let bars = bars_from_closes(&closes);

    let levels = calculate_support_resistance_default(&bars).expect("levels");
    // The 500 close sits just outside the 20-bar window
    assert_eq!(levels.resistance, 99.0);
    assert_eq!(levels.support, 80.0);
    assert_eq!(levels.window, 20);
}

#[test]
fn resistance_bounds_every_close_in_window() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
    let bars = bars_from_closes(&closes);
    let levels = calculate_support_resistance(&bars, 20).unwrap();
    for b in &bars[bars.len() - 20..] {
        assert!(levels.resistance >= b.close);
        assert!(levels.support <= b.close);
    }
}

#[test]
fn short_series_uses_every_bar() {
    let bars = bars_from_closes(&[42.0]);
    let levels = calculate_support_resistance_default(&bars).unwrap();
    assert_eq!(levels.resistance, 42.0);
    assert_eq!(levels.support, 42.0);
    assert_eq!(levels.window, 1);
}

#[test]
fn empty_series_has_no_levels() {
    assert!(calculate_support_resistance_default(&[]).is_none());
    assert!(calculate_support_resistance(&bars_from_closes(&[1.0]), 0).is_none());
}
