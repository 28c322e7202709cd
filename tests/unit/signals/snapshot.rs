//! Unit tests for the per-ticker snapshot pass

use tradescan::config::RankerConfig;
use tradescan::models::AdZone;
use tradescan::signals::build_snapshot;

use crate::fixtures::{bar, bars_from_closes, flat_bars, linear_closes};

#[test]
fn empty_or_non_finite_series_has_no_snapshot() {
    let config = RankerConfig::default();
    assert!(build_snapshot("AAA", &[], &config).is_none());

    let mut bars = flat_bars(30, 100.0, 1.0);
    bars[10].close = f64::NAN;
    assert!(build_snapshot("AAA", &bars, &config).is_none());
}

#[test]
fn non_finite_volume_or_range_has_no_snapshot() {
    let config = RankerConfig::default();

    let mut bars = flat_bars(30, 100.0, 1.0);
    bars[29].volume = f64::NAN;
    assert!(build_snapshot("VOL", &bars, &config).is_none());

    let mut bars = flat_bars(30, 100.0, 1.0);
    bars[5].low = f64::NEG_INFINITY;
    assert!(build_snapshot("LOW", &bars, &config).is_none());

    let bars = flat_bars(30, 100.0, 1.0);
    let snap = build_snapshot("OK", &bars, &config).expect("snapshot");
    assert!(snap.near_resistance());
}

#[test]
fn single_bar_degrades_instead_of_failing() {
    let bars = vec![bar(0, 10.0, 11.0, 9.0, 10.0, 500.0)];
    let snap = build_snapshot("ONE", &bars, &RankerConfig::default()).expect("snapshot");

    assert_eq!(snap.bar_count, 1);
    assert_eq!(snap.resistance, 10.0);
    assert_eq!(snap.atr.value, 2.0);
    assert!(!snap.atr.full_window);
    assert_eq!(snap.close_stdev, 0.0);
    assert!(snap.rsi.is_none());
    assert!(snap.macd.is_none());
    assert!(snap.volume.is_none());
    assert_eq!(snap.ad_zone, AdZone::Neutral);
    assert!(!snap.volume_contraction);
    assert!(!snap.momentum_confirmed());
}

#[test]
fn full_history_fills_every_indicator() {
    let bars = bars_from_closes(&linear_closes(220, 50.0, 0.5));
    let snap = build_snapshot("FULL", &bars, &RankerConfig::default()).expect("snapshot");

    assert_eq!(snap.last_close, bars[219].close);
    assert_eq!(snap.resistance, bars[219].close);
    assert_eq!(snap.support, bars[200].close);
    assert!(snap.atr.full_window);
    assert!(snap.rsi.is_some());
    assert!(snap.macd.is_some());
    assert!(snap.sma_50.is_some());
    assert!(snap.sma_200.is_some());
    assert_eq!(snap.relative_volume(), Some(1.0));
}

#[test]
fn resistance_window_is_configurable() {
    let bars = bars_from_closes(&[120.0, 90.0, 95.0, 100.0]);
    let config = RankerConfig {
        resistance_window: 3,
        ..RankerConfig::default()
    };
    let snap = build_snapshot("WIN", &bars, &config).unwrap();
    assert_eq!(snap.resistance, 100.0);
}
