//! Unit tests for the A/D line, zone classifier and relative volume

use tradescan::indicators::volatility::DispersionRegime;
use tradescan::indicators::volume::{
    accumulation_distribution_line, adl_trend, calculate_relative_volume,
    calculate_relative_volume_default, classify_ad_zone, is_volume_contraction,
    money_flow_multiplier, volume_mean_falling,
};
use tradescan::models::AdZone;

use crate::fixtures::{bar, flat_bars};

#[test]
fn money_flow_multiplier_spans_minus_one_to_one() {
    assert_eq!(money_flow_multiplier(&bar(0, 10.0, 12.0, 10.0, 12.0, 1.0)), 1.0);
    assert_eq!(money_flow_multiplier(&bar(0, 10.0, 12.0, 10.0, 10.0, 1.0)), -1.0);
    assert_eq!(money_flow_multiplier(&bar(0, 10.0, 12.0, 10.0, 11.0, 1.0)), 0.0);
}

#[test]
fn zero_range_bar_contributes_nothing_to_adl() {
    let bars = vec![
        bar(0, 10.0, 12.0, 10.0, 12.0, 100.0),
        bar(1, 11.0, 11.0, 11.0, 11.0, 5_000.0),
        bar(2, 10.0, 12.0, 10.0, 10.0, 40.0),
    ];
    let adl = accumulation_distribution_line(&bars);
    assert_eq!(adl, vec![100.0, 100.0, 60.0]);
    assert!(adl.iter().all(|v| v.is_finite()));
}

#[test]
fn adl_trend_is_mean_of_recent_changes() {
    let bars: Vec<_> = (0..12)
        .map(|i| bar(i, 10.0, 12.0, 10.0, 12.0, 50.0))
        .collect();
    assert_eq!(adl_trend(&bars, 10), Some(50.0));
    assert_eq!(adl_trend(&bars[..5], 10), None);
}

#[test]
fn ad_zone_needs_trend_and_dispersion_to_agree() {
    let quiet = Some(DispersionRegime {
        current: 1.0,
        average: 4.0,
    });
    let busy = Some(DispersionRegime {
        current: 3.0,
        average: 1.0,
    });

    assert_eq!(classify_ad_zone(Some(5.0), quiet), AdZone::Accumulation);
    assert_eq!(classify_ad_zone(Some(-5.0), busy), AdZone::Distribution);
    assert_eq!(classify_ad_zone(Some(5.0), busy), AdZone::Neutral);
    assert_eq!(classify_ad_zone(Some(-5.0), quiet), AdZone::Neutral);
    assert_eq!(classify_ad_zone(None, quiet), AdZone::Neutral);
    assert_eq!(classify_ad_zone(Some(5.0), None), AdZone::Neutral);
}

#[test]
fn relative_volume_compares_last_bar_to_window_mean() {
    let mut bars = flat_bars(20, 50.0, 1.0);
    bars[19].volume = 3_000.0;
    let volume = calculate_relative_volume_default(&bars).expect("relative volume");
    assert_eq!(volume.volume_ma, 1_100.0);
    assert!((volume.relative_volume - 3_000.0 / 1_100.0).abs() < 1e-12);
}

#[test]
fn relative_volume_needs_full_window_and_volume() {
    assert!(calculate_relative_volume_default(&flat_bars(19, 50.0, 1.0)).is_none());

    let mut silent = flat_bars(20, 50.0, 1.0);
    for b in &mut silent {
        b.volume = 0.0;
    }
    assert!(calculate_relative_volume(&silent, 20).is_none());
}

#[test]
fn contraction_needs_falling_volume_and_quiet_prices() {
    let mut bars = flat_bars(10, 50.0, 1.0);
    for (i, b) in bars.iter_mut().enumerate() {
        b.volume = 2_000.0 - 100.0 * i as f64;
    }
    assert!(volume_mean_falling(&bars, 5));

    let quiet = Some(DispersionRegime {
        current: 0.1,
        average: 1.0,
    });
    assert!(is_volume_contraction(&bars, quiet));
    assert!(!is_volume_contraction(&bars, None));

    bars.reverse();
    assert!(!volume_mean_falling(&bars, 5));
}
