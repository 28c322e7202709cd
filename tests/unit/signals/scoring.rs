//! Unit tests for the technical score and confidence formula

use tradescan::models::indicators::{
    MacdIndicator, RsiIndicator, SmaIndicator, VolumeIndicator,
};
use tradescan::models::AdZone;
use tradescan::signals::{calculate_confidence, technical_score, ExternalSignals};

use crate::fixtures::{snapshot, weights};

fn external(sentiment: i32, market_favorable: bool) -> ExternalSignals {
    ExternalSignals {
        sentiment,
        market_favorable,
    }
}

fn volume(relative_volume: f64) -> VolumeIndicator {
    VolumeIndicator {
        volume: relative_volume * 1_000.0,
        volume_ma: 1_000.0,
        volume_ma_period: 20,
        relative_volume,
    }
}

fn macd(value: f64, previous: f64) -> MacdIndicator {
    MacdIndicator {
        macd: value,
        previous_macd: Some(previous),
        signal: None,
        histogram: None,
        period: (12, 26, 9),
    }
}

#[test]
fn missing_indicators_contribute_nothing() {
    let snap = snapshot(100.0, 2.0, 0.0);
    assert_eq!(technical_score(&snap, 10.0), 0.0);

    let breakdown = calculate_confidence(&snap, external(0, false), &weights());
    assert_eq!(breakdown.total(), 0.0);
}

#[test]
fn every_technical_check_moves_the_score() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.last_close = 110.0;
    snap.rsi = Some(RsiIndicator {
        value: 55.0,
        period: 14,
    });
    snap.sma_50 = Some(SmaIndicator {
        value: 105.0,
        period: 50,
    });
    snap.sma_200 = Some(SmaIndicator {
        value: 95.0,
        period: 200,
    });
    snap.macd = Some(macd(0.8, 0.5));
    assert_eq!(technical_score(&snap, 10.0), 30.0);

    snap.last_close = 100.0;
    snap.rsi = Some(RsiIndicator {
        value: 45.0,
        period: 14,
    });
    snap.macd = Some(macd(-0.2, 0.1));
    assert_eq!(technical_score(&snap, 10.0), -30.0);
}

#[test]
fn reference_formula_terms() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.volume = Some(volume(1.5));
    snap.ad_zone = AdZone::Accumulation;

    let breakdown = calculate_confidence(&snap, external(40, true), &weights());
    assert_eq!(breakdown.sentiment, 8.0);
    assert_eq!(breakdown.relative_volume, 15.0);
    assert_eq!(breakdown.market, 20.0);
    assert_eq!(breakdown.ad_zone, 15.0);
    assert_eq!(breakdown.momentum, 0.0);
    assert_eq!(breakdown.confidence(), 58.0);

    snap.ad_zone = AdZone::Distribution;
    let breakdown = calculate_confidence(&snap, external(40, true), &weights());
    assert_eq!(breakdown.ad_zone, -10.0);
}

#[test]
fn momentum_needs_strong_rsi_and_rising_macd() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.rsi = Some(RsiIndicator {
        value: 65.0,
        period: 14,
    });
    snap.macd = Some(macd(0.4, 0.3));
    assert!(snap.momentum_confirmed());
    let confirmed = calculate_confidence(&snap, external(0, false), &weights());
    assert_eq!(confirmed.momentum, 10.0);

    snap.macd = Some(macd(0.3, 0.4));
    assert!(!snap.momentum_confirmed());
    let unconfirmed = calculate_confidence(&snap, external(0, false), &weights());
    assert_eq!(unconfirmed.momentum, 0.0);
}

#[test]
fn confidence_is_monotone_in_bullish_inputs() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.volume = Some(volume(1.0));
    let w = weights();
    let base = calculate_confidence(&snap, external(0, false), &w).total();

    let more_sentiment = calculate_confidence(&snap, external(30, false), &w).total();
    let favorable = calculate_confidence(&snap, external(0, true), &w).total();
    assert!(more_sentiment >= base);
    assert!(favorable >= base);

    snap.volume = Some(volume(2.5));
    assert!(calculate_confidence(&snap, external(0, false), &w).total() >= base);

    snap.volume = Some(volume(1.0));
    snap.ad_zone = AdZone::Accumulation;
    assert!(calculate_confidence(&snap, external(0, false), &w).total() >= base);

    snap.ad_zone = AdZone::Distribution;
    assert!(calculate_confidence(&snap, external(0, false), &w).total() <= base);
}

#[test]
fn confidence_is_rounded_to_two_decimals() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.volume = Some(volume(1.23456));
    let breakdown = calculate_confidence(&snap, external(0, false), &weights());
    assert_eq!(breakdown.confidence(), 12.35);
}

#[test]
fn near_resistance_starts_two_percent_below() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    assert!(snap.near_resistance());

    snap.last_close = 98.0;
    assert!(snap.near_resistance());

    snap.last_close = 97.99;
    assert!(!snap.near_resistance());
}

#[test]
fn near_resistance_weight_is_opt_in() {
    let mut snap = snapshot(100.0, 2.0, 0.0);
    snap.last_close = 99.0;

    let default = calculate_confidence(&snap, external(0, false), &weights());
    assert_eq!(default.breakout, 0.0);

    let mut w = weights();
    w.near_resistance = 5.0;
    let near = calculate_confidence(&snap, external(0, false), &w);
    assert_eq!(near.breakout, 5.0);
    assert_eq!(near.confidence(), 5.0);

    snap.last_close = 90.0;
    let far = calculate_confidence(&snap, external(0, false), &w);
    assert_eq!(far.breakout, 0.0);
}
