//! Trade ranker: evaluates each ticker independently, then stable-sorts by
//! confidence.

pub mod progress;

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::common::math::round_to;
use crate::config::RankerConfig;
use crate::error::ScreenerError;
use crate::metrics::Metrics;
use crate::models::candidate::TradeCandidate;
use crate::services::market_data::{MarketContext, PriceHistorySource};
use crate::services::sentiment::SentimentSource;
use crate::signals::{build_snapshot, build_trade_plan, calculate_confidence, ExternalSignals};

pub use progress::{LoggingObserver, NoopObserver, ScanObserver, ScanProgress};

/// Result of one ranking pass
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub candidates: Vec<TradeCandidate>,
    /// Tickers submitted after normalization
    pub requested: usize,
    /// Tickers that had usable price data
    pub evaluated: usize,
    pub market_favorable: bool,
}

pub struct TradeRanker {
    prices: Arc<dyn PriceHistorySource>,
    sentiment: Option<Arc<dyn SentimentSource>>,
    market: Option<Arc<dyn MarketContext>>,
    observer: Arc<dyn ScanObserver>,
    metrics: Option<Arc<Metrics>>,
    config: RankerConfig,
}

pub struct TradeRankerBuilder {
    prices: Arc<dyn PriceHistorySource>,
    sentiment: Option<Arc<dyn SentimentSource>>,
    market: Option<Arc<dyn MarketContext>>,
    observer: Arc<dyn ScanObserver>,
    metrics: Option<Arc<Metrics>>,
    config: RankerConfig,
}

impl TradeRankerBuilder {
    pub fn sentiment(mut self, sentiment: Arc<dyn SentimentSource>) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn market(mut self, market: Arc<dyn MarketContext>) -> Self {
        self.market = Some(market);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TradeRanker, ScreenerError> {
        self.config.validate()?;
        Ok(TradeRanker {
            prices: self.prices,
            sentiment: self.sentiment,
            market: self.market,
            observer: self.observer,
            metrics: self.metrics,
            config: self.config,
        })
    }
}

/// Trim, upper-case and drop blank symbols. Duplicates are kept.
pub fn normalize_tickers<S: AsRef<str>>(tickers: &[S]) -> Vec<String> {
    tickers
        .iter()
        .map(|t| t.as_ref().trim().to_ascii_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Stable sort by confidence, highest first, then keep `top_n`.
/// Non-finite confidences never reach the ranking.
pub fn sort_and_truncate(candidates: Vec<TradeCandidate>, top_n: usize) -> Vec<TradeCandidate> {
    let mut candidates: Vec<TradeCandidate> = candidates
        .into_iter()
        .filter(|c| c.confidence.is_finite())
        .collect();
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    candidates.truncate(top_n);
    candidates
}

impl TradeRanker {
    pub fn builder(prices: Arc<dyn PriceHistorySource>) -> TradeRankerBuilder {
        TradeRankerBuilder {
            prices,
            sentiment: None,
            market: None,
            observer: Arc::new(NoopObserver),
            metrics: None,
            config: RankerConfig::default(),
        }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Top `top_n` candidates ordered by confidence, ties in input order
    pub async fn rank<S: AsRef<str>>(
        &self,
        tickers: &[S],
        top_n: usize,
    ) -> Result<Vec<TradeCandidate>, ScreenerError> {
        Ok(self.scan(tickers, top_n).await?.candidates)
    }

    /// Like `rank`, with counts for reporting
    pub async fn scan<S: AsRef<str>>(
        &self,
        tickers: &[S],
        top_n: usize,
    ) -> Result<ScanReport, ScreenerError> {
        if top_n == 0 {
            return Err(ScreenerError::InvalidTopN);
        }
        let symbols = normalize_tickers(tickers);
        if symbols.is_empty() {
            return Err(ScreenerError::EmptyTickerList);
        }

        info!(tickers = symbols.len(), top_n = top_n, "starting scan");

        let market_favorable = self.market_favorable().await;
        let total = symbols.len();
        let counter = AtomicUsize::new(0);
        let completed = &counter;

        let results: Vec<Option<TradeCandidate>> = stream::iter(symbols.iter().cloned())
            .map(|symbol: String| async move {
                let candidate = self.evaluate_ticker(&symbol, market_favorable).await;
                let done = completed.fetch_add(1, AtomicOrdering::SeqCst) + 1;
                self.observer.on_progress(&ScanProgress {
                    completed: done,
                    total,
                    symbol,
                    produced_candidate: candidate.is_some(),
                });
                candidate
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let produced: Vec<TradeCandidate> = results.into_iter().flatten().collect();
        let evaluated = produced.len();
        let candidates = sort_and_truncate(produced, top_n);

        if let Some(metrics) = &self.metrics {
            metrics.scans_total.inc();
            metrics.candidates_ranked.set(candidates.len() as f64);
        }

        info!(
            requested = total,
            evaluated = evaluated,
            returned = candidates.len(),
            "scan complete"
        );

        Ok(ScanReport {
            candidates,
            requested: total,
            evaluated,
            market_favorable,
        })
    }

    /// Market backdrop, fetched once per scan. Failures count as unfavourable.
    async fn market_favorable(&self) -> bool {
        let Some(market) = &self.market else {
            return false;
        };
        match market.is_favorable().await {
            Ok(favorable) => favorable,
            Err(e) => {
                warn!(error = %e, "market context unavailable, assuming unfavourable");
                false
            }
        }
    }

    /// Sentiment for one ticker, and whether it actually came from the source
    async fn sentiment_for(&self, symbol: &str) -> (i32, bool) {
        let Some(source) = &self.sentiment else {
            return (0, false);
        };
        match source.score(symbol).await {
            Ok(score) => (score.value(), true),
            Err(e) => {
                warn!(symbol = %symbol, backend = source.name(), error = %e, "sentiment unavailable, using neutral");
                if let Some(metrics) = &self.metrics {
                    metrics.sentiment_failures_total.inc();
                }
                (0, false)
            }
        }
    }

    /// Evaluate one ticker. `None` when it has no usable price data.
    pub async fn evaluate_ticker(&self, symbol: &str, market_favorable: bool) -> Option<TradeCandidate> {
        let bars = match self.prices.fetch(symbol, self.config.lookback_days).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "price history unavailable, skipping");
                self.count_skip();
                return None;
            }
        };

        let Some(snapshot) = build_snapshot(symbol, &bars, &self.config) else {
            warn!(symbol = %symbol, bars = bars.len(), "price history unusable, skipping");
            self.count_skip();
            return None;
        };

        let plan = build_trade_plan(&snapshot, &self.config);
        let (sentiment_score, sentiment_available) = self.sentiment_for(symbol).await;

        let breakdown = calculate_confidence(
            &snapshot,
            ExternalSignals {
                sentiment: sentiment_score,
                market_favorable,
            },
            &self.config.weights,
        );

        debug!(symbol = %symbol, breakdown = ?breakdown, "confidence breakdown");

        if let Some(metrics) = &self.metrics {
            metrics.tickers_evaluated_total.inc();
        }

        Some(TradeCandidate {
            symbol: symbol.to_string(),
            entry_price: plan.entry_price,
            stop_loss: plan.stop_loss,
            exit_target: plan.exit_target,
            sentiment_score,
            sentiment_available,
            relative_volume: snapshot.relative_volume().map(|v| round_to(v, 2)),
            market_favorable,
            momentum_confirmed: snapshot.momentum_confirmed(),
            near_resistance: snapshot.near_resistance(),
            ad_zone: snapshot.ad_zone,
            technical_score: breakdown.technical,
            confidence: breakdown.confidence(),
        })
    }

    fn count_skip(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.tickers_skipped_total.inc();
        }
    }
}
