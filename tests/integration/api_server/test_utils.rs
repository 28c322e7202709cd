//! Test utilities for API server integration tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use tradescan::core::http::{create_router, AppState};
use tradescan::error::ProviderError;
use tradescan::metrics::Metrics;
use tradescan::models::indicators::PriceBar;
use tradescan::ranker::TradeRanker;
use tradescan::services::market_data::{PriceHistorySource, StaticMarketContext};

/// Flat daily history per symbol; anything else has no data
pub struct StubPrices {
    closes: HashMap<String, f64>,
}

#[async_trait]
impl PriceHistorySource for StubPrices {
    async fn fetch(&self, symbol: &str, _lookback_days: u32) -> Result<Vec<PriceBar>, ProviderError> {
        let close = *self.closes.get(symbol).ok_or(ProviderError::NoData)?;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        Ok((0..25)
            .map(|i| {
                PriceBar::new(
                    close,
                    close * 1.01,
                    close * 0.99,
                    close,
                    10_000.0,
                    start + Duration::days(i),
                )
            })
            .collect())
    }
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    /// AAA and BBB have price history; other symbols are skipped
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let prices = StubPrices {
            closes: HashMap::from([("AAA".to_string(), 100.0), ("BBB".to_string(), 40.0)]),
        };
        let ranker = TradeRanker::builder(Arc::new(prices))
            .market(Arc::new(StaticMarketContext(true)))
            .metrics(metrics.clone())
            .build()
            .expect("ranker");
        let state = AppState::new(Arc::new(ranker), metrics.clone());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
