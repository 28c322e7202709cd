//! Wires configured collaborators into a ranker

use std::sync::Arc;

use tracing::info;

use crate::config::ScreenerConfig;
use crate::error::ProviderError;
use crate::metrics::Metrics;
use crate::ranker::{ScanObserver, TradeRanker};
use crate::services::http_client::HttpTransport;
use crate::services::market_data::{PriceHistorySource, VolatilityIndexContext};
use crate::services::news::NewsSource;
use crate::services::polygon::{PolygonNewsSource, PolygonPriceSource};
use crate::services::sentiment::build_sentiment_source;

/// Build a ranker backed by Polygon data and the configured sentiment backend
pub fn build_ranker(
    config: &ScreenerConfig,
    metrics: Option<Arc<Metrics>>,
    observer: Option<Arc<dyn ScanObserver>>,
) -> Result<TradeRanker, Box<dyn std::error::Error + Send + Sync>> {
    let providers = &config.providers;
    let api_key = providers
        .polygon_api_key
        .clone()
        .ok_or(ProviderError::MissingCredentials("POLYGON_API_KEY"))?;

    let transport = HttpTransport::from_config(providers)?;

    let prices: Arc<dyn PriceHistorySource> = Arc::new(PolygonPriceSource::new(
        transport.clone(),
        providers.polygon_base_url.clone(),
        api_key.clone(),
    ));
    let news: Arc<dyn NewsSource> = Arc::new(PolygonNewsSource::new(
        transport.clone(),
        providers.polygon_base_url.clone(),
        api_key,
    ));
    let sentiment = build_sentiment_source(config.sentiment_backend, providers, transport, news)?;
    let market = Arc::new(VolatilityIndexContext::new(
        prices.clone(),
        providers.market_index_symbol.clone(),
        providers.market_favorable_threshold,
    ));

    info!(
        sentiment = sentiment.name(),
        market_index = %providers.market_index_symbol,
        lookback_days = config.ranker.lookback_days,
        "ranker collaborators configured"
    );

    let mut builder = TradeRanker::builder(prices)
        .sentiment(sentiment)
        .market(market)
        .config(config.ranker.clone());
    if let Some(metrics) = metrics {
        builder = builder.metrics(metrics);
    }
    if let Some(observer) = observer {
        builder = builder.observer(observer);
    }
    Ok(builder.build()?)
}
