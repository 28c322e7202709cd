//! Polygon.io daily aggregates

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::indicators::PriceBar;
use crate::services::http_client::{endpoint_segments, HttpTransport};
use crate::services::market_data::PriceHistorySource;

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Option<Vec<AggregateBar>>,
}

#[derive(Debug, Deserialize)]
struct AggregateBar {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    #[serde(default)]
    v: f64,
    /// Bar start, epoch milliseconds
    t: i64,
}

impl AggregateBar {
    fn into_price_bar(self) -> Result<PriceBar, ProviderError> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(self.t)
            .ok_or_else(|| ProviderError::Malformed(format!("bad timestamp {}", self.t)))?;
        Ok(PriceBar::new(self.o, self.h, self.l, self.c, self.v, timestamp))
    }
}

pub struct PolygonPriceSource {
    transport: HttpTransport,
    base_url: String,
    api_key: String,
}

impl PolygonPriceSource {
    pub fn new(transport: HttpTransport, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Calendar range wide enough to hold `lookback_days` trading days
    fn date_range(today: NaiveDate, lookback_days: u32) -> (NaiveDate, NaiveDate) {
        let calendar_days = i64::from(lookback_days) * 7 / 5 + 10;
        (today - Duration::days(calendar_days), today)
    }
}

#[async_trait]
impl PriceHistorySource for PolygonPriceSource {
    async fn fetch(&self, symbol: &str, lookback_days: u32) -> Result<Vec<PriceBar>, ProviderError> {
        let (from, to) = Self::date_range(Utc::now().date_naive(), lookback_days);
        let (from, to) = (from.to_string(), to.to_string());
        let mut url = endpoint_segments(
            &self.base_url,
            &["v2", "aggs", "ticker", symbol, "range", "1", "day", from.as_str(), to.as_str()],
        )?;
        url.query_pairs_mut()
            .append_pair("adjusted", "true")
            .append_pair("sort", "asc")
            .append_pair("limit", "50000")
            .append_pair("apiKey", &self.api_key);

        let response: AggregatesResponse = self.transport.get_json(url, None).await?;
        let raw = response.results.unwrap_or_default();
        if raw.is_empty() {
            return Err(ProviderError::NoData);
        }

        let mut bars = raw
            .into_iter()
            .map(AggregateBar::into_price_bar)
            .collect::<Result<Vec<_>, _>>()?;
        bars.sort_by_key(|b| b.timestamp);

        let keep = lookback_days as usize;
        if bars.len() > keep {
            bars.drain(..bars.len() - keep);
        }

        debug!(symbol = %symbol, bars = bars.len(), "fetched daily bars");
        Ok(bars)
    }
}
