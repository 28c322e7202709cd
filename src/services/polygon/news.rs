//! Polygon.io ticker news

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::services::http_client::{endpoint, HttpTransport};
use crate::services::news::NewsSource;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl NewsArticle {
    fn into_headline(self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => format!("{}: {}", self.title.trim(), summary),
            _ => self.title.trim().to_string(),
        }
    }
}

pub struct PolygonNewsSource {
    transport: HttpTransport,
    base_url: String,
    api_key: String,
}

impl PolygonNewsSource {
    pub fn new(transport: HttpTransport, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl NewsSource for PolygonNewsSource {
    async fn headlines(&self, symbol: &str, max_results: usize) -> Result<Vec<String>, ProviderError> {
        let mut url = endpoint(&self.base_url, "/v2/reference/news")?;
        url.query_pairs_mut()
            .append_pair("ticker", symbol)
            .append_pair("limit", &max_results.to_string())
            .append_pair("order", "desc")
            .append_pair("apiKey", &self.api_key);

        let response: NewsResponse = self.transport.get_json(url, None).await?;
        Ok(response
            .results
            .into_iter()
            .filter(|a| !a.title.trim().is_empty())
            .take(max_results)
            .map(NewsArticle::into_headline)
            .collect())
    }
}
