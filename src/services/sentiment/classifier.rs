//! Sentiment from a hosted finance-domain text classifier (FinBERT-style
//! positive / neutral / negative labels)

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{average_unit_scores, SentimentScore, SentimentSource};
use crate::error::ProviderError;
use crate::services::http_client::{endpoint, HttpTransport};
use crate::services::news::NewsSource;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

pub struct ClassifierSentiment {
    transport: HttpTransport,
    news: Arc<dyn NewsSource>,
    base_url: String,
    api_token: String,
    model: String,
    max_headlines: usize,
}

impl ClassifierSentiment {
    pub fn new(
        transport: HttpTransport,
        news: Arc<dyn NewsSource>,
        base_url: String,
        api_token: String,
        model: String,
        max_headlines: usize,
    ) -> Self {
        Self {
            transport,
            news,
            base_url,
            api_token,
            model,
            max_headlines,
        }
    }
}

/// +1 / 0 / -1 for the most likely label of one headline
pub fn label_polarity(labels: &[LabelScore]) -> Result<f64, ProviderError> {
    let top = labels
        .iter()
        .filter(|l| l.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ProviderError::Malformed("empty label list".to_string()))?;

    match top.label.to_ascii_lowercase().as_str() {
        "positive" => Ok(1.0),
        "neutral" => Ok(0.0),
        "negative" => Ok(-1.0),
        other => Err(ProviderError::Malformed(format!("unknown label {other}"))),
    }
}

#[async_trait]
impl SentimentSource for ClassifierSentiment {
    async fn score(&self, symbol: &str) -> Result<SentimentScore, ProviderError> {
        let headlines = self.news.headlines(symbol, self.max_headlines).await?;
        if headlines.is_empty() {
            return Err(ProviderError::NoData);
        }

        let url = endpoint(&self.base_url, &format!("/models/{}", self.model))?;
        let predictions: Vec<Vec<LabelScore>> = self
            .transport
            .post_json(url, Some(&self.api_token), &ClassifyRequest { inputs: &headlines })
            .await?;

        if predictions.len() != headlines.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} predictions, got {}",
                headlines.len(),
                predictions.len()
            )));
        }

        let polarities = predictions
            .iter()
            .map(|labels| label_polarity(labels))
            .collect::<Result<Vec<_>, _>>()?;
        average_unit_scores(&polarities)
    }

    fn name(&self) -> &'static str {
        "classifier"
    }
}
