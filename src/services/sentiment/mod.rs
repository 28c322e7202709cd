//! News sentiment scoring behind one interface with three backends:
//! a chat-completion model, a hosted finance classifier and a local lexicon.

pub mod classifier;
pub mod lexicon;
pub mod llm;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderConfig, SentimentBackend};
use crate::error::ProviderError;
use crate::services::http_client::HttpTransport;
use crate::services::news::NewsSource;

pub use classifier::ClassifierSentiment;
pub use lexicon::LexiconSentiment;
pub use llm::LlmSentiment;

/// Signed sentiment, -100 (bearish) to +100 (bullish)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SentimentScore(i32);

impl SentimentScore {
    pub const NEUTRAL: SentimentScore = SentimentScore(0);
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    /// Clamps into [-100, 100]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Scale a [-1, 1] value to the integer range
    pub fn from_unit(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        Self::new((value.clamp(-1.0, 1.0) * 100.0).round() as i32)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn score(&self, symbol: &str) -> Result<SentimentScore, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Mean of per-headline [-1, 1] scores, scaled to a `SentimentScore`
pub(crate) fn average_unit_scores(scores: &[f64]) -> Result<SentimentScore, ProviderError> {
    if scores.is_empty() {
        return Err(ProviderError::NoData);
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    Ok(SentimentScore::from_unit(mean))
}

/// Construct the configured backend
pub fn build_sentiment_source(
    backend: SentimentBackend,
    config: &ProviderConfig,
    transport: HttpTransport,
    news: Arc<dyn NewsSource>,
) -> Result<Arc<dyn SentimentSource>, ProviderError> {
    let source: Arc<dyn SentimentSource> = match backend {
        SentimentBackend::Llm => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or(ProviderError::MissingCredentials("OPENAI_API_KEY"))?;
            Arc::new(LlmSentiment::new(
                transport,
                news,
                config.openai_base_url.clone(),
                api_key,
                config.openai_model.clone(),
                config.news_max_results,
            ))
        }
        SentimentBackend::Classifier => {
            let token = config
                .hf_api_token
                .clone()
                .ok_or(ProviderError::MissingCredentials("HF_API_TOKEN"))?;
            Arc::new(ClassifierSentiment::new(
                transport,
                news,
                config.hf_base_url.clone(),
                token,
                config.classifier_model.clone(),
                config.news_max_results,
            ))
        }
        SentimentBackend::Lexicon => {
            Arc::new(LexiconSentiment::new(news, config.news_max_results))
        }
    };
    Ok(source)
}
