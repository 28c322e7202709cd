//! Sentiment from an OpenAI-compatible chat completion endpoint

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SentimentScore, SentimentSource};
use crate::error::ProviderError;
use crate::services::http_client::{endpoint, HttpTransport};
use crate::services::news::NewsSource;

const SYSTEM_PROMPT: &str = "You are a financial news analyst. Rate the overall sentiment of the \
headlines for the given stock as a single integer from -100 (very bearish) to 100 (very \
bullish). Reply with the integer only.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

pub struct LlmSentiment {
    transport: HttpTransport,
    news: Arc<dyn NewsSource>,
    base_url: String,
    api_key: String,
    model: String,
    max_headlines: usize,
}

impl LlmSentiment {
    pub fn new(
        transport: HttpTransport,
        news: Arc<dyn NewsSource>,
        base_url: String,
        api_key: String,
        model: String,
        max_headlines: usize,
    ) -> Self {
        Self {
            transport,
            news,
            base_url,
            api_key,
            model,
            max_headlines,
        }
    }

    fn user_prompt(symbol: &str, headlines: &[String]) -> String {
        let mut prompt = format!("Stock: {symbol}\nHeadlines:\n");
        for headline in headlines {
            prompt.push_str("- ");
            prompt.push_str(headline);
            prompt.push('\n');
        }
        prompt
    }
}

/// Interpret the model's reply.
///
/// Accepts a bare number (rounded and clamped) or one of the labels
/// bullish/positive, bearish/negative, neutral. Anything else is malformed.
pub fn parse_sentiment_reply(reply: &str) -> Result<SentimentScore, ProviderError> {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '*')
        .trim();

    if let Ok(value) = cleaned.parse::<f64>() {
        if value.is_finite() {
            return Ok(SentimentScore::new(value.round() as i32));
        }
    }

    match cleaned.to_ascii_lowercase().as_str() {
        "bullish" | "positive" => Ok(SentimentScore::new(SentimentScore::MAX)),
        "bearish" | "negative" => Ok(SentimentScore::new(SentimentScore::MIN)),
        "neutral" => Ok(SentimentScore::NEUTRAL),
        _ => Err(ProviderError::Malformed(format!(
            "non-numeric sentiment reply: {reply:?}"
        ))),
    }
}

#[async_trait]
impl SentimentSource for LlmSentiment {
    async fn score(&self, symbol: &str) -> Result<SentimentScore, ProviderError> {
        let headlines = self.news.headlines(symbol, self.max_headlines).await?;
        if headlines.is_empty() {
            return Err(ProviderError::NoData);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::user_prompt(symbol, &headlines),
                },
            ],
            temperature: 0.0,
        };

        let url = endpoint(&self.base_url, "/chat/completions")?;
        let response: ChatResponse = self
            .transport
            .post_json(url, Some(&self.api_key), &request)
            .await?;

        let reply = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("no choices in completion".to_string()))?;

        debug!(symbol = %symbol, reply = %reply, "sentiment model reply");
        parse_sentiment_reply(&reply)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
