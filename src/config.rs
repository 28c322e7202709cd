//! Environment-driven configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

/// Where the entry sits relative to the 20-bar resistance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStyle {
    /// Enter just above resistance (x1.01)
    Breakout,
    /// Enter just below resistance (x0.99)
    Anticipatory,
}

impl EntryStyle {
    pub fn multiplier(self) -> f64 {
        match self {
            EntryStyle::Breakout => 1.01,
            EntryStyle::Anticipatory => 0.99,
        }
    }
}

impl FromStr for EntryStyle {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakout" => Ok(EntryStyle::Breakout),
            "anticipatory" => Ok(EntryStyle::Anticipatory),
            other => Err(ScreenerError::InvalidConfig(format!(
                "unknown entry style '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStrategy {
    /// resistance - k * ATR(14)
    Volatility,
    /// entry - k * stdev(close)
    Dispersion,
}

impl FromStr for StopStrategy {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volatility" | "atr" => Ok(StopStrategy::Volatility),
            "dispersion" | "stdev" => Ok(StopStrategy::Dispersion),
            other => Err(ScreenerError::InvalidConfig(format!(
                "unknown stop strategy '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBackend {
    Llm,
    Classifier,
    Lexicon,
}

impl FromStr for SentimentBackend {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llm" | "openai" => Ok(SentimentBackend::Llm),
            "classifier" | "finbert" => Ok(SentimentBackend::Classifier),
            "lexicon" | "vader" => Ok(SentimentBackend::Lexicon),
            other => Err(ScreenerError::InvalidConfig(format!(
                "unknown sentiment backend '{other}'"
            ))),
        }
    }
}

/// Weights of the linear confidence formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub sentiment: f64,
    pub relative_volume: f64,
    pub market_favorable: f64,
    pub accumulation: f64,
    pub distribution: f64,
    pub momentum: f64,
    /// Bonus for closing within 2% of resistance. Off by default.
    pub near_resistance: f64,
    /// Magnitude of each technical check (RSI, moving averages, MACD)
    pub technical_step: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            sentiment: 0.2,
            relative_volume: 10.0,
            market_favorable: 20.0,
            accumulation: 15.0,
            distribution: -10.0,
            momentum: 10.0,
            near_resistance: 0.0,
            technical_step: 10.0,
        }
    }
}

impl ConfidenceWeights {
    /// Confidence must not fall when a bullish input rises, nor rise on a
    /// bearish one.
    pub fn validate(&self) -> Result<(), ScreenerError> {
        let bullish = [
            ("sentiment", self.sentiment),
            ("relative_volume", self.relative_volume),
            ("market_favorable", self.market_favorable),
            ("accumulation", self.accumulation),
            ("momentum", self.momentum),
            ("near_resistance", self.near_resistance),
            ("technical_step", self.technical_step),
        ];
        if let Some((name, _)) = bullish.iter().find(|(_, w)| *w < 0.0 || !w.is_finite()) {
            return Err(ScreenerError::InvalidConfig(format!(
                "weight '{name}' must be a non-negative number"
            )));
        }
        if self.distribution > 0.0 || !self.distribution.is_finite() {
            return Err(ScreenerError::InvalidConfig(
                "weight 'distribution' must be zero or negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the trade plan and ranking pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    pub lookback_days: u32,
    pub resistance_window: usize,
    pub atr_period: u32,
    pub entry_style: EntryStyle,
    pub stop_strategy: StopStrategy,
    pub atr_multiplier: f64,
    /// Use 1.5x ATR under volume contraction and 2.5x otherwise
    pub adaptive_stop: bool,
    pub dispersion_multiplier: f64,
    pub risk_reward: f64,
    pub weights: ConfidenceWeights,
    pub default_top_n: usize,
    pub concurrency: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            lookback_days: 50,
            resistance_window: 20,
            atr_period: 14,
            entry_style: EntryStyle::Breakout,
            stop_strategy: StopStrategy::Volatility,
            atr_multiplier: 2.0,
            adaptive_stop: false,
            dispersion_multiplier: 2.0,
            risk_reward: 2.0,
            weights: ConfidenceWeights::default(),
            default_top_n: 10,
            concurrency: 1,
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<(), ScreenerError> {
        if self.lookback_days == 0 {
            return Err(ScreenerError::InvalidConfig(
                "lookback_days must be positive".to_string(),
            ));
        }
        if self.resistance_window == 0 || self.atr_period == 0 {
            return Err(ScreenerError::InvalidConfig(
                "indicator windows must be positive".to_string(),
            ));
        }
        if self.risk_reward <= 0.0 || !self.risk_reward.is_finite() {
            return Err(ScreenerError::InvalidConfig(
                "risk_reward must be positive".to_string(),
            ));
        }
        let multipliers = [
            ("atr_multiplier", self.atr_multiplier),
            ("dispersion_multiplier", self.dispersion_multiplier),
        ];
        if let Some((name, _)) = multipliers.iter().find(|(_, k)| *k <= 0.0 || !k.is_finite()) {
            return Err(ScreenerError::InvalidConfig(format!(
                "{name} must be a positive number"
            )));
        }
        if self.default_top_n == 0 {
            return Err(ScreenerError::InvalidTopN);
        }
        self.weights.validate()
    }
}

/// Endpoints, credentials and transport policy for external services
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub polygon_api_key: Option<String>,
    pub polygon_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub hf_api_token: Option<String>,
    pub hf_base_url: String,
    pub classifier_model: String,
    pub news_max_results: usize,
    pub market_index_symbol: String,
    pub market_favorable_threshold: f64,
    pub http_timeout: Duration,
    pub http_retries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            polygon_api_key: None,
            polygon_base_url: "https://api.polygon.io".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4".to_string(),
            hf_api_token: None,
            hf_base_url: "https://api-inference.huggingface.co".to_string(),
            classifier_model: "ProsusAI/finbert".to_string(),
            news_max_results: 5,
            market_index_symbol: "I:VIX".to_string(),
            market_favorable_threshold: 20.0,
            http_timeout: Duration::from_secs(10),
            http_retries: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    pub ranker: RankerConfig,
    pub providers: ProviderConfig,
    pub sentiment_backend: SentimentBackend,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            ranker: RankerConfig::default(),
            providers: ProviderConfig::default(),
            sentiment_backend: SentimentBackend::Lexicon,
        }
    }
}

impl ScreenerConfig {
    /// Load from process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self, ScreenerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScreenerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let r = &mut config.ranker;
        let p = &mut config.providers;

        if let Some(v) = parse_opt(&lookup, "LOOKBACK_DAYS")? {
            r.lookback_days = v;
        }
        if let Some(v) = parse_opt(&lookup, "RISK_REWARD")? {
            r.risk_reward = v;
        }
        if let Some(v) = parse_opt(&lookup, "ENTRY_STYLE")? {
            r.entry_style = v;
        }
        if let Some(v) = parse_opt(&lookup, "STOP_STRATEGY")? {
            r.stop_strategy = v;
        }
        if let Some(v) = parse_opt(&lookup, "ATR_MULTIPLIER")? {
            r.atr_multiplier = v;
        }
        if let Some(v) = parse_opt(&lookup, "DISPERSION_MULTIPLIER")? {
            r.dispersion_multiplier = v;
        }
        if let Some(v) = parse_opt(&lookup, "NEAR_RESISTANCE_WEIGHT")? {
            r.weights.near_resistance = v;
        }
        if let Some(v) = parse_opt(&lookup, "ADAPTIVE_STOP")? {
            r.adaptive_stop = v;
        }
        if let Some(v) = parse_opt(&lookup, "TOP_N")? {
            r.default_top_n = v;
        }
        if let Some(v) = parse_opt::<usize, _>(&lookup, "SCAN_CONCURRENCY")? {
            r.concurrency = v.max(1);
        }

        if let Some(v) = parse_opt(&lookup, "SENTIMENT_BACKEND")? {
            config.sentiment_backend = v;
        }

        p.polygon_api_key = non_empty(lookup("POLYGON_API_KEY"));
        p.openai_api_key = non_empty(lookup("OPENAI_API_KEY"));
        p.hf_api_token = non_empty(lookup("HF_API_TOKEN"));
        if let Some(v) = non_empty(lookup("POLYGON_BASE_URL")) {
            p.polygon_base_url = v;
        }
        if let Some(v) = non_empty(lookup("OPENAI_BASE_URL")) {
            p.openai_base_url = v;
        }
        if let Some(v) = non_empty(lookup("OPENAI_MODEL")) {
            p.openai_model = v;
        }
        if let Some(v) = non_empty(lookup("HF_BASE_URL")) {
            p.hf_base_url = v;
        }
        if let Some(v) = non_empty(lookup("CLASSIFIER_MODEL")) {
            p.classifier_model = v;
        }
        if let Some(v) = non_empty(lookup("MARKET_INDEX_SYMBOL")) {
            p.market_index_symbol = v;
        }
        if let Some(v) = parse_opt(&lookup, "NEWS_MAX_RESULTS")? {
            p.news_max_results = v;
        }
        if let Some(v) = parse_opt(&lookup, "MARKET_FAVORABLE_THRESHOLD")? {
            p.market_favorable_threshold = v;
        }
        if let Some(v) = parse_opt(&lookup, "HTTP_TIMEOUT_SECONDS")? {
            p.http_timeout = Duration::from_secs(v);
        }
        if let Some(v) = parse_opt(&lookup, "HTTP_RETRIES")? {
            p.http_retries = v;
        }

        config.ranker.validate()?;
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ScreenerError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ScreenerError::InvalidConfig(format!("{key}={raw} is not valid"))),
    }
}
