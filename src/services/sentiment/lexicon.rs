//! Local lexicon-based headline scorer.
//!
//! Each headline gets a compound score in [-1, 1]: word valences are summed
//! (flipped and damped after a negation) and squashed with
//! `sum / sqrt(sum^2 + ALPHA)`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use super::{average_unit_scores, SentimentScore, SentimentSource};
use crate::error::ProviderError;
use crate::services::news::NewsSource;

const ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const NEGATION_REACH: usize = 3;

pub struct HeadlineLexicon {
    valences: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl HeadlineLexicon {
    pub fn new() -> Self {
        Self {
            valences: Self::build_valences(),
            negations: Self::build_negations(),
        }
    }

    /// Compound score of one headline in [-1, 1]
    pub fn compound(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.valences.get(token) else {
                continue;
            };
            let start = i.saturating_sub(NEGATION_REACH);
            let negated = tokens[start..i].iter().any(|t| self.is_negation(t));
            sum += if negated {
                valence * NEGATION_SCALAR
            } else {
                valence
            };
        }

        if sum == 0.0 {
            return 0.0;
        }
        sum / (sum * sum + ALPHA).sqrt()
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }

    fn build_valences() -> HashMap<&'static str, f64> {
        [
            // Strong positives
            ("surge", 2.6), ("surges", 2.6), ("soar", 2.7), ("soars", 2.7),
            ("skyrocket", 2.8), ("skyrockets", 2.8), ("record", 1.9), ("beat", 1.8),
            ("beats", 1.8), ("outperform", 2.0), ("outperforms", 2.0), ("upgrade", 2.1),
            ("upgraded", 2.1), ("breakthrough", 2.5), ("bullish", 2.4), ("rally", 2.2),
            ("rallies", 2.2), ("boom", 2.3),
            // Moderate positives
            ("gain", 1.6), ("gains", 1.6), ("growth", 1.6), ("growing", 1.4), ("rise", 1.3),
            ("rises", 1.3), ("strong", 1.8), ("stronger", 1.8), ("profit", 1.7),
            ("profitable", 1.8), ("exceeds", 1.9), ("exceeded", 1.9), ("raise", 1.2),
            ("raises", 1.2), ("raised", 1.2), ("optimistic", 2.0), ("positive", 1.8),
            ("improve", 1.6), ("improved", 1.6), ("improves", 1.6), ("expansion", 1.4),
            ("win", 2.0), ("wins", 2.0), ("approval", 1.7), ("approved", 1.7),
            ("buyback", 1.3), ("dividend", 1.0), ("partnership", 1.2), ("upside", 1.6),
            ("robust", 1.8), ("solid", 1.5), ("confident", 1.9),
            // Moderate negatives
            ("miss", -1.8), ("misses", -1.8), ("missed", -1.8), ("decline", -1.6),
            ("declines", -1.6), ("drop", -1.6), ("drops", -1.6), ("fall", -1.5),
            ("falls", -1.5), ("weak", -1.8), ("weaker", -1.8), ("loss", -1.9),
            ("losses", -1.9), ("cut", -1.4), ("cuts", -1.4), ("lower", -1.0),
            ("lowers", -1.2), ("concern", -1.4), ("concerns", -1.4), ("risk", -1.1),
            ("risks", -1.1), ("delay", -1.3), ("delays", -1.3), ("negative", -1.8),
            ("pessimistic", -2.0), ("warning", -1.8), ("warns", -1.8), ("layoffs", -2.0),
            ("investigation", -1.9), ("lawsuit", -2.0), ("recall", -1.8), ("downside", -1.6),
            // Strong negatives
            ("plunge", -2.7), ("plunges", -2.7), ("crash", -3.0), ("crashes", -3.0),
            ("tumble", -2.4), ("tumbles", -2.4), ("slump", -2.3), ("slumps", -2.3),
            ("downgrade", -2.1), ("downgraded", -2.1), ("bearish", -2.4),
            ("bankruptcy", -3.2), ("fraud", -3.3), ("default", -2.5), ("selloff", -2.4),
        ]
        .into_iter()
        .collect()
    }

    fn build_negations() -> HashSet<&'static str> {
        [
            "not", "no", "never", "none", "nothing", "neither", "nor", "without",
            "hardly", "barely", "cannot", "fails", "failed", "fail",
        ]
        .into_iter()
        .collect()
    }
}

impl Default for HeadlineLexicon {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LexiconSentiment {
    news: Arc<dyn NewsSource>,
    lexicon: HeadlineLexicon,
    max_headlines: usize,
}

impl LexiconSentiment {
    pub fn new(news: Arc<dyn NewsSource>, max_headlines: usize) -> Self {
        Self {
            news,
            lexicon: HeadlineLexicon::new(),
            max_headlines,
        }
    }

    /// Score already fetched headlines
    pub fn score_headlines(&self, headlines: &[String]) -> Result<SentimentScore, ProviderError> {
        let compounds: Vec<f64> = headlines.iter().map(|h| self.lexicon.compound(h)).collect();
        average_unit_scores(&compounds)
    }
}

#[async_trait]
impl SentimentSource for LexiconSentiment {
    async fn score(&self, symbol: &str) -> Result<SentimentScore, ProviderError> {
        let headlines = self.news.headlines(symbol, self.max_headlines).await?;
        self.score_headlines(&headlines)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
