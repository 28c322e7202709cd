//! Prometheus metrics for the HTTP surface and scan pipeline

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub scans_total: IntCounter,
    pub tickers_evaluated_total: IntCounter,
    pub tickers_skipped_total: IntCounter,
    pub sentiment_failures_total: IntCounter,
    pub candidates_ranked: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let scans_total = IntCounter::with_opts(Opts::new("scans_total", "Completed ranking scans"))?;
        let tickers_evaluated_total = IntCounter::with_opts(Opts::new(
            "tickers_evaluated_total",
            "Tickers that produced a trade candidate",
        ))?;
        let tickers_skipped_total = IntCounter::with_opts(Opts::new(
            "tickers_skipped_total",
            "Tickers skipped for missing or unusable price data",
        ))?;
        let sentiment_failures_total = IntCounter::with_opts(Opts::new(
            "sentiment_failures_total",
            "Sentiment lookups that fell back to neutral",
        ))?;
        let candidates_ranked = Gauge::with_opts(Opts::new(
            "candidates_ranked",
            "Candidates returned by the most recent scan",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(tickers_evaluated_total.clone()))?;
        registry.register(Box::new(tickers_skipped_total.clone()))?;
        registry.register(Box::new(sentiment_failures_total.clone()))?;
        registry.register(Box::new(candidates_ranked.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            scans_total,
            tickers_evaluated_total,
            tickers_skipped_total,
            sentiment_failures_total,
            candidates_ranked,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
