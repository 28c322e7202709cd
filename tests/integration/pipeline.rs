//! Configured ranker wired to a mock Polygon server

use std::sync::Arc;

use serde_json::{json, Value};
use tradescan::config::{ScreenerConfig, SentimentBackend};
use tradescan::core::bootstrap::build_ranker;
use tradescan::metrics::Metrics;
use tradescan::tickers::{export_symbols, parse_ticker_table};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY_MS: i64 = 86_400_000;
const START_MS: i64 = 1_704_153_600_000;

fn daily_results(count: i64, close: impl Fn(i64) -> f64) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|day| {
            let c = close(day);
            json!({ "o": c, "h": c + 1.0, "l": c - 1.0, "c": c, "v": 50_000.0, "t": START_MS + day * DAY_MS })
        })
        .collect();
    json!({ "status": "OK", "results": results })
}

async fn mock_polygon() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/aggs/ticker/VIX/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_results(5, |_| 14.5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/aggs/ticker/ACME/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(daily_results(60, |d| 100.0 + d as f64)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/aggs/ticker/FLAT/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_results(60, |_| 20.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/aggs/ticker/GONE/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/reference/news"))
        .and(query_param("ticker", "ACME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "title": "Acme shares surge after record quarter beats estimates" }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/reference/news"))
        .and(query_param("ticker", "FLAT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    server
}

fn config(server: &MockServer) -> ScreenerConfig {
    let mut config = ScreenerConfig::default();
    config.sentiment_backend = SentimentBackend::Lexicon;
    config.providers.polygon_api_key = Some("test-key".to_string());
    config.providers.polygon_base_url = server.uri();
    config.providers.market_index_symbol = "VIX".to_string();
    config.providers.http_retries = 0;
    config
}

#[tokio::test]
async fn uploaded_table_is_ranked_end_to_end() {
    let server = mock_polygon().await;
    let metrics = Arc::new(Metrics::new().unwrap());
    let ranker = build_ranker(&config(&server), Some(metrics.clone()), None).expect("ranker");

    let tickers = parse_ticker_table("Ticker,Name\nflat,Flat Co\nGONE,Gone Inc\nacme,Acme\n").unwrap();
    let report = ranker.scan(&tickers, 10).await.expect("scan");

    assert!(report.market_favorable);
    assert_eq!(report.requested, 3);
    assert_eq!(report.evaluated, 2);

    let acme = &report.candidates[0];
    assert_eq!(acme.symbol, "ACME");
    assert!(acme.sentiment_available);
    assert!(acme.sentiment_score > 0);
    assert!(acme.technical_score > 0.0);
    // Last 50 of 60 bars kept; resistance is the 159 close
    assert_eq!(acme.entry_price, 160.59);

    let flat = &report.candidates[1];
    assert_eq!(flat.symbol, "FLAT");
    assert!(!flat.sentiment_available);

    assert_eq!(export_symbols(&report.candidates).unwrap(), "Ticker\nACME\nFLAT\n");
    assert_eq!(metrics.tickers_skipped_total.get(), 1);
}

#[tokio::test]
async fn missing_polygon_key_is_a_startup_error() {
    let mut config = ScreenerConfig::default();
    config.providers.polygon_api_key = None;

    let err = build_ranker(&config, None, None).err().expect("key required");
    assert!(err.to_string().contains("POLYGON_API_KEY"));
}

#[tokio::test]
async fn llm_backend_without_key_is_a_startup_error() {
    let server = MockServer::start().await;
    let mut config = config(&server);
    config.sentiment_backend = SentimentBackend::Llm;

    let err = build_ranker(&config, None, None).err().expect("key required");
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}
