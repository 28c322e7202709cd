//! Command-line scan: `tradescan <tickers.csv> [top_n]`

use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::info;
use tradescan::config::ScreenerConfig;
use tradescan::core::bootstrap::build_ranker;
use tradescan::logging;
use tradescan::models::TradeCandidate;
use tradescan::ranker::LoggingObserver;
use tradescan::tickers::{export_symbols, parse_ticker_table};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: tradescan <tickers.csv> [top_n]")?;

    let config = ScreenerConfig::from_env()?;
    let top_n = match args.next() {
        Some(raw) => raw.parse::<usize>().map_err(|_| format!("invalid top_n '{raw}'"))?,
        None => config.ranker.default_top_n,
    };

    let table = tokio::fs::read_to_string(&path).await?;
    let tickers = parse_ticker_table(&table)?;
    info!(path = %path, tickers = tickers.len(), "loaded ticker list");

    let ranker = build_ranker(&config, None, Some(Arc::new(LoggingObserver)))?;
    let report = ranker.scan(&tickers, top_n).await?;

    println!(
        "Top {} of {} tickers ({} with usable data, market favourable: {})",
        report.candidates.len(),
        report.requested,
        report.evaluated,
        report.market_favorable
    );
    print_table(&report.candidates);
    println!();
    print!("{}", export_symbols(&report.candidates)?);

    Ok(())
}

fn print_table(candidates: &[TradeCandidate]) {
    println!(
        "{:<4} {:<8} {:>10} {:>10} {:>10} {:>9} {:>12} {:>10}",
        "#", "Symbol", "Entry", "Stop", "Target", "Sentiment", "Zone", "Confidence"
    );
    for (i, c) in candidates.iter().enumerate() {
        let sentiment = if c.sentiment_available {
            c.sentiment_score.to_string()
        } else {
            "n/a".to_string()
        };
        println!(
            "{:<4} {:<8} {:>10.2} {:>10.2} {:>10.2} {:>9} {:>12} {:>10.2}",
            i + 1,
            c.symbol,
            c.entry_price,
            c.stop_loss,
            c.exit_target,
            sentiment,
            c.ad_zone.to_string(),
            c.confidence
        );
    }
}
