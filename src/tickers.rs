//! Ticker list import from uploaded tables and single-column export

use csv::{ReaderBuilder, StringRecord, Trim, Writer};

use crate::error::ScreenerError;
use crate::models::candidate::TradeCandidate;

/// Accepted header names for the symbol column, in order of preference
pub const TICKER_COLUMNS: [&str; 3] = ["Ticker", "Symbol", "Tickers"];

/// Position of the ticker column in a header row
fn find_ticker_column(header: &StringRecord) -> Option<usize> {
    TICKER_COLUMNS
        .iter()
        .find_map(|wanted| header.iter().position(|name| name.eq_ignore_ascii_case(wanted)))
}

fn table_error(e: csv::Error) -> ScreenerError {
    ScreenerError::MalformedTable(e.to_string())
}

/// Read symbols from a comma-separated table with a `Ticker`, `Symbol` or
/// `Tickers` column.
///
/// Quoted fields may contain commas and line breaks. Short rows are skipped.
pub fn parse_ticker_table(text: &str) -> Result<Vec<String>, ScreenerError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers().map_err(table_error)?.clone();
    let column = find_ticker_column(&header).ok_or_else(|| ScreenerError::MissingTickerColumn {
        columns: header.iter().map(str::to_string).collect(),
    })?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.map_err(table_error)?;
        if let Some(symbol) = record.get(column).filter(|s| !s.is_empty()) {
            symbols.push(symbol.to_ascii_uppercase());
        }
    }

    if symbols.is_empty() {
        return Err(ScreenerError::EmptyTickerList);
    }
    Ok(symbols)
}

/// Single-column table of the candidates' symbols, in rank order
pub fn export_symbols(candidates: &[TradeCandidate]) -> Result<String, ScreenerError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Ticker"]).map_err(table_error)?;
    for candidate in candidates {
        writer
            .write_record([candidate.symbol.as_str()])
            .map_err(table_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ScreenerError::MalformedTable(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ScreenerError::MalformedTable(e.to_string()))
}
