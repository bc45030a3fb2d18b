//! Semicolon-delimited tick file adapter.
//!
//! Columns are located by header name; extra columns are ignored. An empty
//! or non-numeric `mid_price` is forward-filled from the preceding row of the
//! file.

use crate::domain::error::TickscopeError;
use crate::domain::price_record::PriceRecord;
use crate::ports::data_port::TickDataPort;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub const DELIMITER: u8 = b';';

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TickDataPort for CsvAdapter {
    fn fetch_all(&self) -> Result<Vec<PriceRecord>, TickscopeError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TickscopeError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let records = parse_records(&content)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "loaded tick file");
        Ok(records)
    }
}

struct Columns {
    product: usize,
    day: usize,
    timestamp: usize,
    mid_price: usize,
    bid_price_1: usize,
    ask_price_1: usize,
    profit_and_loss: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, TickscopeError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| TickscopeError::Data {
                reason: format!("missing {} column", name),
            })
        };

        Ok(Columns {
            product: require("product")?,
            day: require("day")?,
            timestamp: require("timestamp")?,
            mid_price: require("mid_price")?,
            bid_price_1: require("bid_price_1")?,
            ask_price_1: require("ask_price_1")?,
            profit_and_loss: find("profit_and_loss"),
        })
    }
}

/// Parses a whole tick file into records, in file order.
pub fn parse_records(content: &str) -> Result<Vec<PriceRecord>, TickscopeError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = rdr.headers().map_err(|e| TickscopeError::Data {
        reason: format!("CSV header error: {}", e),
    })?;
    let columns = Columns::from_headers(headers)?;

    let mut records: Vec<PriceRecord> = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| TickscopeError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let mid_price = match parse_optional_f64(&row, columns.mid_price) {
            Some(v) => v,
            None => match records.last() {
                Some(prev) => {
                    tracing::debug!(line, fill = prev.mid_price, "forward-filled mid_price");
                    prev.mid_price
                }
                None => {
                    return Err(TickscopeError::DataParse {
                        line,
                        reason: "missing mid_price on first row".into(),
                    });
                }
            },
        };

        records.push(PriceRecord {
            product: field(&row, columns.product, "product", line)?.to_string(),
            day: parse_i64(&row, columns.day, "day", line)?,
            timestamp: parse_i64(&row, columns.timestamp, "timestamp", line)?,
            mid_price,
            bid_price_1: parse_f64(&row, columns.bid_price_1, "bid_price_1", line)?,
            ask_price_1: parse_f64(&row, columns.ask_price_1, "ask_price_1", line)?,
            profit_and_loss: columns
                .profit_and_loss
                .and_then(|idx| parse_optional_f64(&row, idx)),
        });
    }

    Ok(records)
}

fn field<'a>(
    row: &'a StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> Result<&'a str, TickscopeError> {
    match row.get(idx).map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TickscopeError::DataParse {
            line,
            reason: format!("missing {} value", name),
        }),
    }
}

fn parse_i64(row: &StringRecord, idx: usize, name: &str, line: u64) -> Result<i64, TickscopeError> {
    field(row, idx, name, line)?
        .parse()
        .map_err(|e| TickscopeError::DataParse {
            line,
            reason: format!("invalid {} value: {}", name, e),
        })
}

fn parse_f64(row: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64, TickscopeError> {
    field(row, idx, name, line)?
        .parse()
        .map_err(|e| TickscopeError::DataParse {
            line,
            reason: format!("invalid {} value: {}", name, e),
        })
}

/// `None` for an absent, empty, non-numeric or NaN field.
fn parse_optional_f64(row: &StringRecord, idx: usize) -> Option<f64> {
    row.get(idx)
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}
