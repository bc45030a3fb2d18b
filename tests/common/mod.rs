#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use tickscope::domain::error::TickscopeError;
use tickscope::domain::pipeline::Analysis;
pub use tickscope::domain::price_record::PriceRecord;
use tickscope::domain::strategy::StrategyParams;
use tickscope::ports::data_port::TickDataPort;
use tickscope::ports::report_port::ReportPort;

pub const TICK_HEADER: &str =
    "day;timestamp;product;bid_price_1;bid_volume_1;ask_price_1;ask_volume_1;mid_price;profit_and_loss";

pub struct MockDataPort {
    pub records: Vec<PriceRecord>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_records(mut self, records: Vec<PriceRecord>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl TickDataPort for MockDataPort {
    fn fetch_all(&self) -> Result<Vec<PriceRecord>, TickscopeError> {
        if let Some(reason) = &self.error {
            return Err(TickscopeError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }
}

/// Captures what the pipeline asks to write instead of touching disk.
pub struct RecordingReport {
    pub written: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for RecordingReport {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), TickscopeError> {
        self.written
            .borrow_mut()
            .push((analysis.product.clone(), output_path.to_path_buf()));
        Ok(())
    }
}

pub fn make_record(product: &str, timestamp: i64, mid: f64) -> PriceRecord {
    PriceRecord {
        product: product.to_string(),
        day: 0,
        timestamp,
        mid_price: mid,
        bid_price_1: mid - 1.0,
        ask_price_1: mid + 1.0,
        profit_and_loss: None,
    }
}

pub fn make_record_with_pnl(product: &str, timestamp: i64, mid: f64, pnl: f64) -> PriceRecord {
    PriceRecord {
        profit_and_loss: Some(pnl),
        ..make_record(product, timestamp, mid)
    }
}

/// One record per price, 100 timestamp units apart.
pub fn make_records(product: &str, prices: &[f64]) -> Vec<PriceRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| make_record(product, i as i64 * 100, p))
        .collect()
}

pub fn params(fast_window: usize, slow_window: usize, threshold: f64, trade_size: f64) -> StrategyParams {
    StrategyParams {
        fast_window,
        slow_window,
        threshold,
        trade_size,
    }
}

/// A tick-file row in the exchange's column order.
pub fn tick_row(day: i64, timestamp: i64, product: &str, mid: &str, pnl: &str) -> String {
    let bid = mid.parse::<f64>().map(|m| m - 1.0).unwrap_or(0.0);
    let ask = mid.parse::<f64>().map(|m| m + 1.0).unwrap_or(0.0);
    format!("{day};{timestamp};{product};{bid};10;{ask};10;{mid};{pnl}")
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_tick_file(rows: &[String]) -> tempfile::NamedTempFile {
    let mut content = String::from(TICK_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    write_temp_file(&content)
}
