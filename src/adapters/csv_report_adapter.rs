//! Derived-series CSV report.
//!
//! One comma-separated row per derived record, with a header row. RSI is left
//! empty where it is undefined.

use crate::domain::error::TickscopeError;
use crate::domain::pipeline::Analysis;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    product: &'a str,
    day: i64,
    timestamp: i64,
    mid_price: f64,
    ma_fast: f64,
    ma_slow: f64,
    signal: i8,
    crossover: i8,
    rsi: Option<f64>,
    cumulative_pnl: f64,
}

fn rows(analysis: &Analysis) -> impl Iterator<Item = ReportRow<'_>> {
    analysis
        .backtest
        .records
        .iter()
        .enumerate()
        .map(|(i, d)| ReportRow {
            product: &analysis.product,
            day: d.record.day,
            timestamp: d.record.timestamp,
            mid_price: d.record.mid_price,
            ma_fast: d.ma_fast,
            ma_slow: d.ma_slow,
            signal: d.signal.value(),
            crossover: d.crossover,
            rsi: analysis.rsi.values.get(i).copied().flatten(),
            cumulative_pnl: d.cumulative_pnl,
        })
}

fn report_err(path: &Path, e: impl std::fmt::Display) -> TickscopeError {
    TickscopeError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), TickscopeError> {
        self.write_all(std::slice::from_ref(analysis), output_path)
    }

    /// All analyses go to one file under a single header.
    fn write_all(&self, analyses: &[Analysis], output_path: &Path) -> Result<(), TickscopeError> {
        let file = File::create(output_path).map_err(|e| report_err(output_path, e))?;
        let mut wtr = csv::Writer::from_writer(file);

        let mut written = 0usize;
        for analysis in analyses {
            for row in rows(analysis) {
                wtr.serialize(row).map_err(|e| report_err(output_path, e))?;
                written += 1;
            }
        }
        if written == 0 {
            // serde only emits the header with the first row
            wtr.write_record([
                "product",
                "day",
                "timestamp",
                "mid_price",
                "ma_fast",
                "ma_slow",
                "signal",
                "crossover",
                "rsi",
                "cumulative_pnl",
            ])
            .map_err(|e| report_err(output_path, e))?;
        }
        wtr.flush().map_err(|e| report_err(output_path, e))?;

        tracing::debug!(path = %output_path.display(), rows = written, "wrote derived series report");
        Ok(())
    }
}
