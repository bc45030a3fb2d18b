//! Moving-average crossover signals.
//!
//! For each record, `diff = SMA(fast) - SMA(slow)` of the mid price is
//! discretised against a symmetric threshold band into a [`Signal`], and
//! `crossover[i] = signal[i] - signal[i-1]` (0 at the first record).
//! Only a crossover of magnitude 2, a full flip from bearish to bullish or back
//! in one step, is a trade trigger. Magnitude 1 means entering or leaving the
//! neutral band.

use crate::domain::error::TickscopeError;
use crate::domain::indicator::sma::rolling_mean;
use crate::domain::price_record::PriceRecord;
use std::fmt;

pub const BULLISH_CROSSOVER: i8 = 2;
pub const BEARISH_CROSSOVER: i8 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Bearish,
    Neutral,
    Bullish,
}

impl Signal {
    pub fn from_diff(diff: f64, threshold: f64) -> Self {
        if diff > threshold {
            Signal::Bullish
        } else if diff < -threshold {
            Signal::Bearish
        } else {
            Signal::Neutral
        }
    }

    /// -1, 0 or 1.
    pub fn value(self) -> i8 {
        match self {
            Signal::Bearish => -1,
            Signal::Neutral => 0,
            Signal::Bullish => 1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A price record augmented with the signal pipeline outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: PriceRecord,
    pub ma_fast: f64,
    pub ma_slow: f64,
    pub signal: Signal,
    pub crossover: i8,
    /// Realized + unrealized PnL; 0 until a backtest pass fills it.
    pub cumulative_pnl: f64,
}

impl DerivedRecord {
    pub fn diff(&self) -> f64 {
        self.ma_fast - self.ma_slow
    }

    pub fn is_bullish_flip(&self) -> bool {
        self.crossover == BULLISH_CROSSOVER
    }

    pub fn is_bearish_flip(&self) -> bool {
        self.crossover == BEARISH_CROSSOVER
    }
}

/// Computes fast/slow moving averages, signals and crossovers for a series.
///
/// Returns a new sequence aligned to `records`; the input is left untouched.
/// Fails only when either window is zero.
pub fn generate_signals(
    records: &[PriceRecord],
    fast_window: usize,
    slow_window: usize,
    threshold: f64,
) -> Result<Vec<DerivedRecord>, TickscopeError> {
    let mid_prices: Vec<f64> = records.iter().map(|r| r.mid_price).collect();
    let ma_fast = rolling_mean(&mid_prices, fast_window)?;
    let ma_slow = rolling_mean(&mid_prices, slow_window)?;

    let mut derived: Vec<DerivedRecord> = Vec::with_capacity(records.len());
    let mut prev_signal: Option<Signal> = None;

    for (i, record) in records.iter().enumerate() {
        let signal = Signal::from_diff(ma_fast[i] - ma_slow[i], threshold);
        let crossover = match prev_signal {
            Some(prev) => signal.value() - prev.value(),
            None => 0,
        };
        prev_signal = Some(signal);

        derived.push(DerivedRecord {
            record: record.clone(),
            ma_fast: ma_fast[i],
            ma_slow: ma_slow[i],
            signal,
            crossover,
            cumulative_pnl: 0.0,
        });
    }

    tracing::debug!(
        records = derived.len(),
        fast_window,
        slow_window,
        threshold,
        flips = derived.iter().filter(|d| d.crossover.abs() == 2).count(),
        "generated signals"
    );

    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_records(prices: &[f64]) -> Vec<PriceRecord> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &mid)| PriceRecord {
                product: "TEST".into(),
                day: 0,
                timestamp: i as i64 * 100,
                mid_price: mid,
                bid_price_1: mid - 0.5,
                ask_price_1: mid + 0.5,
                profit_and_loss: None,
            })
            .collect()
    }

    fn signals(derived: &[DerivedRecord]) -> Vec<i8> {
        derived.iter().map(|d| d.signal.value()).collect()
    }

    fn crossovers(derived: &[DerivedRecord]) -> Vec<i8> {
        derived.iter().map(|d| d.crossover).collect()
    }

    #[test]
    fn signal_from_diff_band() {
        assert_eq!(Signal::from_diff(0.6, 0.5), Signal::Bullish);
        assert_eq!(Signal::from_diff(-0.6, 0.5), Signal::Bearish);
        assert_eq!(Signal::from_diff(0.5, 0.5), Signal::Neutral);
        assert_eq!(Signal::from_diff(-0.5, 0.5), Signal::Neutral);
        assert_eq!(Signal::from_diff(0.0, 0.0), Signal::Neutral);
    }

    #[test]
    fn signal_display_is_numeric() {
        assert_eq!(Signal::Bearish.to_string(), "-1");
        assert_eq!(Signal::Neutral.to_string(), "0");
        assert_eq!(Signal::Bullish.to_string(), "1");
    }

    #[test]
    fn five_price_example() {
        let records = make_records(&[100.0, 101.0, 99.0, 105.0, 95.0]);
        let derived = generate_signals(&records, 2, 3, 0.0).unwrap();

        let fast: Vec<f64> = derived.iter().map(|d| d.ma_fast).collect();
        let expected_fast = [100.0, 100.5, 100.0, 102.0, 100.0];
        for (got, want) in fast.iter().zip(expected_fast) {
            assert_relative_eq!(*got, want);
        }

        let slow: Vec<f64> = derived.iter().map(|d| d.ma_slow).collect();
        let expected_slow = [100.0, 100.5, 100.0, 305.0 / 3.0, 299.0 / 3.0];
        for (got, want) in slow.iter().zip(expected_slow) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }

        assert_eq!(signals(&derived), vec![0, 0, 0, 1, 1]);
        assert_eq!(crossovers(&derived), vec![0, 0, 0, 1, 0]);
    }

    #[test]
    fn full_flip_produces_magnitude_two() {
        let records = make_records(&[10.0, 12.0, 14.0, 8.0, 4.0, 12.0, 20.0]);
        let derived = generate_signals(&records, 1, 2, 0.0).unwrap();

        // diffs: 0, 1, 1, -3, -2, 4, 4
        assert_eq!(signals(&derived), vec![0, 1, 1, -1, -1, 1, 1]);
        assert_eq!(crossovers(&derived), vec![0, 1, 0, -2, 0, 2, 0]);
        assert!(derived[3].is_bearish_flip());
        assert!(derived[5].is_bullish_flip());
    }

    #[test]
    fn threshold_suppresses_small_moves() {
        let records = make_records(&[10.0, 12.0, 14.0, 8.0, 4.0, 12.0, 20.0]);
        let derived = generate_signals(&records, 1, 2, 2.5).unwrap();

        assert_eq!(signals(&derived), vec![0, 0, 0, -1, 0, 1, 1]);
        assert_eq!(crossovers(&derived), vec![0, 0, 0, -1, 1, 1, 0]);
    }

    #[test]
    fn first_crossover_is_zero_even_when_bullish() {
        let records = make_records(&[1.0]);
        let derived = generate_signals(&records, 1, 1, -1.0).unwrap();
        assert_eq!(derived[0].signal, Signal::Bullish);
        assert_eq!(derived[0].crossover, 0);
    }

    #[test]
    fn input_records_are_preserved() {
        let records = make_records(&[100.0, 101.0, 99.0]);
        let snapshot = records.clone();
        let derived = generate_signals(&records, 2, 3, 0.0).unwrap();

        assert_eq!(records, snapshot);
        for (d, r) in derived.iter().zip(&records) {
            assert_eq!(&d.record, r);
            assert_eq!(d.cumulative_pnl, 0.0);
        }
    }

    #[test]
    fn empty_series() {
        let derived = generate_signals(&[], 2, 3, 0.0).unwrap();
        assert!(derived.is_empty());
    }

    #[test]
    fn zero_window_rejected() {
        let records = make_records(&[1.0, 2.0]);
        assert!(matches!(
            generate_signals(&records, 0, 3, 0.0),
            Err(TickscopeError::InvalidWindow { window: 0 })
        ));
        assert!(matches!(
            generate_signals(&records, 2, 0, 0.0),
            Err(TickscopeError::InvalidWindow { window: 0 })
        ));
    }
}
