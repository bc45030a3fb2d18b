//! RSI (Relative Strength Index) over a trailing window of simple averages.
//!
//! For each i >= n, gains and losses are summed over the n price changes
//! ending at i (no Wilder smoothing):
//!
//! avg_gain = gains / n, avg_loss = losses / n
//! RS = avg_gain / avg_loss, or 100 when avg_loss == 0
//! RSI = 100 - (100 / (1 + RS))
//!
//! The zero-loss ratio is capped at 100, so a window with no losses reads
//! 100 - 100/101 (about 99.0099), not 100.
//!
//! Warmup: the first n values are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

/// Ratio used in place of an unbounded RS when the window has no losses.
pub const ZERO_LOSS_RS: f64 = 100.0;

pub const DEFAULT_RSI_PERIOD: usize = 14;

pub fn compute_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if period == 0 || i < period {
            values.push(None);
            continue;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;
        for j in (i + 1 - period)..=i {
            let change = prices[j] - prices[j - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses += change.abs();
            }
        }

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;
        let rs = if avg_loss == 0.0 {
            ZERO_LOSS_RS
        } else {
            avg_gain / avg_loss
        };
        values.push(Some(100.0 - (100.0 / (1.0 + rs))));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
