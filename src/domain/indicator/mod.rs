//! Technical indicator implementations.
//!
//! - `IndicatorType`: indicator identity + parameters, used for labelling output
//! - `IndicatorSeries`: an indicator time series aligned to its input, with
//!   `None` for indices that have no defined value yet

pub mod rsi;
pub mod sma;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    /// Value at the final index, `None` if the series is empty or still warming up.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_type_display_rsi() {
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
    }

    #[test]
    fn last_value_skips_nothing() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Rsi(2),
            values: vec![None, None, Some(55.0)],
        };
        assert_eq!(series.last_value(), Some(55.0));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn last_value_undefined_tail() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Rsi(14),
            values: vec![None, None],
        };
        assert_eq!(series.last_value(), None);

        let empty = IndicatorSeries {
            indicator_type: IndicatorType::Rsi(14),
            values: vec![],
        };
        assert!(empty.is_empty());
        assert_eq!(empty.last_value(), None);
    }
}
