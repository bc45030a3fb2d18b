//! Buy/sell/hold synthesis from the last MA diff and the last RSI value.
//!
//! - MA: BUY if diff > threshold, SELL if diff < -threshold, else HOLD
//! - RSI(14): BUY below 30, SELL above 70, HOLD otherwise or when undefined
//! - Final: the shared call when both agree, HOLD otherwise

use crate::domain::indicator::rsi::{DEFAULT_RSI_PERIOD, compute_rsi};
use crate::domain::signal::DerivedRecord;
use std::fmt;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub fn from_ma_diff(diff: f64, threshold: f64) -> Self {
        if diff > threshold {
            Recommendation::Buy
        } else if diff < -threshold {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }

    pub fn from_rsi(rsi: Option<f64>) -> Self {
        match rsi {
            Some(v) if v < RSI_OVERSOLD => Recommendation::Buy,
            Some(v) if v > RSI_OVERBOUGHT => Recommendation::Sell,
            _ => Recommendation::Hold,
        }
    }

    /// Conservative agreement rule.
    pub fn combine(ma: Self, rsi: Self) -> Self {
        if ma == rsi { ma } else { Recommendation::Hold }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Sell => write!(f, "SELL"),
            Recommendation::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationReport {
    pub ma_recommendation: Recommendation,
    pub rsi_recommendation: Recommendation,
    pub final_recommendation: Recommendation,
    pub last_rsi: Option<f64>,
    pub diff: f64,
}

/// Returns `None` for an empty series.
pub fn generate_recommendation(
    derived: &[DerivedRecord],
    threshold: f64,
) -> Option<RecommendationReport> {
    let last = derived.last()?;
    let diff = last.diff();
    let ma_recommendation = Recommendation::from_ma_diff(diff, threshold);

    let mid_prices: Vec<f64> = derived.iter().map(|d| d.record.mid_price).collect();
    let last_rsi = compute_rsi(&mid_prices, DEFAULT_RSI_PERIOD).last_value();
    let rsi_recommendation = Recommendation::from_rsi(last_rsi);

    Some(RecommendationReport {
        ma_recommendation,
        rsi_recommendation,
        final_recommendation: Recommendation::combine(ma_recommendation, rsi_recommendation),
        last_rsi,
        diff,
    })
}
