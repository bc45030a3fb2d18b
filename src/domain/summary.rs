//! Descriptive statistics computed directly from raw records.

use crate::domain::price_record::PriceRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub avg_mid: f64,
    pub avg_spread: f64,
    /// Population standard deviation of mid_price.
    pub volatility: f64,
    pub count: usize,
}

impl MarketSummary {
    /// `None` when there are no records.
    pub fn compute(records: &[PriceRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let n = records.len() as f64;
        let avg_mid = records.iter().map(|r| r.mid_price).sum::<f64>() / n;
        let avg_spread = records.iter().map(PriceRecord::spread).sum::<f64>() / n;
        let variance = records
            .iter()
            .map(|r| (r.mid_price - avg_mid).powi(2))
            .sum::<f64>()
            / n;

        Some(MarketSummary {
            avg_mid,
            avg_spread,
            volatility: variance.sqrt(),
            count: records.len(),
        })
    }
}

/// Distribution of historical `profit_and_loss` values.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeHistorySummary {
    pub num_trades: usize,
    pub total_profit: f64,
    pub avg_profit: f64,
    pub max_profit: f64,
    pub min_profit: f64,
}

impl TradeHistorySummary {
    /// `None` when no record carries a profit_and_loss value.
    pub fn compute(records: &[PriceRecord]) -> Option<Self> {
        let profits: Vec<f64> = records.iter().filter_map(|r| r.profit_and_loss).collect();
        if profits.is_empty() {
            return None;
        }

        let total_profit: f64 = profits.iter().sum();
        Some(TradeHistorySummary {
            num_trades: profits.len(),
            total_profit,
            avg_profit: total_profit / profits.len() as f64,
            max_profit: profits.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_profit: profits.iter().copied().fold(f64::INFINITY, f64::min),
        })
    }
}
