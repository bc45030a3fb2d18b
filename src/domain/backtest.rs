//! Single-position crossover backtest.
//!
//! Records are replayed strictly left to right with one [`SimulationState`]:
//! - crossover == 2: close any open position at mid, open long `trade_size`
//! - crossover == -2: close any open position at mid, open short `trade_size`
//! - anything else: hold
//!
//! After each step `cumulative_pnl = realized + unrealized` at the mid price.

use crate::domain::position::{ClosedTrade, Side, SimulationState};
use crate::domain::signal::DerivedRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Input records with `cumulative_pnl` filled.
    pub records: Vec<DerivedRecord>,
    pub trades: Vec<ClosedTrade>,
    /// State after the last record; an open position is left open.
    pub state: SimulationState,
}

impl BacktestResult {
    pub fn final_pnl(&self) -> f64 {
        self.records.last().map(|r| r.cumulative_pnl).unwrap_or(0.0)
    }

    pub fn pnl_curve(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative_pnl).collect()
    }
}

/// Advances `state` by one record and returns the mark-to-market PnL.
pub fn step(
    state: &mut SimulationState,
    index: usize,
    record: &DerivedRecord,
    trade_size: f64,
    trades: &mut Vec<ClosedTrade>,
) -> f64 {
    let price = record.record.mid_price;
    let side = if record.is_bullish_flip() {
        Some(Side::Long)
    } else if record.is_bearish_flip() {
        Some(Side::Short)
    } else {
        None
    };

    if let Some(side) = side {
        if let Some(trade) = state.reverse_into(side, trade_size, index, price) {
            tracing::debug!(
                index,
                side = %trade.side,
                entry = trade.entry_price,
                exit = trade.exit_price,
                pnl = trade.pnl,
                "closed position"
            );
            trades.push(trade);
        }
        tracing::debug!(index, %side, price, size = trade_size, "opened position");
    }

    state.mark_to_market(price)
}

pub fn run_backtest(derived: &[DerivedRecord], trade_size: f64) -> BacktestResult {
    let mut state = SimulationState::default();
    let mut trades = Vec::new();
    let mut records = Vec::with_capacity(derived.len());

    for (i, record) in derived.iter().enumerate() {
        let cumulative_pnl = step(&mut state, i, record, trade_size, &mut trades);
        records.push(DerivedRecord {
            cumulative_pnl,
            ..record.clone()
        });
    }

    BacktestResult {
        records,
        trades,
        state,
    }
}
