//! Performance statistics for a crossover backtest.

use crate::domain::backtest::BacktestResult;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestMetrics {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub realized_pnl: f64,
    /// Mark-to-market PnL at the last record, including any open position.
    pub final_pnl: f64,
    /// Largest peak-to-trough fall of the cumulative PnL curve, in price units.
    pub max_drawdown: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    /// Mean holding period of closed trades, in records.
    pub avg_trade_duration: f64,
}

impl BacktestMetrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_duration = 0usize;

        for trade in &result.trades {
            let pnl = trade.pnl;
            if pnl > 0.0 {
                trades_won += 1;
                largest_win = largest_win.max(pnl);
            } else if pnl < 0.0 {
                trades_lost += 1;
                largest_loss = largest_loss.max(pnl.abs());
            } else {
                trades_breakeven += 1;
            }
            total_duration += trade.duration();
        }

        let total_trades = result.trades.len();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };
        let avg_trade_duration = if total_trades > 0 {
            total_duration as f64 / total_trades as f64
        } else {
            0.0
        };

        BacktestMetrics {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            realized_pnl: result.state.realized_pnl,
            final_pnl: result.final_pnl(),
            max_drawdown: compute_drawdown(&result.pnl_curve()),
            largest_win,
            largest_loss,
            avg_trade_duration,
        }
    }
}

/// Peak starts at 0, the PnL before the first record.
fn compute_drawdown(pnl_curve: &[f64]) -> f64 {
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for &pnl in pnl_curve {
        if pnl > peak {
            peak = pnl;
        } else {
            max_dd = max_dd.max(peak - pnl);
        }
    }

    max_dd
}
