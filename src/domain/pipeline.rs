//! Full analysis pass for one product: signals, backtest, recommendation,
//! summaries and metrics.
//!
//! Every call recomputes from the raw series; nothing is cached between calls.

use crate::domain::backtest::{BacktestResult, run_backtest};
use crate::domain::config_validation::validate_params;
use crate::domain::error::TickscopeError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::indicator::rsi::{DEFAULT_RSI_PERIOD, compute_rsi};
use crate::domain::metrics::BacktestMetrics;
use crate::domain::price_record::PriceRecord;
use crate::domain::recommendation::{RecommendationReport, generate_recommendation};
use crate::domain::series::Series;
use crate::domain::signal::generate_signals;
use crate::domain::strategy::StrategyParams;
use crate::domain::summary::{MarketSummary, TradeHistorySummary};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub product: String,
    pub params: StrategyParams,
    pub backtest: BacktestResult,
    /// RSI(14) of the mid price, aligned to `backtest.records`.
    pub rsi: IndicatorSeries,
    pub recommendation: Option<RecommendationReport>,
    pub market_summary: Option<MarketSummary>,
    pub trade_history: Option<TradeHistorySummary>,
    pub metrics: BacktestMetrics,
}

pub fn analyze(series: &Series, params: &StrategyParams) -> Result<Analysis, TickscopeError> {
    validate_params(params)?;

    let derived = generate_signals(
        &series.records,
        params.fast_window,
        params.slow_window,
        params.threshold,
    )?;
    let backtest = run_backtest(&derived, params.trade_size);
    let recommendation = generate_recommendation(&backtest.records, params.threshold);
    let rsi = compute_rsi(&series.mid_prices(), DEFAULT_RSI_PERIOD);
    let metrics = BacktestMetrics::compute(&backtest);

    tracing::info!(
        product = %series.product,
        records = series.len(),
        trades = backtest.trades.len(),
        final_pnl = backtest.final_pnl(),
        "analysis complete"
    );

    Ok(Analysis {
        product: series.product.clone(),
        params: params.clone(),
        rsi,
        recommendation,
        market_summary: MarketSummary::compute(&series.records),
        trade_history: TradeHistorySummary::compute(&series.records),
        metrics,
        backtest,
    })
}

/// Runs [`analyze`] for each product in parallel, results in `products` order.
pub fn analyze_products(
    records: &[PriceRecord],
    products: &[String],
    params: &StrategyParams,
) -> Result<Vec<Analysis>, TickscopeError> {
    tracing::debug!(products = products.len(), "fanning out product analyses");
    products
        .par_iter()
        .map(|product| analyze(&Series::for_product(records, product), params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_record(product: &str, ts: i64, mid: f64, pnl: Option<f64>) -> PriceRecord {
        PriceRecord {
            product: product.to_string(),
            day: 0,
            timestamp: ts,
            mid_price: mid,
            bid_price_1: mid - 1.0,
            ask_price_1: mid + 1.0,
            profit_and_loss: pnl,
        }
    }

    fn params(fast: usize, slow: usize) -> StrategyParams {
        StrategyParams {
            fast_window: fast,
            slow_window: slow,
            threshold: 0.0,
            trade_size: 1.0,
        }
    }

    #[test]
    fn analyze_empty_series() {
        let analysis = analyze(&Series::new("KELP", vec![]), &params(2, 3)).unwrap();

        assert!(analysis.backtest.records.is_empty());
        assert!(analysis.recommendation.is_none());
        assert!(analysis.market_summary.is_none());
        assert!(analysis.trade_history.is_none());
        assert_eq!(analysis.metrics.total_trades, 0);
    }

    #[test]
    fn analyze_rejects_invalid_params() {
        let series = Series::new("KELP", vec![make_record("KELP", 0, 1.0, None)]);
        let err = analyze(&series, &params(0, 3)).unwrap_err();
        assert!(matches!(err, TickscopeError::InvalidWindow { window: 0 }));
    }

    #[test]
    fn analyze_wires_all_stages() {
        let prices = [10.0, 12.0, 14.0, 8.0, 4.0, 12.0, 20.0];
        let records: Vec<PriceRecord> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| make_record("KELP", i as i64, p, if i == 2 { Some(3.0) } else { None }))
            .collect();
        let analysis = analyze(&Series::new("KELP", records), &params(1, 2)).unwrap();

        // short at 8 (index 3), reversed long at 12 (index 5)
        assert_eq!(analysis.backtest.trades.len(), 1);
        assert_relative_eq!(analysis.backtest.trades[0].pnl, -4.0);
        assert_relative_eq!(analysis.backtest.final_pnl(), -4.0 + 8.0);
        assert_eq!(analysis.rsi.len(), prices.len());
        assert_eq!(analysis.market_summary.as_ref().unwrap().count, 7);
        assert_eq!(analysis.trade_history.as_ref().unwrap().num_trades, 1);
        assert_eq!(analysis.metrics.trades_lost, 1);
        assert!(analysis.recommendation.is_some());
    }

    #[test]
    fn analyze_is_deterministic() {
        let records: Vec<PriceRecord> = (0..40)
            .map(|i| make_record("KELP", i, 100.0 + ((i * 7) % 11) as f64, None))
            .collect();
        let series = Series::new("KELP", records);

        let first = analyze(&series, &params(3, 8)).unwrap();
        let second = analyze(&series, &params(3, 8)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn analyze_products_keeps_order_and_isolation() {
        let records = vec![
            make_record("RESIN", 1, 10_000.0, None),
            make_record("KELP", 1, 2_000.0, None),
            make_record("RESIN", 0, 10_002.0, None),
            make_record("KELP", 0, 2_001.0, None),
        ];
        let products = vec!["KELP".to_string(), "RESIN".to_string(), "SQUID".to_string()];
        let analyses = analyze_products(&records, &products, &params(1, 2)).unwrap();

        assert_eq!(analyses.len(), 3);
        assert_eq!(analyses[0].product, "KELP");
        assert_eq!(analyses[0].backtest.records[0].record.mid_price, 2_001.0);
        assert_eq!(analyses[1].product, "RESIN");
        assert_eq!(analyses[1].market_summary.as_ref().unwrap().count, 2);
        assert!(analyses[2].market_summary.is_none());
    }
}
