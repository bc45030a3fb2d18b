//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{build_strategy_params, validate_params, validate_strategy_config};
use crate::domain::error::TickscopeError;
use crate::domain::pipeline::{Analysis, analyze_products};
use crate::domain::price_record::PriceRecord;
use crate::domain::recommendation::RecommendationReport;
use crate::domain::series::list_products;
use crate::domain::strategy::StrategyParams;
use crate::domain::summary::{MarketSummary, TradeHistorySummary};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::TickDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tickscope", about = "Market tick analytics and crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run signals, backtest and recommendation for one or every product
    Analyze {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        product: Option<String>,
        #[arg(long)]
        fast_window: Option<usize>,
        #[arg(long)]
        slow_window: Option<usize>,
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        trade_size: Option<f64>,
        /// Write the derived series as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List products in a tick file
    Products {
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Show market and trade-history summaries for a product
    Summary {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        product: String,
    },
    /// Validate a strategy configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Strategy values given on the command line; each one overrides the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    pub fast_window: Option<usize>,
    pub slow_window: Option<usize>,
    pub threshold: Option<f64>,
    pub trade_size: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            data,
            config,
            product,
            fast_window,
            slow_window,
            threshold,
            trade_size,
            output,
        } => {
            let overrides = ParamOverrides {
                fast_window,
                slow_window,
                threshold,
                trade_size,
            };
            run_analyze(
                data.as_ref(),
                config.as_ref(),
                product.as_deref(),
                &overrides,
                output.as_deref(),
            )
        }
        Command::Products { data } => run_products(&data),
        Command::Summary { data, product } => run_summary(&data, &product),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Config values (or defaults without a config), then CLI overrides, then validation.
pub fn resolve_params(
    config: Option<&dyn ConfigPort>,
    overrides: &ParamOverrides,
) -> Result<StrategyParams, TickscopeError> {
    let base = match config {
        Some(c) => build_strategy_params(c)?,
        None => StrategyParams::default(),
    };
    let params = StrategyParams {
        fast_window: overrides.fast_window.unwrap_or(base.fast_window),
        slow_window: overrides.slow_window.unwrap_or(base.slow_window),
        threshold: overrides.threshold.unwrap_or(base.threshold),
        trade_size: overrides.trade_size.unwrap_or(base.trade_size),
    };
    validate_params(&params)?;
    Ok(params)
}

pub fn resolve_data_path(
    data_override: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Result<PathBuf, TickscopeError> {
    if let Some(p) = data_override {
        return Ok(p.clone());
    }
    config
        .and_then(|c| c.get_string("data", "path"))
        .map(|p| PathBuf::from(p.trim()))
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| TickscopeError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

/// A named product (flag first, then `[data] product`) must be present in
/// `available`; with none named, every available product is analyzed.
pub fn resolve_products(
    product_override: Option<&str>,
    config: Option<&dyn ConfigPort>,
    available: &[String],
) -> Result<Vec<String>, TickscopeError> {
    let requested = product_override
        .map(|p| p.trim().to_string())
        .or_else(|| config.and_then(|c| c.get_string("data", "product")))
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    match requested {
        Some(product) if available.contains(&product) => Ok(vec![product]),
        Some(product) => Err(TickscopeError::NoData { product }),
        None if available.is_empty() => Err(TickscopeError::NoData {
            product: "(any)".into(),
        }),
        None => Ok(available.to_vec()),
    }
}

fn run_analyze(
    data_override: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    product_override: Option<&str>,
    overrides: &ParamOverrides,
    output_path: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load config
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };
    let config = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    // Stage 2: Resolve strategy parameters
    let params = match resolve_params(config, overrides) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Load tick data
    let data_path = match resolve_data_path(data_override, config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e} (use --data or set it in the config)");
            return (&e).into();
        }
    };
    eprintln!("Loading ticks from {}", data_path.display());
    let records = match CsvAdapter::new(data_path).fetch_all() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Resolve products
    let products = match resolve_products(product_override, config, &list_products(&records)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = CsvReportAdapter::new();
    run_analysis_pipeline(&records, &products, &params, output_path, &report)
}

/// Stages 5-7: analyze, print, and optionally export.
pub fn run_analysis_pipeline(
    records: &[PriceRecord],
    products: &[String],
    params: &StrategyParams,
    output_path: Option<&Path>,
    report: &dyn ReportPort,
) -> ExitCode {
    eprintln!(
        "Running analysis: {} products, fast {} / slow {}, threshold {}, trade size {}",
        products.len(),
        params.fast_window,
        params.slow_window,
        params.threshold,
        params.trade_size,
    );

    let analyses = match analyze_products(records, products, params) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for analysis in &analyses {
        for line in analysis_lines(analysis) {
            eprintln!("{line}");
        }
    }

    if let Some(output) = output_path {
        if let Err(e) = report.write_all(&analyses, output) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("\nDerived series written to: {}", output.display());
    }
    ExitCode::SUCCESS
}

fn run_products(data_path: &Path) -> ExitCode {
    let products = match CsvAdapter::new(data_path.to_path_buf()).list_products() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if products.is_empty() {
        eprintln!("No products found in {}", data_path.display());
    } else {
        for product in &products {
            println!("{}", product);
        }
        eprintln!("{} products found", products.len());
    }
    ExitCode::SUCCESS
}

fn run_summary(data_path: &Path, product: &str) -> ExitCode {
    let records = match CsvAdapter::new(data_path.to_path_buf()).fetch_records(product) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("=== {} ===", product);
    for line in market_summary_lines(MarketSummary::compute(&records).as_ref()) {
        println!("{line}");
    }
    for line in trade_history_lines(TradeHistorySummary::compute(&records).as_ref()) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let params = match build_strategy_params(&adapter).and_then(|p| {
        validate_params(&p)?;
        Ok(p)
    }) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nStrategy:");
    eprintln!("  fast_window: {}", params.fast_window);
    eprintln!("  slow_window: {}", params.slow_window);
    eprintln!("  threshold:   {}", params.threshold);
    eprintln!("  trade_size:  {}", params.trade_size);
    if let Some(path) = adapter.get_string("data", "path") {
        eprintln!("  data:        {}", path);
    }

    eprintln!("\nStrategy configuration is valid.");
    ExitCode::SUCCESS
}

pub fn format_rsi(rsi: Option<f64>) -> String {
    match rsi {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

pub fn market_summary_lines(summary: Option<&MarketSummary>) -> Vec<String> {
    match summary {
        Some(s) => vec![
            "Market Summary:".to_string(),
            format!("  Records:      {}", s.count),
            format!("  Avg Mid:      {:.2}", s.avg_mid),
            format!("  Avg Spread:   {:.2}", s.avg_spread),
            format!("  Volatility:   {:.2}", s.volatility),
        ],
        None => vec!["Market Summary: no data".to_string()],
    }
}

pub fn trade_history_lines(summary: Option<&TradeHistorySummary>) -> Vec<String> {
    match summary {
        Some(s) => vec![
            "Trade History:".to_string(),
            format!("  Entries:      {}", s.num_trades),
            format!("  Total Profit: {:.2}", s.total_profit),
            format!("  Avg Profit:   {:.2}", s.avg_profit),
            format!("  Max Profit:   {:.2}", s.max_profit),
            format!("  Min Profit:   {:.2}", s.min_profit),
        ],
        None => vec!["Trade History: no trade history".to_string()],
    }
}

pub fn recommendation_lines(report: Option<&RecommendationReport>) -> Vec<String> {
    match report {
        Some(r) => vec![
            "Recommendation:".to_string(),
            format!("  MA:    {} (diff {:.2})", r.ma_recommendation, r.diff),
            format!("  RSI:   {} (RSI {})", r.rsi_recommendation, format_rsi(r.last_rsi)),
            format!("  Final: {}", r.final_recommendation),
        ],
        None => vec!["Recommendation: no data".to_string()],
    }
}

pub fn analysis_lines(analysis: &Analysis) -> Vec<String> {
    let m = &analysis.metrics;
    let mut lines = vec![format!("\n=== {} ===", analysis.product)];
    lines.extend(market_summary_lines(analysis.market_summary.as_ref()));
    lines.extend(trade_history_lines(analysis.trade_history.as_ref()));
    lines.extend([
        "Backtest:".to_string(),
        format!("  Trades:       {}", m.total_trades),
        format!("  Win Rate:     {:.1}%", m.win_rate * 100.0),
        format!("  Realized PnL: {:.2}", m.realized_pnl),
        format!("  Final PnL:    {:.2}", m.final_pnl),
        format!("  Max Drawdown: {:.2}", m.max_drawdown),
    ]);
    lines.extend(recommendation_lines(analysis.recommendation.as_ref()));
    lines
}
